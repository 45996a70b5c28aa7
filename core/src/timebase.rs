use std::sync::{
    Mutex, PoisonError,
    atomic::{AtomicU64, Ordering},
};

use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use uuid::Uuid;

use crate::types::Tick;

/// Monotonic cycle clock. The counter is the only cross-cycle shared mutable
/// state in the core; increments are atomic so concurrent cycles never observe
/// duplicate ticks.
#[derive(Debug, Default)]
pub struct TickSource {
    counter: AtomicU64,
    last_event: AtomicU64,
}

impl TickSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self) -> Tick {
        self.counter.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> Tick {
        self.counter.load(Ordering::SeqCst)
    }

    pub fn mark_event(&self) -> Tick {
        let now = self.current();
        self.last_event.store(now, Ordering::SeqCst);
        now
    }

    pub fn ticks_since_event(&self) -> Tick {
        self.current()
            .saturating_sub(self.last_event.load(Ordering::SeqCst))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    pub tick: Tick,
    pub timestamp_utc: String,
    pub chain_id: Option<Uuid>,
    pub event_type: String,
    pub data: serde_json::Value,
    #[serde(default)]
    pub related_tick: Option<Tick>,
}

/// Append-only log of notable cycle events. Appends are serialized behind a
/// lock; readers get point-in-time snapshots and may lag in-flight writes.
#[derive(Debug, Default)]
pub struct Timeline {
    events: Mutex<Vec<TimelineEvent>>,
}

pub fn utc_timestamp() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &self,
        tick: Tick,
        chain_id: Option<Uuid>,
        event_type: &str,
        data: serde_json::Value,
        related_tick: Option<Tick>,
    ) {
        let event = TimelineEvent {
            tick,
            timestamp_utc: utc_timestamp(),
            chain_id,
            event_type: event_type.to_string(),
            data,
            related_tick,
        };
        self.lock_events().push(event);
    }

    pub fn recent(&self, limit: usize) -> Vec<TimelineEvent> {
        let events = self.lock_events();
        let start = events.len().saturating_sub(limit);
        events[start..].to_vec()
    }

    pub fn for_chain(&self, chain_id: Uuid) -> Vec<TimelineEvent> {
        self.lock_events()
            .iter()
            .filter(|event| event.chain_id == Some(chain_id))
            .cloned()
            .collect()
    }

    pub fn by_type(&self, event_type: &str) -> Vec<TimelineEvent> {
        self.lock_events()
            .iter()
            .filter(|event| event.event_type == event_type)
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lock_events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_events().is_empty()
    }

    fn lock_events(&self) -> std::sync::MutexGuard<'_, Vec<TimelineEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
