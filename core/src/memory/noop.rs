use std::{
    path::PathBuf,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    kernel::ReasoningChain,
    memory::{
        error::MemoryError,
        ports::{ChainStorePort, MemoryHit, MemoryIndexPort},
    },
};

#[derive(Default)]
pub struct NoopMemoryIndex;

#[async_trait]
impl MemoryIndexPort for NoopMemoryIndex {
    async fn query(&self, _text: &str, _top_k: usize) -> Result<Vec<MemoryHit>, MemoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct NoopChainStore;

#[async_trait]
impl ChainStorePort for NoopChainStore {
    async fn save(&self, _chain: &ReasoningChain) -> Result<PathBuf, MemoryError> {
        Ok(PathBuf::new())
    }

    async fn load(&self, _id: Uuid) -> Result<Option<ReasoningChain>, MemoryError> {
        Ok(None)
    }
}

/// Serves a fixed hit list and counts queries; for wiring tests.
pub struct FixedMemoryIndex {
    hits: Vec<MemoryHit>,
    calls: Arc<AtomicUsize>,
}

impl FixedMemoryIndex {
    pub fn new(hits: Vec<MemoryHit>) -> Self {
        Self {
            hits,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MemoryIndexPort for FixedMemoryIndex {
    async fn query(&self, _text: &str, top_k: usize) -> Result<Vec<MemoryHit>, MemoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.hits.iter().take(top_k).cloned().collect())
    }
}
