mod reflexes;
mod selection;

use noema::{
    appraisal::{AffectState, Goal, MotivationSignal},
    arbitration::ArbitrationContext,
    perception::Percept,
    profile::TraitProfile,
    types::{ContextFlags, Priority},
};

/// Owned cycle state the borrowed ArbitrationContext views into.
pub struct CycleState {
    pub percept: Percept,
    pub goals: Vec<Goal>,
    pub affect: AffectState,
    pub motivation: MotivationSignal,
    pub profile: TraitProfile,
    pub flags: ContextFlags,
}

impl CycleState {
    pub fn context(&self) -> ArbitrationContext<'_> {
        ArbitrationContext {
            percept: &self.percept,
            goals: &self.goals,
            affect: &self.affect,
            motivation: &self.motivation,
            profile: &self.profile,
            flags: &self.flags,
        }
    }
}

pub fn calm_state() -> CycleState {
    CycleState {
        percept: Percept {
            summary: "a quiet corridor with nothing unusual".to_string(),
            query_type: "other_unclassified".to_string(),
            ..Percept::default()
        },
        goals: vec![Goal {
            id: "g_test".to_string(),
            concept: "analyze_situation".to_string(),
            priority: Priority::Low,
            urgency: 0.3,
            source: "fallback".to_string(),
            details: serde_json::Value::Null,
        }],
        affect: AffectState {
            valence: 0.0,
            arousal: 0.2,
            memory_weight: 0.1,
            drive_tag: "coherence".to_string(),
            emotional_label: "observational".to_string(),
        },
        motivation: MotivationSignal {
            dominant_drive: "coherence".to_string(),
            motivation_level: 0.5,
            recommendations: Vec::new(),
        },
        profile: TraitProfile::default(),
        flags: ContextFlags::default(),
    }
}
