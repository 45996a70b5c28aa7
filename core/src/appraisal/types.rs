use serde::{Deserialize, Serialize};

use crate::types::Priority;

/// Exactly one goal is active per cycle; the chain stores it list-shaped for
/// forward compatibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub concept: String,
    pub priority: Priority,
    pub urgency: f64,
    pub source: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotivationSignal {
    pub dominant_drive: String,
    pub motivation_level: f64,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Seed signal handed to goal formation before any drive evaluation ran.
pub fn preliminary_motivation() -> MotivationSignal {
    MotivationSignal {
        dominant_drive: "coherence_initial".to_string(),
        motivation_level: 0.5,
        recommendations: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffectState {
    pub valence: f64,
    pub arousal: f64,
    pub memory_weight: f64,
    pub drive_tag: String,
    pub emotional_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionState {
    pub label: String,
    pub valence: f64,
    pub intensity: f64,
}
