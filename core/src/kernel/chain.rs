use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    action::types::{ActionDecision, CommunicationIntent},
    appraisal::types::{AffectState, EmotionState, Goal, MotivationSignal},
    causal::CausalAnalysis,
    hypothesis::types::HypothesisCandidate,
    memory::MemoryHit,
    perception::Percept,
    timebase::utc_timestamp,
    types::{CycleMode, Tick},
};

/// Aggregate record of one reasoning cycle. Created at cycle start, filled
/// stage by stage, immutable once handed to persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningChain {
    pub id: Uuid,
    pub timestamp_utc: String,
    pub start_tick: Tick,
    pub end_tick: Tick,
    pub input_text: String,
    #[serde(default)]
    pub percept: Option<Percept>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub motivation: Option<MotivationSignal>,
    #[serde(default)]
    pub memory_context: Vec<MemoryHit>,
    #[serde(default)]
    pub affect: Option<AffectState>,
    #[serde(default)]
    pub emotion: Option<EmotionState>,
    #[serde(default)]
    pub raw_hypotheses: Vec<String>,
    #[serde(default)]
    pub adjusted_hypotheses: Vec<String>,
    #[serde(default)]
    pub candidates: Vec<HypothesisCandidate>,
    #[serde(default)]
    pub chosen: Option<HypothesisCandidate>,
    #[serde(default)]
    pub causal: Option<CausalAnalysis>,
    #[serde(default)]
    pub action: Option<ActionDecision>,
    #[serde(default)]
    pub communication: Option<CommunicationIntent>,
    pub mode: CycleMode,
    #[serde(default)]
    pub error: Option<String>,
}

impl ReasoningChain {
    /// Opens a fresh chain at cycle start. Everything downstream of the
    /// percept is absent until its stage ran; the mode is corrected by the
    /// dispatcher once the path is known.
    pub fn begin(start_tick: Tick, input_text: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp_utc: utc_timestamp(),
            start_tick,
            end_tick: start_tick,
            input_text,
            percept: None,
            goals: Vec::new(),
            motivation: None,
            memory_context: Vec::new(),
            affect: None,
            emotion: None,
            raw_hypotheses: Vec::new(),
            adjusted_hypotheses: Vec::new(),
            candidates: Vec::new(),
            chosen: None,
            causal: None,
            action: None,
            communication: None,
            mode: CycleMode::FullPath,
            error: None,
        }
    }

    pub fn chosen_text(&self) -> Option<&str> {
        self.chosen.as_ref().map(|candidate| candidate.text.as_str())
    }

    pub fn chosen_score(&self) -> Option<f64> {
        self.chosen.as_ref().map(|candidate| candidate.score)
    }

    pub fn active_goal(&self) -> Option<&Goal> {
        self.goals.first()
    }
}

/// Typed failure alternative of `run_cycle`. Carries whatever context was
/// available when the cycle broke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub message: String,
    pub tick: Tick,
    pub input_text: String,
    #[serde(default)]
    pub percept: Option<Percept>,
}

impl std::fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cycle failed at tick {}: {}", self.tick, self.message)
    }
}

impl std::error::Error for ErrorRecord {}
