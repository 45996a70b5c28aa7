use serde::{Deserialize, Serialize};

use crate::types::{ActionUrgency, DecisionSource};

pub const ACTION_HOLD_POSITION: &str = "Maintain current state and observe";
pub const MOTOR_PROFILE_NONE: &str = "none";

/// What the planner derives from hypothesis and goal before the orchestrator
/// wraps it into a full decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedAction {
    pub action_plan: String,
    pub motor_profile: String,
    pub execution_ready: bool,
}

/// One action decision per cycle per decision path. Both the staged pipeline
/// and the arbitration engine emit this shape; `source_type` says which path
/// produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDecision {
    pub action_concept: String,
    pub motor_profile: String,
    pub execution_ready: bool,
    pub confidence: f64,
    pub urgency: ActionUrgency,
    pub justification: String,
    pub source_type: DecisionSource,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommunicationIntent {
    pub intent_type: String,
    pub style: String,
    pub explanation_priority: String,
    pub emotional_tone: String,
    pub target_focus: String,
}
