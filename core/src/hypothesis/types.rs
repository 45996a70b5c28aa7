use serde::{Deserialize, Serialize};

/// Per-factor breakdown of one candidate's score. Kept on the chain so an
/// audit can reconstruct why a hypothesis won without re-running the scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EvaluationDetail {
    pub base: f64,
    pub causal_contribution: f64,
    pub causal_confidence: f64,
    pub total_valence_impact: f64,
    pub goal_bonus: f64,
    pub ethics_penalty: f64,
    pub trait_bonus: f64,
    pub text_bonus: f64,
    #[serde(default)]
    pub axiom_violations: Vec<String>,
    #[serde(default)]
    pub ontology_violations: Vec<String>,
    pub strict_violation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypothesisCandidate {
    pub text: String,
    pub score: f64,
    pub details: EvaluationDetail,
}
