//! Decision arbitration: hard reflexes first, predictive scenario reasoning
//! second, a safe fallback when neither produces a confident action.
//!
//! The engine is an independent producer over the same cycle context as the
//! staged pipeline, and its decision takes precedence when it is installed.

pub mod reflex;
pub mod scenario;
pub mod selector;

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    action::types::ActionDecision,
    appraisal::types::{AffectState, Goal, MotivationSignal},
    perception::Percept,
    profile::TraitProfile,
    textgen::TextGenPort,
    types::ContextFlags,
};

pub use reflex::{check_reflexes, fallback_decision};
pub use scenario::{Scenario, generate_scenarios, parse_scenarios};
pub use selector::select_best;

/// Scenario decisions below this confidence degrade to the fallback.
pub const DEFAULT_SELECTION_THRESHOLD: f64 = 0.65;

/// Borrowed view of one cycle's state, shared by every arbitration stage.
pub struct ArbitrationContext<'a> {
    pub percept: &'a Percept,
    pub goals: &'a [Goal],
    pub affect: &'a AffectState,
    pub motivation: &'a MotivationSignal,
    pub profile: &'a TraitProfile,
    pub flags: &'a ContextFlags,
}

pub struct ArbitrationEngine {
    textgen: Arc<dyn TextGenPort>,
    selection_threshold: f64,
}

impl ArbitrationEngine {
    pub fn new(textgen: Arc<dyn TextGenPort>, selection_threshold: f64) -> Self {
        Self {
            textgen,
            selection_threshold,
        }
    }

    /// Runs one arbitration pass. Always returns a decision: a reflex hit
    /// short-circuits everything else, an unconvincing or failed forecast
    /// degrades to the fallback.
    pub async fn decide(&self, ctx: &ArbitrationContext<'_>) -> ActionDecision {
        if let Some(reaction) = check_reflexes(ctx) {
            warn!(action = %reaction.action_concept, "critical reflex took over the decision");
            return reaction;
        }

        let scenarios = generate_scenarios(self.textgen.as_ref(), ctx).await;
        if scenarios.is_empty() {
            warn!("no scenarios available, activating fallback");
            return fallback_decision();
        }

        match select_best(&scenarios, ctx) {
            Some(decision) if decision.confidence >= self.selection_threshold => {
                info!(
                    action = %decision.action_concept,
                    confidence = decision.confidence,
                    "scenario decision accepted"
                );
                decision
            }
            Some(decision) => {
                warn!(
                    confidence = decision.confidence,
                    threshold = self.selection_threshold,
                    "selected scenario is below the confidence threshold, activating fallback"
                );
                fallback_decision()
            }
            None => fallback_decision(),
        }
    }
}
