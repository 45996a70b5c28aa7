use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{kernel::chain::ReasoningChain, types::Tick};

const LOW_CONFIDENCE_THRESHOLD: f64 = 0.5;
const ETHICAL_CONFLICT_SCORE_MIN: f64 = 0.7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditIssue {
    pub issue: String,
    pub suggestion: String,
}

/// Flat extract of one chain for log lines and postmortems. String fields
/// degrade to "N/A" when the stage never ran.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditTrace {
    pub perception_summary: String,
    pub goal_concept: String,
    pub dominant_drive: String,
    pub emotional_label: String,
    pub chosen_hypothesis: String,
    pub hypothesis_score: Option<f64>,
    pub action_concept: String,
    pub intent_type: String,
    pub mode: String,
    pub start_tick: Tick,
    pub end_tick: Tick,
    pub timestamp_utc: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainAudit {
    pub chain_id: Uuid,
    pub issues: Vec<AuditIssue>,
    pub trace: AuditTrace,
}

/// Post-cycle review of a finalized chain. Flags weak or conflicted
/// conclusions; the result is advisory and never alters the chain.
pub fn audit_chain(chain: &ReasoningChain) -> ChainAudit {
    let mut issues = Vec::new();

    match (chain.chosen_text(), chain.chosen_score()) {
        (Some(_), Some(score)) => {
            let valence = chain.affect.as_ref().map(|affect| affect.valence).unwrap_or(0.0);
            if score < LOW_CONFIDENCE_THRESHOLD {
                issues.push(AuditIssue {
                    issue: "Low confidence score".to_string(),
                    suggestion: "Consider alternate hypotheses or deeper context expansion \
                                 for similar future scenarios."
                        .to_string(),
                });
            } else if valence < 0.0 && score >= ETHICAL_CONFLICT_SCORE_MIN {
                issues.push(AuditIssue {
                    issue: "Potential ethical/goal conflict".to_string(),
                    suggestion: "Review ethical alignment and goal congruency for this \
                                 hypothesis type."
                        .to_string(),
                });
            }
        }
        _ => {
            issues.push(AuditIssue {
                issue: "Missing critical data".to_string(),
                suggestion: "Chain is incomplete (missing chosen hypothesis or score). \
                             Review the cycle that produced it."
                    .to_string(),
            });
        }
    }

    ChainAudit {
        chain_id: chain.id,
        issues,
        trace: trace_chain(chain),
    }
}

fn trace_chain(chain: &ReasoningChain) -> AuditTrace {
    let not_available = || "N/A".to_string();

    AuditTrace {
        perception_summary: chain
            .percept
            .as_ref()
            .map(|percept| percept.summary.clone())
            .unwrap_or_else(not_available),
        goal_concept: chain
            .active_goal()
            .map(|goal| goal.concept.clone())
            .unwrap_or_else(not_available),
        dominant_drive: chain
            .motivation
            .as_ref()
            .map(|motivation| motivation.dominant_drive.clone())
            .unwrap_or_else(not_available),
        emotional_label: chain
            .affect
            .as_ref()
            .map(|affect| affect.emotional_label.clone())
            .unwrap_or_else(not_available),
        chosen_hypothesis: chain
            .chosen_text()
            .map(str::to_string)
            .unwrap_or_else(not_available),
        hypothesis_score: chain.chosen_score(),
        action_concept: chain
            .action
            .as_ref()
            .map(|action| action.action_concept.clone())
            .unwrap_or_else(not_available),
        intent_type: chain
            .communication
            .as_ref()
            .map(|intent| intent.intent_type.clone())
            .unwrap_or_else(not_available),
        mode: match chain.mode {
            crate::types::CycleMode::FastPath => "fast_path".to_string(),
            crate::types::CycleMode::FullPath => "full_path".to_string(),
        },
        start_tick: chain.start_tick,
        end_tick: chain.end_tick,
        timestamp_utc: chain.timestamp_utc.clone(),
    }
}
