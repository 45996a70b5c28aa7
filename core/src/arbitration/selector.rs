use tracing::{debug, info};

use crate::{
    action::types::{ActionDecision, MOTOR_PROFILE_NONE},
    arbitration::{ArbitrationContext, scenario::Scenario},
    types::{ActionUrgency, DecisionSource, round3},
};

/// Action concepts that keep the agent idle. Anything else earns a small
/// proactiveness bonus during selection.
const PASSIVE_ACTION_KEYWORDS: &[&str] = &["observe", "wait", "monitor", "reassess"];

/// Scores every scenario and promotes the best one to an ActionDecision.
/// The generator's own confidence already folds in its context reading; the
/// selector only nudges non-passive actions by disposition. Ties keep the
/// earlier scenario. Returns `None` when there is nothing to select from.
pub fn select_best(
    scenarios: &[Scenario],
    ctx: &ArbitrationContext<'_>,
) -> Option<ActionDecision> {
    info!(count = scenarios.len(), "evaluating forecast scenarios");

    let mut best: Option<(&Scenario, f64)> = None;
    for scenario in scenarios {
        let action = scenario.proposed_action.to_lowercase();
        let passive = PASSIVE_ACTION_KEYWORDS
            .iter()
            .any(|keyword| action.contains(keyword));
        let bonus = if passive { 0.0 } else { ctx.profile.proactiveness * 0.1 };
        let score = round3((scenario.confidence + bonus).clamp(0.0, 1.0));
        debug!(
            scenario = %scenario.id,
            action = %scenario.proposed_action,
            score,
            base = scenario.confidence,
            "scenario scored"
        );

        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((scenario, score));
        }
    }

    let (winner, score) = best?;
    let description_prefix: String = winner.description.chars().take(50).collect();
    let justification = if winner.justification.is_empty() {
        "N/A".to_string()
    } else {
        winner.justification.clone()
    };

    info!(
        scenario = %winner.id,
        action = %winner.proposed_action,
        score,
        "scenario selected"
    );
    Some(ActionDecision {
        action_concept: winner.proposed_action.clone(),
        motor_profile: MOTOR_PROFILE_NONE.to_string(),
        execution_ready: false,
        confidence: score,
        urgency: if score > 0.8 {
            ActionUrgency::High
        } else {
            ActionUrgency::Medium
        },
        justification: format!(
            "Selected from scenario '{}' ({}...). Action justification: {}",
            winner.id, description_prefix, justification
        ),
        source_type: DecisionSource::Scenario,
    })
}
