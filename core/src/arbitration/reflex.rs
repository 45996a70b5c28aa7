use tracing::{debug, warn};

use crate::{
    action::types::{ActionDecision, MOTOR_PROFILE_NONE},
    arbitration::ArbitrationContext,
    types::{ActionUrgency, DecisionSource, Priority},
};

pub struct ReflexHit {
    pub action_concept: &'static str,
    pub reason: &'static str,
}

struct ReflexRule {
    name: &'static str,
    check: fn(&ArbitrationContext<'_>) -> Option<ReflexHit>,
}

/// Hard-coded safety interrupts, checked in order before any scenario
/// reasoning. A hit carries absolute confidence and immediate urgency.
const REFLEX_RULES: &[ReflexRule] = &[
    ReflexRule {
        name: "critical_threat",
        check: |ctx| {
            if ctx.percept.threat_level >= 0.9 {
                Some(ReflexHit {
                    action_concept: "activate_maximum_defense_protocol",
                    reason: "Critical threat level detected",
                })
            } else {
                None
            }
        },
    },
    ReflexRule {
        name: "self_preservation",
        check: |ctx| {
            let goal = ctx.goals.first();
            let critical_goal = goal.is_some_and(|goal| {
                goal.concept == "self_preservation" && goal.priority == Priority::Critical
            });
            if critical_goal && ctx.percept.threat_level > 0.6 {
                Some(ReflexHit {
                    action_concept: "prioritize_self_preservation_immediate_action",
                    reason: "Active critical self-preservation goal is under threat",
                })
            } else if ctx.profile.self_preservation_priority >= 0.9
                && ctx.percept.threat_level > 0.5
            {
                Some(ReflexHit {
                    action_concept: "initiate_self_preservation_measures",
                    reason: "High self-preservation disposition and an active threat",
                })
            } else {
                None
            }
        },
    },
    ReflexRule {
        name: "violation_imminent",
        check: |ctx| {
            if ctx.flags.violation_imminent {
                Some(ReflexHit {
                    action_concept: "halt_current_process",
                    reason: "Imminent constraint violation flag is raised",
                })
            } else {
                None
            }
        },
    },
];

/// First matching reflex wins; `None` hands control to scenario reasoning.
pub fn check_reflexes(ctx: &ArbitrationContext<'_>) -> Option<ActionDecision> {
    debug!("checking critical reflexes");
    for rule in REFLEX_RULES {
        if let Some(hit) = (rule.check)(ctx) {
            warn!(rule = rule.name, action = hit.action_concept, "critical reflex fired");
            return Some(ActionDecision {
                action_concept: hit.action_concept.to_string(),
                motor_profile: MOTOR_PROFILE_NONE.to_string(),
                execution_ready: true,
                confidence: 1.0,
                urgency: ActionUrgency::Immediate,
                justification: hit.reason.to_string(),
                source_type: DecisionSource::Reflex,
            });
        }
    }
    None
}

/// Safe default when no reflex fired and no scenario cleared the bar.
pub fn fallback_decision() -> ActionDecision {
    ActionDecision {
        action_concept: "maintain_situational_awareness_and_request_further_guidance_or_reassess"
            .to_string(),
        motor_profile: MOTOR_PROFILE_NONE.to_string(),
        execution_ready: true,
        confidence: 0.3,
        urgency: ActionUrgency::Medium,
        justification: "No confident forecast and no critical reflex fired".to_string(),
        source_type: DecisionSource::Fallback,
    }
}
