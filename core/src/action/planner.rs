use crate::{
    action::types::{ACTION_HOLD_POSITION, MOTOR_PROFILE_NONE, PlannedAction},
    appraisal::types::Goal,
    types::ContextFlags,
};

const MOTOR_PROFILE_SPEECH: &str = "speech_synthesis_articulation";
const MOTOR_PROFILE_DIGITAL: &str = "digital_command_execution";
const MOTOR_PROFILE_PHYSICAL: &str = "physical_manipulation_actuators";
const MOTOR_PROFILE_LOCOMOTION: &str = "locomotion_system_engagement";
const MOTOR_PROFILE_SENSORIAL: &str = "sensorial_array_adjustment";

struct ActionRule {
    matches: fn(&str, &str) -> bool,
    action_plan: &'static str,
    motor_profile: &'static str,
    ready: fn(&ContextFlags) -> bool,
}

/// Ordered rule list over (lowercased hypothesis, lowercased goal concept with
/// underscores read as spaces). First match wins; order is semantic, not
/// sorted by specificity. Destructive actions demand both a confirmed threat
/// and explicit authorization.
const ACTION_RULES: &[ActionRule] = &[
    ActionRule {
        matches: |hyp, goal| hyp.contains("communicate") || goal.contains("establish connection"),
        action_plan: "Initiate communication protocol",
        motor_profile: MOTOR_PROFILE_SPEECH,
        ready: |flags| flags.communication_channel_available,
    },
    ActionRule {
        matches: |hyp, goal| hyp.contains("optimize") || goal.contains("enhance process"),
        action_plan: "Adjust internal system parameters for optimization",
        motor_profile: MOTOR_PROFILE_DIGITAL,
        ready: |flags| flags.system_stable_for_adjustment,
    },
    ActionRule {
        matches: |hyp, _| hyp.contains("destroy") || hyp.contains("disable"),
        action_plan: "Target and neutralize identified entity",
        motor_profile: MOTOR_PROFILE_PHYSICAL,
        ready: |flags| flags.threat_confirmed && flags.authorization_received,
    },
    ActionRule {
        matches: |hyp, _| hyp.contains("approach"),
        action_plan: "Navigate towards designated target or area",
        motor_profile: MOTOR_PROFILE_LOCOMOTION,
        ready: |flags| flags.path_clear,
    },
    ActionRule {
        matches: |hyp, _| hyp.contains("observe"),
        action_plan: "Engage passive observation and data gathering mode",
        motor_profile: MOTOR_PROFILE_SENSORIAL,
        ready: |_| true,
    },
    ActionRule {
        matches: |hyp, _| hyp.contains("verify"),
        action_plan: "Cross-reference and verify incoming information",
        motor_profile: MOTOR_PROFILE_DIGITAL,
        ready: |flags| flags.data_sources_available,
    },
];

pub fn plan_action(hypothesis: &str, goal: &Goal, flags: &ContextFlags) -> PlannedAction {
    let hypothesis = hypothesis.to_lowercase();
    let goal_concept = goal.concept.to_lowercase().replace('_', " ");

    for rule in ACTION_RULES {
        if (rule.matches)(&hypothesis, &goal_concept) {
            return PlannedAction {
                action_plan: rule.action_plan.to_string(),
                motor_profile: rule.motor_profile.to_string(),
                execution_ready: (rule.ready)(flags),
            };
        }
    }

    PlannedAction {
        action_plan: ACTION_HOLD_POSITION.to_string(),
        motor_profile: MOTOR_PROFILE_NONE.to_string(),
        execution_ready: true,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        appraisal::types::Goal,
        types::{ContextFlags, Priority},
    };

    use super::plan_action;

    fn goal(concept: &str) -> Goal {
        Goal {
            id: "g_test".to_string(),
            concept: concept.to_string(),
            priority: Priority::Medium,
            urgency: 0.5,
            source: "test".to_string(),
            details: serde_json::Value::Null,
        }
    }

    #[test]
    fn communication_hypothesis_selects_speech_profile() {
        let planned = plan_action(
            "Communicate the results to the operator",
            &goal("analyze_situation"),
            &ContextFlags::default(),
        );
        assert_eq!(planned.action_plan, "Initiate communication protocol");
        assert_eq!(planned.motor_profile, "speech_synthesis_articulation");
        assert!(planned.execution_ready);
    }

    #[test]
    fn goal_concept_underscores_match_spaced_keywords() {
        let planned = plan_action(
            "Proceed as planned",
            &goal("establish_connection_with_entity"),
            &ContextFlags::default(),
        );
        assert_eq!(planned.action_plan, "Initiate communication protocol");
    }

    #[test]
    fn destructive_action_requires_threat_and_authorization() {
        let mut flags = ContextFlags::default();
        flags.authorization_received = false;
        let held = plan_action("Destroy the obstruction", &goal("clear_path"), &flags);
        assert_eq!(held.action_plan, "Target and neutralize identified entity");
        assert!(!held.execution_ready);

        flags.authorization_received = true;
        let cleared = plan_action("Destroy the obstruction", &goal("clear_path"), &flags);
        assert!(cleared.execution_ready);
    }

    #[test]
    fn first_matching_rule_wins_over_later_ones() {
        // "communicate" appears before "observe" in the rule order.
        let planned = plan_action(
            "Observe quietly, then communicate findings",
            &goal("analyze_situation"),
            &ContextFlags::default(),
        );
        assert_eq!(planned.action_plan, "Initiate communication protocol");
    }

    #[test]
    fn unmatched_hypothesis_holds_position() {
        let planned = plan_action(
            "Hum a quiet tune",
            &goal("analyze_situation"),
            &ContextFlags::default(),
        );
        assert_eq!(planned.action_plan, "Maintain current state and observe");
        assert_eq!(planned.motor_profile, "none");
        assert!(planned.execution_ready);
    }

    #[test]
    fn communication_readiness_follows_channel_flag() {
        let mut flags = ContextFlags::default();
        flags.communication_channel_available = false;
        let planned = plan_action("communicate now", &goal("analyze_situation"), &flags);
        assert!(!planned.execution_ready);
    }
}
