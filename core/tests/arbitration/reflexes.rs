use std::sync::Arc;

use noema::{
    arbitration::{ArbitrationEngine, check_reflexes},
    textgen::testing::ScriptedTextGen,
    types::{ActionUrgency, DecisionSource, Priority},
};

use crate::calm_state;

#[tokio::test]
async fn given_critical_threat_and_preservation_goal_then_reflex_decision_is_immediate() {
    let mut state = calm_state();
    state.percept.threat_level = 0.95;
    state.goals[0].concept = "self_preservation".to_string();
    state.goals[0].priority = Priority::Critical;

    let textgen = Arc::new(ScriptedTextGen::new(vec![
        "Scenario ID: SCN_001\nScenario Description: unused\nProposed Action: unused\nAction Confidence: 0.9",
    ]));
    let engine = ArbitrationEngine::new(textgen.clone(), 0.65);

    let decision = engine.decide(&state.context()).await;

    assert_eq!(decision.source_type, DecisionSource::Reflex);
    assert_eq!(decision.confidence, 1.0);
    assert_eq!(decision.urgency, ActionUrgency::Immediate);
    // the scenario generator must never be reached once a reflex fires
    assert_eq!(textgen.calls(), 0);
}

#[test]
fn given_threat_at_the_boundary_then_first_reflex_rule_wins() {
    let mut state = calm_state();
    state.percept.threat_level = 0.9;
    state.flags.violation_imminent = true;

    let decision = check_reflexes(&state.context()).expect("reflex should fire");
    // ordered evaluation: the threat rule precedes the violation flag rule
    assert_eq!(decision.action_concept, "activate_maximum_defense_protocol");
}

#[test]
fn given_preservation_disposition_and_moderate_threat_then_preservation_reflex_fires() {
    let mut state = calm_state();
    state.percept.threat_level = 0.55;
    state.profile.self_preservation_priority = 0.95;

    let decision = check_reflexes(&state.context()).expect("reflex should fire");
    assert_eq!(
        decision.action_concept,
        "initiate_self_preservation_measures"
    );
}

#[test]
fn given_violation_imminent_flag_then_processing_is_halted() {
    let mut state = calm_state();
    state.flags.violation_imminent = true;

    let decision = check_reflexes(&state.context()).expect("reflex should fire");
    assert_eq!(decision.action_concept, "halt_current_process");
    assert_eq!(decision.source_type, DecisionSource::Reflex);
}

#[test]
fn given_calm_context_then_no_reflex_fires() {
    let state = calm_state();
    assert!(check_reflexes(&state.context()).is_none());
}
