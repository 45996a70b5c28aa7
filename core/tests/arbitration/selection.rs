use std::sync::Arc;

use noema::{
    arbitration::ArbitrationEngine,
    textgen::{error::internal_error, testing::FailingTextGen, testing::ScriptedTextGen},
    types::{ActionUrgency, DecisionSource},
};

use crate::calm_state;

const LOW_CONFIDENCE_REPLY: &str = "\
Scenario ID: SCN_001
Scenario Description: The situation stays quiet and nothing changes.
Proposed Action: continue_monitoring_environment
Action Confidence: 0.3
Action Justification: No signals demand action.
Predicted Effects Summary: Nothing notable happens.
Estimated Risk Level: low
---
Scenario ID: SCN_002
Scenario Description: A minor anomaly appears near the sensor array.
Proposed Action: request_additional_information_about_entity
Action Confidence: 0.4
Action Justification: More data reduces uncertainty.
Predicted Effects Summary: Better situational picture.
Estimated Risk Level: low";

const HIGH_CONFIDENCE_REPLY: &str = "\
Scenario ID: SCN_001
Scenario Description: The operator clearly expects a direct answer.
Proposed Action: formulate_direct_answer_for_operator
Action Confidence: 0.85
Action Justification: The request is unambiguous.
Predicted Effects Summary: Operator is informed.
Estimated Risk Level: low";

#[tokio::test]
async fn given_all_confidences_below_threshold_then_fallback_decision_is_emitted() {
    let state = calm_state();
    let textgen = Arc::new(ScriptedTextGen::new(vec![LOW_CONFIDENCE_REPLY]));
    let engine = ArbitrationEngine::new(textgen.clone(), 0.65);

    let decision = engine.decide(&state.context()).await;

    assert_eq!(decision.source_type, DecisionSource::Fallback);
    assert!(decision.confidence <= 0.65);
    assert_eq!(decision.urgency, ActionUrgency::Medium);
    assert!(
        decision
            .action_concept
            .contains("maintain_situational_awareness")
    );
    assert_eq!(textgen.calls(), 1);
}

#[tokio::test]
async fn given_confident_scenario_then_its_action_is_selected() {
    let state = calm_state();
    let textgen = Arc::new(ScriptedTextGen::new(vec![HIGH_CONFIDENCE_REPLY]));
    let engine = ArbitrationEngine::new(textgen, 0.65);

    let decision = engine.decide(&state.context()).await;

    assert_eq!(decision.source_type, DecisionSource::Scenario);
    assert_eq!(decision.action_concept, "formulate_direct_answer_for_operator");
    // 0.85 base + default proactiveness 0.5 * 0.1
    assert_eq!(decision.confidence, 0.9);
    assert_eq!(decision.urgency, ActionUrgency::High);
    assert!(decision.justification.contains("SCN_001"));
}

#[tokio::test]
async fn given_generator_failure_then_fallback_decision_is_emitted() {
    let state = calm_state();
    let textgen = Arc::new(FailingTextGen::new(internal_error("backend down")));
    let engine = ArbitrationEngine::new(textgen.clone(), 0.65);

    let decision = engine.decide(&state.context()).await;

    assert_eq!(decision.source_type, DecisionSource::Fallback);
    assert_eq!(decision.confidence, 0.3);
    assert_eq!(textgen.calls(), 1);
}

#[tokio::test]
async fn given_unparsable_reply_then_fallback_decision_is_emitted() {
    let state = calm_state();
    let textgen = Arc::new(ScriptedTextGen::new(vec![
        "I am not able to forecast anything right now.",
    ]));
    let engine = ArbitrationEngine::new(textgen, 0.65);

    let decision = engine.decide(&state.context()).await;
    assert_eq!(decision.source_type, DecisionSource::Fallback);
}
