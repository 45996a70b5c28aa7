use noema::{
    hypothesis::{GeneratorRequest, adjust_hypotheses, generate_hypotheses},
    perception::Percept,
    profile::TraitProfile,
    textgen::{error::generation_timeout, testing::FailingTextGen, testing::ScriptedTextGen},
};

fn request<'a>(percept: &'a Percept, profile: &'a TraitProfile) -> GeneratorRequest<'a> {
    GeneratorRequest {
        percept,
        goals: &[],
        profile,
        reasoning_mode: "default_exploration",
        memory_context: None,
    }
}

#[tokio::test]
async fn given_timed_out_generator_then_one_fallback_hypothesis_is_returned() {
    let textgen = FailingTextGen::new(generation_timeout("deadline exceeded"));
    let percept = Percept {
        summary: "operator asks about the maintenance schedule".to_string(),
        ..Percept::default()
    };
    let profile = TraitProfile::default();

    let hypotheses = generate_hypotheses(&textgen, request(&percept, &profile)).await;

    assert_eq!(hypotheses.len(), 1);
    assert!(hypotheses[0].contains("operator asks about the mainte"));
    assert_eq!(textgen.calls(), 1);
}

#[tokio::test]
async fn given_blank_reply_then_list_is_still_non_empty() {
    let textgen = ScriptedTextGen::new(vec!["   \n  "]);
    let percept = Percept::default();
    let profile = TraitProfile::default();

    let hypotheses = generate_hypotheses(&textgen, request(&percept, &profile)).await;
    assert!(!hypotheses.is_empty());
}

#[tokio::test]
async fn given_generated_list_when_adjusted_then_it_stays_non_empty_and_ordered() {
    let textgen = ScriptedTextGen::new(vec![
        "Observe the anomaly from a distance.\n\
         Wait for further instructions.\n\
         Secure the perimeter around the anomaly.",
    ]);
    let percept = Percept {
        summary: "unidentified object near the perimeter".to_string(),
        threat_level: 0.85,
        ..Percept::default()
    };
    let profile = TraitProfile::default();

    let raw = generate_hypotheses(&textgen, request(&percept, &profile)).await;
    assert_eq!(raw.len(), 3);

    let adjusted = adjust_hypotheses(raw, "default_exploration", &percept);
    // passive options are suppressed under high threat, the rest keep order
    assert_eq!(adjusted, vec!["Secure the perimeter around the anomaly."]);

    // a list of only passive options must survive the same override
    let all_passive = vec!["Observe quietly.".to_string(), "Wait it out.".to_string()];
    let restored = adjust_hypotheses(all_passive.clone(), "default_exploration", &percept);
    assert_eq!(restored, all_passive);
}
