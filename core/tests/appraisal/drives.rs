use noema::{
    appraisal::{Goal, MotivationContext, evaluate_motivation},
    profile::TraitProfile,
    types::{ContextFlags, Priority},
};

fn goal_with_concept(concept: &str) -> Goal {
    Goal {
        id: "g_test".to_string(),
        concept: concept.to_string(),
        priority: Priority::Medium,
        urgency: 0.5,
        source: "test".to_string(),
        details: serde_json::Value::Null,
    }
}

fn evaluate(concept: &str, profile: &TraitProfile, flags: &ContextFlags) -> noema::appraisal::MotivationSignal {
    let goal = goal_with_concept(concept);
    evaluate_motivation(MotivationContext {
        goal: &goal,
        profile,
        flags,
    })
}

#[test]
fn given_a_threat_goal_when_motivation_runs_then_survival_drive_dominates() {
    let signal = evaluate(
        "evaluate_threat:perimeter",
        &TraitProfile::default(),
        &ContextFlags::default(),
    );

    assert_eq!(signal.dominant_drive, "survival");
    assert!((signal.motivation_level - 0.8).abs() < 1e-9);
    assert!(signal.recommendations.contains(&"focus_boost".to_string()));
    assert!(signal.recommendations.contains(&"urgency_flag".to_string()));
}

#[test]
fn given_an_external_alert_when_survival_is_active_then_level_clamps_at_one() {
    let flags = ContextFlags {
        external_alert: true,
        ..ContextFlags::default()
    };
    let signal = evaluate("evaluate_threat:perimeter", &TraitProfile::default(), &flags);

    assert!((signal.motivation_level - 1.0).abs() < 1e-9);
}

#[test]
fn given_degraded_flags_when_motivation_runs_then_level_drops_below_baseline() {
    let flags = ContextFlags {
        low_success_rate: true,
        internal_error: true,
        ..ContextFlags::default()
    };
    let signal = evaluate("analyze_situation", &TraitProfile::default(), &flags);

    assert_eq!(signal.dominant_drive, "coherence");
    assert!((signal.motivation_level - 0.15).abs() < 1e-9);
    assert!(signal.recommendations.is_empty());
}

#[test]
fn given_an_ethical_risk_goal_when_sensitivity_is_high_then_caution_is_recommended() {
    let profile = TraitProfile {
        ethics_sensitivity: 0.9,
        ..TraitProfile::default()
    };
    let signal = evaluate(
        "evaluate_ethical_risk:directive",
        &profile,
        &ContextFlags::default(),
    );

    assert_eq!(signal.dominant_drive, "preservation");
    assert!((signal.motivation_level - 0.68).abs() < 1e-9);
    assert!(signal.recommendations.contains(&"urgency_flag".to_string()));
    assert!(signal.recommendations.contains(&"ethical_caution".to_string()));
}

#[test]
fn given_a_process_goal_when_thinking_style_differs_then_the_boost_differs() {
    let deductive = TraitProfile::default();
    let intuitive = TraitProfile {
        thinking_style: "intuitive".to_string(),
        ..TraitProfile::default()
    };

    let boosted = evaluate("enhance_process:pipeline", &deductive, &ContextFlags::default());
    let modest = evaluate("enhance_process:pipeline", &intuitive, &ContextFlags::default());

    assert_eq!(boosted.dominant_drive, "optimization");
    assert!((boosted.motivation_level - 0.65).abs() < 1e-9);
    assert!((modest.motivation_level - 0.55).abs() < 1e-9);
}

#[test]
fn given_an_unmapped_concept_when_motivation_runs_then_coherence_holds_baseline() {
    let signal = evaluate(
        "engage_in_social_dialogue",
        &TraitProfile::default(),
        &ContextFlags::default(),
    );

    assert_eq!(signal.dominant_drive, "coherence");
    assert!((signal.motivation_level - 0.5).abs() < 1e-9);
    assert!(signal.recommendations.is_empty());
}
