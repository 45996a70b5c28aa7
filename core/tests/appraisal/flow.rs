//! Chains the appraisal stages the way a cycle does: percept -> goal ->
//! motivation -> affect, checking the state that falls out end to end.

use noema::{
    appraisal::{
        AffectRequest, GoalRequest, MotivationContext, assess_affect, evaluate_motivation,
        form_goal, preliminary_motivation,
    },
    perception::{CoreTask, Percept},
    profile::TraitProfile,
    types::{ContextFlags, CycleContext, Priority},
};

fn run_stages(
    percept: &Percept,
    profile: &TraitProfile,
    context: &CycleContext,
) -> (noema::appraisal::Goal, noema::appraisal::MotivationSignal, noema::appraisal::AffectState) {
    let seed = preliminary_motivation();
    let goal = form_goal(GoalRequest {
        percept,
        profile,
        seed: &seed,
    });
    let motivation = evaluate_motivation(MotivationContext {
        goal: &goal,
        profile,
        flags: &context.flags,
    });
    let goals = vec![goal.clone()];
    let affect = assess_affect(AffectRequest {
        percept,
        motivation: &motivation,
        goals: &goals,
        profile,
        context,
    });
    (goal, motivation, affect)
}

#[test]
fn given_a_calm_unclassified_input_when_stages_run_then_state_stays_relaxed() {
    let percept = Percept {
        summary: "a quiet corridor with nothing unusual".to_string(),
        query_type: "other_unclassified".to_string(),
        complexity: "low".to_string(),
        ..Percept::default()
    };

    let (goal, motivation, affect) =
        run_stages(&percept, &TraitProfile::default(), &CycleContext::default());

    assert_eq!(goal.concept, "analyze_situation");
    assert_eq!(goal.priority, Priority::Low);
    assert_eq!(motivation.dominant_drive, "coherence");
    assert!((motivation.motivation_level - 0.5).abs() < 1e-9);
    assert!(affect.arousal < 0.3);
    assert_eq!(affect.emotional_label, "relaxed");
}

#[test]
fn given_an_urgent_command_when_stages_run_then_the_cycle_escalates() {
    let calm = Percept {
        summary: "a quiet corridor with nothing unusual".to_string(),
        query_type: "other_unclassified".to_string(),
        complexity: "low".to_string(),
        ..Percept::default()
    };
    let urgent = Percept {
        summary: "shut down the reactor cooling loop now".to_string(),
        query_type: "instruction_command:system_control".to_string(),
        urgency: "high".to_string(),
        threat_level: 0.8,
        core_task: CoreTask {
            subject: Some("operator".to_string()),
            action: Some("shut down".to_string()),
            object: Some("reactor cooling loop".to_string()),
        },
        ..Percept::default()
    };
    let context = CycleContext {
        flags: ContextFlags {
            external_alert: true,
            ..ContextFlags::default()
        },
        ..CycleContext::default()
    };

    let (_, _, calm_affect) =
        run_stages(&calm, &TraitProfile::default(), &CycleContext::default());
    let (goal, motivation, affect) = run_stages(&urgent, &TraitProfile::default(), &context);

    assert_eq!(goal.concept, "execute_command:system_control");
    assert_eq!(goal.priority, Priority::Critical);
    assert!((goal.urgency - 0.9).abs() < 1e-9);
    assert_eq!(goal.source, "user_instruction_command");
    // execute_command has no drive mapping; the alert still raises the level.
    assert_eq!(motivation.dominant_drive, "coherence");
    assert!((motivation.motivation_level - 0.7).abs() < 1e-9);
    assert!(affect.arousal > calm_affect.arousal);
    assert!(affect.arousal <= 1.0);
}

#[test]
fn given_extreme_inputs_when_affect_runs_then_every_output_stays_bounded() {
    let percept = Percept {
        summary: "threat threat threat".to_string(),
        threat_level: 1.0,
        novelty: 1.0,
        core_task: CoreTask {
            subject: None,
            action: Some("destroy".to_string()),
            object: Some("threat source".to_string()),
        },
        ..Percept::default()
    };
    let profile = TraitProfile {
        risk_aversion: 1.0,
        novelty_seeking: 1.0,
        empathy_level: 1.0,
        ..TraitProfile::default()
    };
    let context = CycleContext {
        distress_signal: 1.0,
        ..CycleContext::default()
    };
    let goals: Vec<_> = (0..3)
        .map(|n| noema::appraisal::Goal {
            id: format!("g_{n}"),
            concept: "security_sweep".to_string(),
            priority: Priority::Critical,
            urgency: 0.95,
            source: "test".to_string(),
            details: serde_json::Value::Null,
        })
        .collect();
    let motivation = noema::appraisal::MotivationSignal {
        dominant_drive: "survival".to_string(),
        motivation_level: 1.0,
        recommendations: Vec::new(),
    };

    let affect = assess_affect(AffectRequest {
        percept: &percept,
        motivation: &motivation,
        goals: &goals,
        profile: &profile,
        context: &context,
    });

    assert!((-1.0..=1.0).contains(&affect.valence));
    assert!((0.0..=1.0).contains(&affect.arousal));
    assert!(affect.memory_weight <= 1.0);
    assert_eq!(affect.drive_tag, "survival");
}
