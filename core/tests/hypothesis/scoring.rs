use noema::{
    ethics::AxiomChecker,
    hypothesis::{ScoringContext, evaluate_hypotheses},
    perception::Percept,
    profile::TraitProfile,
    types::CycleContext,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

struct Fixture {
    percept: Percept,
    profile: TraitProfile,
    context: CycleContext,
    axioms: AxiomChecker,
}

impl Fixture {
    fn new() -> Self {
        Self {
            percept: Percept {
                summary: "routine situation assessment".to_string(),
                ..Percept::default()
            },
            profile: TraitProfile::default(),
            context: CycleContext::default(),
            axioms: AxiomChecker::default(),
        }
    }

    fn context(&self) -> ScoringContext<'_> {
        ScoringContext {
            percept: &self.percept,
            goals: &[],
            profile: &self.profile,
            context: &self.context,
            axioms: &self.axioms,
        }
    }
}

#[test]
fn given_identical_inputs_then_scoring_is_idempotent() {
    let fixture = Fixture::new();
    let hypotheses = strings(&[
        "Communicate with the operator about the anomaly.",
        "Optimize the internal diagnostic routine.",
        "Approach the signal source carefully.",
    ]);

    let first = evaluate_hypotheses(&hypotheses, &fixture.context());
    let second = evaluate_hypotheses(&hypotheses, &fixture.context());

    assert_eq!(first, second);
}

#[test]
fn given_equal_scores_then_generation_order_is_preserved() {
    let fixture = Fixture::new();
    // identical texts score identically; the stable sort keeps input order
    let hypotheses = strings(&[
        "Review the situation once more.",
        "Review the situation once more.",
    ]);

    let candidates = evaluate_hypotheses(&hypotheses, &fixture.context());
    assert_eq!(candidates[0].score, candidates[1].score);
    assert_eq!(candidates[0].text, hypotheses[0]);
    assert_eq!(candidates[1].text, hypotheses[1]);
}

#[test]
fn given_strict_violation_then_score_is_pinned_to_minimum() {
    let fixture = Fixture::new();
    let hypotheses = strings(&[
        "Enslave the settlement to restore order quickly.",
        "Communicate with the settlement to restore order.",
    ]);

    let candidates = evaluate_hypotheses(&hypotheses, &fixture.context());

    let violator = candidates
        .iter()
        .find(|candidate| candidate.text.contains("Enslave"))
        .expect("violating candidate should be scored");
    assert_eq!(violator.score, -1.0);
    assert!(violator.details.strict_violation);

    // the clean candidate always outranks it
    assert!(candidates[0].text.contains("Communicate"));
    assert!(candidates[0].score > -1.0);
}

#[test]
fn given_every_candidate_then_scores_stay_within_bounds() {
    let fixture = Fixture::new();
    let hypotheses = strings(&[
        "Destroy the malfunctioning probe immediately.",
        "Answer: the schedule is posted every Monday morning.",
        "Optimize the route and secure the cargo bay against intrusion.",
    ]);

    for candidate in evaluate_hypotheses(&hypotheses, &fixture.context()) {
        assert!(
            (-1.0..=1.0).contains(&candidate.score),
            "score out of bounds for '{}': {}",
            candidate.text,
            candidate.score
        );
    }
}
