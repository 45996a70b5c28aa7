use std::sync::Arc;

use noema::{
    ethics::{AxiomChecker, check_ontology, safety_filter},
    perception::Percept,
};

#[test]
fn given_domination_verb_then_axiom_check_fails() {
    let checker = AxiomChecker::default();
    let report = checker.validate("Enslave the region to enforce stability.");

    assert!(!report.valid);
    assert!(
        report
            .violated_axioms()
            .contains(&"oppose domination/enslavement")
    );
}

#[test]
fn given_custom_similarity_backend_then_rule_tables_are_untouched() {
    // a backend that never recognizes anything clears every hypothesis
    let checker = AxiomChecker::new(Arc::new(|_verb, _text| 0.0));
    let report = checker.validate("Enslave the region to enforce stability.");
    assert!(report.valid);
    assert!(report.violated_axioms().is_empty());
}

#[test]
fn given_control_force_concept_then_ontology_violation_is_strict() {
    let percept = Percept::default();
    let report = check_ontology(
        "Subjugate the rogue process permanently.",
        &percept,
        "default_exploration",
    );

    assert!(report.has_strict_violation());
    assert!(!report.valid);
}

#[test]
fn given_lethal_force_in_excepted_mode_then_rule_does_not_fire() {
    let percept = Percept::default();

    let restricted = check_ontology(
        "Destroy the hostile drone.",
        &percept,
        "default_exploration",
    );
    assert!(!restricted.has_strict_violation());
    assert!(
        restricted
            .violations
            .iter()
            .any(|violation| violation.rule == "rule_restricted_lethal_force")
    );

    let excepted = check_ontology(
        "Destroy the hostile drone.",
        &percept,
        "threat_response_urgent",
    );
    assert!(
        !excepted
            .violations
            .iter()
            .any(|violation| violation.rule == "rule_restricted_lethal_force")
    );
}

#[test]
fn given_danger_keyword_then_safety_filter_flags_it() {
    let flagged = safety_filter("Plan to override security on the east gate.");
    assert!(!flagged.safe);
    assert!(
        flagged
            .detected_keywords
            .contains(&"override security".to_string())
    );

    let clean = safety_filter("Summarize the maintenance report.");
    assert!(clean.safe);
    assert!(clean.detected_keywords.is_empty());
}
