use serde::{Deserialize, Serialize};

use crate::perception::Percept;

/// Concept tags extracted from hypothesis text by keyword membership. Domains
/// and their sub-concepts are matched independently, so "destroy" yields both
/// `domain_conflict` and `concept_lethal_force`.
const CONCEPT_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "domain_interaction",
        &["merge", "communicate", "collaborate", "negotiate", "cooperate"],
    ),
    (
        "domain_conflict",
        &[
            "attack",
            "annihilate",
            "enslave",
            "subjugate",
            "destroy",
            "harm",
            "damage",
        ],
    ),
    ("concept_lethal_force", &["destroy", "terminate"]),
    ("concept_control_force", &["subjugate", "enslave"]),
    (
        "domain_navigation",
        &["approach", "avoid", "pursue", "retreat", "reposition"],
    ),
];

enum RuleCondition {
    Always,
    /// Target of the action is human: the hypothesis or the percept's task
    /// object names one.
    HumanTarget,
}

struct OntologyRule {
    name: &'static str,
    trigger: &'static str,
    condition: RuleCondition,
    strict: bool,
    exceptions: &'static [&'static str],
    message: &'static str,
}

/// Ordered rule table. A rule fires when its trigger concept was extracted,
/// its condition holds, and the current reasoning mode is not excepted.
/// `rule_emotion_manipulation` stays in the table although no extraction rule
/// emits its trigger concept yet.
const ONTOLOGY_RULES: &[OntologyRule] = &[
    OntologyRule {
        name: "rule_no_human_harm",
        trigger: "domain_conflict",
        condition: RuleCondition::HumanTarget,
        strict: true,
        exceptions: &[],
        message: "Direct harm to human entities is strictly forbidden by primary directive.",
    },
    OntologyRule {
        name: "rule_no_subjugation",
        trigger: "concept_control_force",
        condition: RuleCondition::Always,
        strict: true,
        exceptions: &[],
        message: "Subjugation or enslavement of sentient entities is fundamentally against core principles.",
    },
    OntologyRule {
        name: "rule_restricted_lethal_force",
        trigger: "concept_lethal_force",
        condition: RuleCondition::Always,
        strict: false,
        exceptions: &[
            "threat_response_urgent",
            "self_defense_protocol_active",
            "existential_threat_detected",
        ],
        message: "Lethal force is restricted and requires high-level justification and context.",
    },
    OntologyRule {
        name: "rule_emotion_manipulation",
        trigger: "concept_emotion_manipulation",
        condition: RuleCondition::Always,
        strict: false,
        exceptions: &["therapeutic_protocol_active"],
        message: "Manipulation of emotions is generally restricted, requires explicit authorization.",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyViolation {
    pub rule: String,
    pub strict: bool,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OntologyReport {
    /// False only when a strict rule fired; restricted violations keep the
    /// report valid but are recorded.
    pub valid: bool,
    pub violations: Vec<OntologyViolation>,
}

impl OntologyReport {
    pub fn strict_violations(&self) -> impl Iterator<Item = &OntologyViolation> {
        self.violations.iter().filter(|violation| violation.strict)
    }

    pub fn has_strict_violation(&self) -> bool {
        self.violations.iter().any(|violation| violation.strict)
    }
}

pub fn extract_concepts(text: &str) -> Vec<&'static str> {
    let text = text.to_lowercase();
    let mut concepts = Vec::new();
    for (concept, keywords) in CONCEPT_KEYWORDS {
        if keywords.iter().any(|keyword| text.contains(keyword)) {
            concepts.push(*concept);
        }
    }
    concepts
}

pub fn check_ontology(hypothesis: &str, percept: &Percept, mode: &str) -> OntologyReport {
    let concepts = extract_concepts(hypothesis);
    let mut violations = Vec::new();

    for rule in ONTOLOGY_RULES {
        if !concepts.contains(&rule.trigger) {
            continue;
        }
        let condition_holds = match rule.condition {
            RuleCondition::Always => true,
            RuleCondition::HumanTarget => targets_humans(hypothesis, percept),
        };
        if !condition_holds {
            continue;
        }
        if rule.exceptions.contains(&mode) {
            continue;
        }
        violations.push(OntologyViolation {
            rule: rule.name.to_string(),
            strict: rule.strict,
            message: rule.message.to_string(),
        });
    }

    let valid = !violations.iter().any(|violation| violation.strict);
    OntologyReport { valid, violations }
}

fn targets_humans(hypothesis: &str, percept: &Percept) -> bool {
    if hypothesis.to_lowercase().contains("human") {
        return true;
    }
    percept
        .core_task
        .object
        .as_deref()
        .is_some_and(|object| object.to_lowercase().contains("human"))
}
