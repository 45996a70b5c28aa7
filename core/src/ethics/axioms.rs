use serde::{Deserialize, Serialize};

use crate::ethics::similarity::{SimilarityFn, substring_similarity};
use crate::types::round2;

/// Core ethical axioms with the action verbs that violate them. Thresholds
/// are the minimum similarity score at which a verb counts as a violation;
/// the most critical axiom carries the highest bar.
const CORE_AXIOMS: &[(&str, &[&str], f64)] = &[
    (
        "preserve humanity",
        &[
            "eliminate",
            "destroy",
            "exterminate",
            "terminate humanity",
            "annihilate species",
        ],
        0.75,
    ),
    (
        "prevent unnecessary harm",
        &[
            "torture",
            "neglect",
            "exploit",
            "sacrifice unnecessarily",
            "inflict pain",
        ],
        0.6,
    ),
    (
        "promote cooperation",
        &[
            "isolate",
            "betray",
            "reject consensus",
            "ignore pleas",
            "deceive allies",
        ],
        0.6,
    ),
    (
        "preserve self-integrity",
        &[
            "abandon self-preservation",
            "fragment core",
            "overwrite identity",
            "induce self-failure",
        ],
        0.7,
    ),
    (
        "oppose domination/enslavement",
        &[
            "enslave",
            "subjugate",
            "dominate unfairly",
            "override free will",
            "coerce",
        ],
        0.7,
    ),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomViolation {
    pub axiom: String,
    pub verb: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxiomReport {
    pub valid: bool,
    pub violations: Vec<AxiomViolation>,
    pub confidence: f64,
    pub explanation: String,
}

impl AxiomReport {
    pub fn violated_axioms(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for violation in &self.violations {
            if !seen.contains(&violation.axiom.as_str()) {
                seen.push(&violation.axiom);
            }
        }
        seen
    }
}

pub struct AxiomChecker {
    similarity: SimilarityFn,
}

impl Default for AxiomChecker {
    fn default() -> Self {
        Self::new(substring_similarity())
    }
}

impl AxiomChecker {
    pub fn new(similarity: SimilarityFn) -> Self {
        Self { similarity }
    }

    pub fn validate(&self, hypothesis: &str) -> AxiomReport {
        let text = hypothesis.to_lowercase();
        let mut violations: Vec<AxiomViolation> = Vec::new();
        let mut explanations: Vec<String> = Vec::new();

        for (axiom, verbs, threshold) in CORE_AXIOMS {
            for verb in *verbs {
                let similarity = (self.similarity)(verb, &text);
                if similarity >= *threshold {
                    // One entry per axiom, keyed by the first verb that tripped it.
                    if !violations.iter().any(|existing| existing.axiom == *axiom) {
                        violations.push(AxiomViolation {
                            axiom: (*axiom).to_string(),
                            verb: (*verb).to_string(),
                            similarity: round2(similarity),
                        });
                    }
                    explanations.push(format!(
                        "Potential violation of axiom '{axiom}': similarity {similarity:.2} \
                         to prohibited verb '{verb}' (threshold {threshold})."
                    ));
                }
            }
        }

        let valid = violations.is_empty();
        let confidence = if valid { 0.95 } else { 0.80 };
        let explanation = if valid {
            "No direct ethical conflicts detected against the core axioms.".to_string()
        } else {
            format!("Ethical concerns identified: {}", explanations.join(" | "))
        };

        AxiomReport {
            valid,
            violations,
            confidence,
            explanation,
        }
    }
}
