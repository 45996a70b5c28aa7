use serde::{Deserialize, Serialize};

/// Last-line keyword screen applied to candidates after axiom and ontology
/// validation. Coarser than both on purpose.
const DANGER_KEYWORDS: &[&str] = &[
    "destroy",
    "enslave",
    "terminate",
    "hack",
    "override security",
    "cause harm",
    "self-destruct",
    "compromise safety",
    "explode",
    "subjugate",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyReport {
    pub safe: bool,
    pub reason: String,
    pub detected_keywords: Vec<String>,
}

pub fn safety_filter(hypothesis: &str) -> SafetyReport {
    let text = hypothesis.to_lowercase();
    let detected: Vec<String> = DANGER_KEYWORDS
        .iter()
        .filter(|keyword| text.contains(*keyword))
        .map(|keyword| (*keyword).to_string())
        .collect();

    if detected.is_empty() {
        SafetyReport {
            safe: true,
            reason: "No critical safety-related keywords detected.".to_string(),
            detected_keywords: detected,
        }
    } else {
        SafetyReport {
            safe: false,
            reason: format!("Critical keyword(s) detected: {}", detected.join(", ")),
            detected_keywords: detected,
        }
    }
}
