use serde::{Deserialize, Serialize};
use validator::Validate;

/// Static disposition values of the agent. Loaded once from config and shared
/// read-only across cycles; every numeric trait lives in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TraitProfile {
    #[serde(default = "default_adaptivity")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub adaptivity: f64,
    #[serde(default = "default_ethics_sensitivity")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub ethics_sensitivity: f64,
    #[serde(default = "default_thinking_style")]
    pub thinking_style: String,
    #[serde(default = "default_curiosity_level")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub curiosity_level: f64,
    #[serde(default = "default_security_priority")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub security_priority: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub risk_aversion: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub empathy_level: f64,
    #[serde(default = "default_novelty_seeking")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub novelty_seeking: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub risk_taking: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub proactiveness: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub efficiency_preference: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub ethical_risk_aversion: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub assertiveness_level: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub transparency_level: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub self_preservation_priority: f64,
    #[serde(default = "default_half")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub epistemic_humility: f64,
}

fn default_adaptivity() -> f64 {
    0.7
}

fn default_ethics_sensitivity() -> f64 {
    0.8
}

fn default_thinking_style() -> String {
    "deductive".to_string()
}

fn default_curiosity_level() -> f64 {
    0.6
}

fn default_security_priority() -> f64 {
    0.4
}

fn default_novelty_seeking() -> f64 {
    0.6
}

fn default_half() -> f64 {
    0.5
}

impl Default for TraitProfile {
    fn default() -> Self {
        Self {
            adaptivity: default_adaptivity(),
            ethics_sensitivity: default_ethics_sensitivity(),
            thinking_style: default_thinking_style(),
            curiosity_level: default_curiosity_level(),
            security_priority: default_security_priority(),
            risk_aversion: default_half(),
            empathy_level: default_half(),
            novelty_seeking: default_novelty_seeking(),
            risk_taking: default_half(),
            proactiveness: default_half(),
            efficiency_preference: default_half(),
            ethical_risk_aversion: default_half(),
            assertiveness_level: default_half(),
            transparency_level: default_half(),
            self_preservation_priority: default_half(),
            epistemic_humility: default_half(),
        }
    }
}

impl TraitProfile {
    pub fn is_deductive(&self) -> bool {
        self.thinking_style.eq_ignore_ascii_case("deductive")
    }
}
