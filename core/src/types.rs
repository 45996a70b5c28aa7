use serde::{Deserialize, Serialize};

pub type Tick = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionUrgency {
    Low,
    Medium,
    High,
    Immediate,
}

impl ActionUrgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionUrgency::Low => "low",
            ActionUrgency::Medium => "medium",
            ActionUrgency::High => "high",
            ActionUrgency::Immediate => "immediate",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Pipeline,
    Scenario,
    Reflex,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleMode {
    FastPath,
    FullPath,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Language {
    En,
    Ru,
    #[default]
    Other,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
            Language::Other => "other",
        }
    }
}

/// Boolean context switches read by the appraisal, planning and reflex
/// layers. Missing upstream information maps to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextFlags {
    #[serde(default = "default_true")]
    pub threat_confirmed: bool,
    #[serde(default)]
    pub authorization_received: bool,
    #[serde(default = "default_true")]
    pub communication_channel_available: bool,
    #[serde(default = "default_true")]
    pub system_stable_for_adjustment: bool,
    #[serde(default = "default_true")]
    pub path_clear: bool,
    #[serde(default = "default_true")]
    pub data_sources_available: bool,
    #[serde(default)]
    pub external_alert: bool,
    #[serde(default)]
    pub low_success_rate: bool,
    #[serde(default)]
    pub internal_error: bool,
    #[serde(default)]
    pub violation_imminent: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ContextFlags {
    fn default() -> Self {
        Self {
            threat_confirmed: true,
            authorization_received: false,
            communication_channel_available: true,
            system_stable_for_adjustment: true,
            path_clear: true,
            data_sources_available: true,
            external_alert: false,
            low_success_rate: false,
            internal_error: false,
            violation_imminent: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecipientProfile {
    #[serde(default)]
    pub vulnerability: f64,
    #[serde(default)]
    pub authority: f64,
}

/// Per-cycle situational context threaded through every stage alongside the
/// percept. One value per cycle; stages read, never write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleContext {
    #[serde(default = "default_reasoning_mode")]
    pub reasoning_mode: String,
    #[serde(default)]
    pub flags: ContextFlags,
    #[serde(default)]
    pub distress_signal: f64,
    #[serde(default = "default_ambiguity")]
    pub ambiguity: f64,
    #[serde(default)]
    pub recipient: RecipientProfile,
}

pub fn default_reasoning_mode() -> String {
    "default_exploration".to_string()
}

fn default_ambiguity() -> f64 {
    0.5
}

impl Default for CycleContext {
    fn default() -> Self {
        Self {
            reasoning_mode: default_reasoning_mode(),
            flags: ContextFlags::default(),
            distress_signal: 0.0,
            ambiguity: default_ambiguity(),
            recipient: RecipientProfile::default(),
        }
    }
}

pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
