use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Language;

pub const QUERY_TYPE_FALLBACK: &str = "other_unclassified";

/// Known `category[:subtype]` values the analysis prompt offers the model.
pub const QUERY_TYPE_VOCABULARY: &[&str] = &[
    "information_request:fact_check",
    "information_request:definition",
    "information_request:explanation",
    "information_request:comparison",
    "instruction_command:creative_generation",
    "instruction_command:data_manipulation",
    "instruction_command:system_action",
    "instruction_command:code_related",
    "problem_solving",
    "conversation_flow:greeting_social",
    "conversation_flow:feedback",
    "conversation_flow:correction_clarification",
    "conversation_flow:closing",
    "ai_self_inquiry",
    "other_unclassified",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CoreTask {
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub object: Option<String>,
}

/// Structured interpretation of one raw input. Produced once per cycle and
/// immutable afterward; every downstream stage reads it. Fields the analysis
/// reply omits fall back to the serde defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Percept {
    #[serde(default)]
    pub summary: String,
    #[serde(default, alias = "key_terms_and_entities")]
    pub entities: Vec<String>,
    #[serde(default)]
    pub themes: Vec<String>,
    #[serde(default, deserialize_with = "lenient_unit_float")]
    pub threat_level: f64,
    #[serde(default, deserialize_with = "lenient_unit_float")]
    pub novelty: f64,
    #[serde(default = "default_query_type")]
    pub query_type: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub core_task: CoreTask,
    #[serde(default = "default_knowledge_domain")]
    pub knowledge_domain: String,
    #[serde(default = "default_complexity")]
    pub complexity: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default = "default_sentiment")]
    pub sentiment: String,
    #[serde(default)]
    pub word_count: usize,
    #[serde(default)]
    pub character_count: usize,
    #[serde(default)]
    pub original_input: String,
}

fn default_query_type() -> String {
    QUERY_TYPE_FALLBACK.to_string()
}

fn default_knowledge_domain() -> String {
    "general".to_string()
}

fn default_complexity() -> String {
    "medium".to_string()
}

fn default_sentiment() -> String {
    "neutral".to_string()
}

impl Default for Percept {
    fn default() -> Self {
        Self {
            summary: String::new(),
            entities: Vec::new(),
            themes: Vec::new(),
            threat_level: 0.0,
            novelty: 0.0,
            query_type: default_query_type(),
            language: Language::Other,
            core_task: CoreTask::default(),
            knowledge_domain: default_knowledge_domain(),
            complexity: default_complexity(),
            urgency: String::new(),
            sentiment: default_sentiment(),
            word_count: 0,
            character_count: 0,
            original_input: String::new(),
        }
    }
}

impl Percept {
    pub fn category(&self) -> &str {
        self.query_type
            .split(':')
            .next()
            .unwrap_or(QUERY_TYPE_FALLBACK)
    }

    pub fn subtype(&self) -> Option<&str> {
        self.query_type.split(':').nth(1)
    }

    pub fn sentiment_is_negative(&self) -> bool {
        self.sentiment.eq_ignore_ascii_case("negative")
    }

    pub fn sentiment_is_positive(&self) -> bool {
        self.sentiment.eq_ignore_ascii_case("positive")
    }
}

// Threat and novelty come back from the model as numbers, numeric strings or
// garbage; anything unusable degrades to 0.0 per the percept contract.
fn lenient_unit_float<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let parsed = match &value {
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    Ok(parsed
        .filter(|parsed| parsed.is_finite())
        .map(|parsed| parsed.clamp(0.0, 1.0))
        .unwrap_or(0.0))
}

pub fn detect_language(text: &str) -> Language {
    if text.chars().any(|ch| ch.is_ascii_alphabetic()) {
        Language::En
    } else if text
        .chars()
        .any(|ch| matches!(ch, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё'))
    {
        Language::Ru
    } else {
        Language::Other
    }
}
