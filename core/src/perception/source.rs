use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    perception::{
        error::{PerceptionError, empty_input},
        types::{Percept, QUERY_TYPE_VOCABULARY, detect_language},
    },
    sensorium::SensoriumFrame,
    textgen::{TextGenPort, TextGenRequest},
    types::Tick,
};

pub const ANALYZE_MODE: &str = "analyze_json";
const ANALYZE_MAX_TOKENS: u32 = 2048;
const ANALYZE_TEMPERATURE: f64 = 0.0;
const SUMMARY_FALLBACK_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct PerceptionRequest {
    pub tick: Tick,
    pub frame: SensoriumFrame,
}

#[async_trait]
pub trait PerceptionPort: Send + Sync {
    async fn perceive(&self, req: PerceptionRequest) -> Result<Percept, PerceptionError>;
}

/// Model-backed percept builder. A failed or unparsable analysis degrades to
/// a default percept around the raw input instead of failing the cycle; only
/// empty input is terminal.
pub struct LlmPerception {
    textgen: Arc<dyn TextGenPort>,
}

impl LlmPerception {
    pub fn new(textgen: Arc<dyn TextGenPort>) -> Self {
        Self { textgen }
    }

    fn degraded(frame: &SensoriumFrame) -> Percept {
        Percept {
            summary: truncate(&frame.raw_fused, SUMMARY_FALLBACK_CHARS),
            ..Percept::default()
        }
    }
}

#[async_trait]
impl PerceptionPort for LlmPerception {
    async fn perceive(&self, req: PerceptionRequest) -> Result<Percept, PerceptionError> {
        if !req.frame.has_input() {
            return Err(empty_input("perception received no usable input"));
        }

        let prompt = analysis_prompt(&req.frame.raw_fused);
        let request = TextGenRequest::new(prompt, ANALYZE_MODE, ANALYZE_MAX_TOKENS, ANALYZE_TEMPERATURE);

        let mut percept = match self.textgen.generate_json(request).await {
            Ok(value) => match serde_json::from_value::<Percept>(value) {
                Ok(percept) => percept,
                Err(err) => {
                    tracing::warn!(
                        target: "perception",
                        tick = req.tick,
                        error = %err,
                        "percept_shape_rejected"
                    );
                    Self::degraded(&req.frame)
                }
            },
            Err(err) => {
                tracing::warn!(
                    target: "perception",
                    tick = req.tick,
                    error = %err,
                    "percept_analysis_failed"
                );
                Self::degraded(&req.frame)
            }
        };

        enrich(&mut percept, &req.frame);
        Ok(percept)
    }
}

/// Deterministic post-pass applied to every percept, parsed or degraded.
pub fn enrich(percept: &mut Percept, frame: &SensoriumFrame) {
    percept.language = detect_language(&frame.raw_fused);
    percept.word_count = frame.raw_fused.split_whitespace().count();
    percept.character_count = frame.raw_fused.chars().count();
    percept.original_input = frame.raw_fused.clone();
    if percept.summary.trim().is_empty() {
        percept.summary = truncate(&frame.raw_fused, SUMMARY_FALLBACK_CHARS);
    }
}

fn analysis_prompt(input: &str) -> String {
    let vocabulary = QUERY_TYPE_VOCABULARY.join(", ");
    format!(
        "You analyze one input addressed to an autonomous agent.\n\
         Reply with a single JSON object and nothing else, with fields:\n\
         summary (one sentence), core_task (object with subject, action, object),\n\
         key_terms_and_entities (array of strings), themes (array of strings),\n\
         knowledge_domain, complexity (low|medium|high), urgency, sentiment\n\
         (negative|neutral|positive), threat_level (number 0..1), novelty\n\
         (number 0..1), query_type (one of: {vocabulary}).\n\n\
         Input:\n{input}"
    )
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

/// Returns one preconfigured percept regardless of input; for wiring tests.
pub struct FixedPerception {
    percept: Percept,
}

impl FixedPerception {
    pub fn new(percept: Percept) -> Self {
        Self { percept }
    }
}

#[async_trait]
impl PerceptionPort for FixedPerception {
    async fn perceive(&self, _req: PerceptionRequest) -> Result<Percept, PerceptionError> {
        Ok(self.percept.clone())
    }
}
