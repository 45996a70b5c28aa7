use async_trait::async_trait;
use serde_json::Value;

use crate::textgen::{
    error::{TextGenError, not_available},
    parse::extract_json_value,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TextGenRequest {
    pub prompt: String,
    pub mode: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl TextGenRequest {
    pub fn new(
        prompt: impl Into<String>,
        mode: impl Into<String>,
        max_tokens: u32,
        temperature: f64,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            mode: mode.into(),
            max_tokens,
            temperature,
        }
    }
}

/// External text-generation collaborator. Replies carry no format guarantee;
/// every caller parses defensively.
#[async_trait]
pub trait TextGenPort: Send + Sync {
    async fn generate(&self, req: TextGenRequest) -> Result<String, TextGenError>;

    /// Structured variant: same call, then the first balanced JSON object is
    /// extracted from the reply.
    async fn generate_json(&self, req: TextGenRequest) -> Result<Value, TextGenError> {
        let raw = self.generate(req).await?;
        extract_json_value(&raw)
    }
}

#[derive(Default)]
pub struct NoopTextGen;

#[async_trait]
impl TextGenPort for NoopTextGen {
    async fn generate(&self, _req: TextGenRequest) -> Result<String, TextGenError> {
        Err(not_available("no text generation backend configured"))
    }
}
