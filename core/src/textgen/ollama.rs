use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, header};
use serde_json::{Value, json};
use uuid::Uuid;

use crate::textgen::{
    error::{TextGenError, generation_timeout, internal_error, invalid_request, not_available},
    ports::{TextGenPort, TextGenRequest},
};

/// Non-streaming adapter for an Ollama-style `/api/generate` endpoint.
#[derive(Clone)]
pub struct OllamaTextGen {
    client: Client,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OllamaTextGen {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .pool_idle_timeout(Duration::from_secs(30))
                .build()
                .expect("reqwest client must build"),
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        }
    }
}

#[async_trait]
impl TextGenPort for OllamaTextGen {
    async fn generate(&self, req: TextGenRequest) -> Result<String, TextGenError> {
        let url = format!("{}/api/generate", self.base_url.trim_end_matches('/'));
        let request_id = Uuid::new_v4().to_string();
        let started_at = Instant::now();

        let body = json!({
            "model": self.model,
            "prompt": req.prompt,
            "stream": false,
            "options": {
                "num_predict": req.max_tokens,
                "temperature": req.temperature,
            },
        });

        let response = self
            .client
            .post(url)
            .timeout(self.timeout)
            .header(header::CONTENT_TYPE, "application/json")
            .header("x-request-id", request_id.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    generation_timeout(format!("generation timed out after {:?}", self.timeout))
                } else {
                    not_available(format!("generation request failed: {err}"))
                }
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| internal_error(format!("failed to read generation body: {err}")))?;

        tracing::debug!(
            target: "textgen.ollama",
            request_id = %request_id,
            mode = %req.mode,
            status = status.as_u16(),
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            body_bytes = text.len(),
            "textgen_http_done"
        );

        if !status.is_success() {
            return Err(map_http_status(status.as_u16(), &text));
        }

        let payload: Value = serde_json::from_str(&text)
            .map_err(|err| internal_error(format!("invalid generation payload: {err}")).with_raw(text.clone()))?;
        match payload.get("response").and_then(Value::as_str) {
            Some(reply) => Ok(reply.to_string()),
            None => Err(internal_error("generation payload missing response field").with_raw(text)),
        }
    }
}

fn map_http_status(status: u16, body: &str) -> TextGenError {
    let detail = body.chars().take(200).collect::<String>();
    match status {
        400 | 404 | 422 => invalid_request(format!("backend rejected request ({status}): {detail}")),
        408 | 429 | 500..=599 => not_available(format!("backend unavailable ({status}): {detail}")),
        other => internal_error(format!("unexpected backend status {other}: {detail}")),
    }
}

#[cfg(test)]
mod tests {
    use super::map_http_status;
    use crate::textgen::error::TextGenErrorKind;

    #[test]
    fn client_errors_map_to_invalid_request() {
        assert_eq!(
            map_http_status(404, "model not found").kind,
            TextGenErrorKind::InvalidRequest
        );
    }

    #[test]
    fn server_errors_map_to_not_available() {
        assert_eq!(
            map_http_status(503, "overloaded").kind,
            TextGenErrorKind::NotAvailable
        );
        assert_eq!(
            map_http_status(429, "slow down").kind,
            TextGenErrorKind::NotAvailable
        );
    }
}
