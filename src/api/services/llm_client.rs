//! LLM text-completion client.
//!
//! The pipeline treats the model as an opaque text-completion oracle:
//! prompt in, text out. The trait seam lets tests substitute a stub.

use super::error::LlmError;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use std::env;
use std::time::Duration;
use tracing::warn;

/// Default request timeout for model calls. The model call is the dominant
/// latency source of the pipeline; the client owns the timeout and surfaces
/// it as a distinguishable error kind rather than hanging.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Opaque text-completion oracle consumed by the pipeline.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Gemini REST API client.
pub struct GeminiClient {
    client: Option<Client>,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client from environment configuration.
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY").ok();
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".to_string());
        let base_url = env::var("GEMINI_API_URL").unwrap_or_else(|_| {
            "https://generativelanguage.googleapis.com/v1beta/models".to_string()
        });

        let client = if api_key.is_some() {
            Client::builder().timeout(REQUEST_TIMEOUT).build().ok()
        } else {
            warn!("Gemini API key not configured");
            None
        };

        Self {
            client,
            api_key,
            model,
            base_url,
        }
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn generate_content(&self, prompt: &str) -> Result<String, LlmError> {
        let (client, api_key) = match (self.client.as_ref(), self.api_key.as_ref()) {
            (Some(c), Some(k)) => (c, k),
            _ => return Err(LlmError::NotConfigured),
        };

        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        let request_body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": { "temperature": 0.3 }
        });

        let response = client
            .post(&url)
            .query(&[("key", api_key.as_str())])
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout
                } else {
                    LlmError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                429 => LlmError::QuotaExceeded,
                code => LlmError::Api { status: code, message },
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| LlmError::Network(e.to_string()))?;

        body.get("candidates")
            .and_then(|c| c.as_array())
            .and_then(|arr| arr.first())
            .and_then(|candidate| candidate.get("content"))
            .and_then(|content| content.get("parts"))
            .and_then(|parts| parts.as_array())
            .and_then(|arr| arr.first())
            .and_then(|part| part.get("text"))
            .and_then(|t| t.as_str())
            .map(|s| s.to_string())
            .ok_or(LlmError::EmptyResponse)
    }
}
