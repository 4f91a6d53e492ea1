//! LLM Client — the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! All model interactions go through `TextGenerator`, which `GeminiClient`
//! implements for production and `testing::StubGenerator` for tests.
//!
//! One attempt per call. Retry policy belongs to the caller.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Config, ConfigError};

pub mod prompts;
#[cfg(test)]
pub mod testing;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed API response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Prompt blocked by upstream: {reason}")]
    Blocked { reason: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// A single generation call: the user prompt plus an optional system instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// The upstream seam. Implementations send one request and return the raw
/// text completion.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<SystemInstruction<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// Concatenates the text parts of the first candidate.
    fn into_text(self) -> Result<String, LlmError> {
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(match self.prompt_feedback.and_then(|f| f.block_reason) {
                Some(reason) => LlmError::Blocked { reason },
                None => LlmError::EmptyContent,
            });
        };

        let text: String = candidate
            .content
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|p| p.text)
            .collect();

        if text.trim().is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }
}

/// Upstream message from a non-2xx body: `error.message` when the body is a
/// Gemini error object, the raw body otherwise.
fn api_error_message(raw: String) -> String {
    serde_json::from_str::<GeminiError>(&raw)
        .map(|e| e.error.message)
        .unwrap_or(raw)
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Gemini `generateContent` client. Built once at startup, shared read-only.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        if config.gemini_api_key.trim().is_empty() {
            return Err(ConfigError::Missing {
                key: "GEMINI_API_KEY".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(config.llm_timeout)
            .build()
            .map_err(|e| ConfigError::Invalid {
                key: "LLM_TIMEOUT_SECS".to_string(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            endpoint: format!(
                "{}/models/{}:generateContent",
                config.gemini_api_base, config.gemini_model
            ),
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part {
                    text: &request.prompt,
                }],
            }],
            system_instruction: request
                .system_instruction
                .as_deref()
                .map(|text| SystemInstruction {
                    parts: vec![Part { text }],
                }),
        };

        debug!(
            "Gemini call: model={}, prompt_chars={}",
            self.model,
            request.prompt.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!("Gemini transport failure: {e}");
                LlmError::Http(e)
            })?;

        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(raw);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&raw)?;
        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={}, candidate_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed.into_text()
    }

    fn model(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_body_includes_system_instruction() {
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: "hello" }],
            }],
            system_instruction: Some(SystemInstruction {
                parts: vec![Part { text: "be brief" }],
            }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "systemInstruction": {"parts": [{"text": "be brief"}]}
            })
        );
    }

    #[test]
    fn test_request_body_omits_absent_system_instruction() {
        let body = GenerateContentRequest {
            contents: vec![],
            system_instruction: None,
        };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_text_joins_parts() {
        let response = decode(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "{\"a\":"}, {"text": "1}"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 10, "candidatesTokenCount": 4}
        }));
        assert_eq!(response.into_text().unwrap(), "{\"a\":1}");
    }

    #[test]
    fn test_blocked_prompt_reports_reason() {
        let response = decode(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }));
        match response.into_text() {
            Err(LlmError::Blocked { reason }) => assert_eq!(reason, "SAFETY"),
            other => panic!("expected Blocked, got {other:?}"),
        }
    }

    #[test]
    fn test_candidate_without_text_is_empty_content() {
        let response = decode(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }));
        assert!(matches!(response.into_text(), Err(LlmError::EmptyContent)));
    }

    #[test]
    fn test_api_error_message_from_gemini_body() {
        let body = json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        });
        assert_eq!(
            api_error_message(body.to_string()),
            "API key not valid. Please pass a valid API key."
        );
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        let raw = "<html><body>502 Bad Gateway</body></html>".to_string();
        assert_eq!(api_error_message(raw.clone()), raw);
        assert_eq!(api_error_message(r#"{"detail": "nope"}"#.to_string()), r#"{"detail": "nope"}"#);
    }

    #[test]
    fn test_from_config_builds_endpoint() {
        let config = Config::from_lookup(|key| match key {
            "GEMINI_API_KEY" => Some("secret".to_string()),
            "GEMINI_API_BASE" => Some("http://localhost:1234/v1beta".to_string()),
            _ => None,
        })
        .unwrap();
        let client = GeminiClient::from_config(&config).unwrap();
        assert_eq!(
            client.endpoint,
            "http://localhost:1234/v1beta/models/gemini-1.5-pro:generateContent"
        );
        assert_eq!(client.model(), "gemini-1.5-pro");
    }

    #[test]
    fn test_generation_request_builder() {
        let request = GenerationRequest::new("p").with_system_instruction("s");
        assert_eq!(request.prompt, "p");
        assert_eq!(request.system_instruction.as_deref(), Some("s"));
    }
}
