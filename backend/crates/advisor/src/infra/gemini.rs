//! Gemini Text Generator
//!
//! `POST {base}/v1beta/models/{model}:generateContent?key={api_key}`

use std::time::Duration;

use platform::config::{env_opt, env_or, env_secs};
use reqwest::Client;
use resilience::error::{UpstreamError, UpstreamResult};
use serde::{Deserialize, Serialize};

use super::{ensure_success, request_error};
use crate::domain::models::ChatRole;
use crate::domain::upstream::{TextGenerator, TextPrompt};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

#[derive(Clone)]
pub struct GeminiConfig {
    /// Without a key every call fails with `UpstreamError::Unavailable`
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl GeminiConfig {
    /// Read `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL` and `UPSTREAM_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: env_opt("GEMINI_API_KEY"),
            model: env_or("GEMINI_MODEL", defaults.model),
            base_url: env_or("GEMINI_BASE_URL", defaults.base_url),
            timeout: env_secs("UPSTREAM_TIMEOUT_SECS", defaults.timeout),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<ChatRole>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a TextPrompt) -> Self {
        Self {
            contents: prompt
                .contents
                .iter()
                .map(|turn| Content {
                    role: Some(turn.role),
                    parts: vec![Part { text: &turn.text }],
                })
                .collect(),
            system_instruction: prompt.system_instruction.as_deref().map(|text| Content {
                role: None,
                parts: vec![Part { text }],
            }),
        }
    }
}

/// Text of the first candidate; an empty completion is a decode error
fn completion_text(response: GenerateResponse) -> UpstreamResult<String> {
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| content.parts.into_iter().map(|part| part.text).collect())
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(UpstreamError::Decode("empty completion".to_string()));
    }
    Ok(text)
}

/// Gemini `generateContent` client
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &TextPrompt) -> UpstreamResult<String> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(UpstreamError::Unavailable(
                "GEMINI_API_KEY is not configured".to_string(),
            ));
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| request_error(e, self.config.timeout))?;

        let body: GenerateResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| request_error(e, self.config.timeout))?;

        completion_text(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_body_layout() {
        let prompt = TextPrompt::user("How much should I save?").with_system_instruction("Be brief.");
        let body = serde_json::to_value(GenerateRequest::from_prompt(&prompt)).unwrap();
        assert_eq!(
            body,
            json!({
                "contents": [{"role": "user", "parts": [{"text": "How much should I save?"}]}],
                "systemInstruction": {"parts": [{"text": "Be brief."}]}
            })
        );
    }

    #[test]
    fn test_request_without_system_instruction() {
        let body = serde_json::to_value(GenerateRequest::from_prompt(&TextPrompt::user("hi"))).unwrap();
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_completion_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Save "}, {"text": "20%."}]},
                "finishReason": "STOP"
            }]
        }))
        .unwrap();
        assert_eq!(completion_text(response).unwrap(), "Save 20%.");
    }

    #[test]
    fn test_blocked_completion_is_decode_error() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();
        assert!(matches!(completion_text(response), Err(UpstreamError::Decode(_))));
    }

    #[tokio::test]
    async fn test_missing_key_is_unavailable() {
        let client = GeminiClient::new(GeminiConfig::default()).unwrap();
        let result = client.generate(&TextPrompt::user("hi")).await;
        assert!(matches!(result, Err(UpstreamError::Unavailable(_))));
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = GeminiConfig {
            api_key: Some("AIza-secret".to_string()),
            ..GeminiConfig::default()
        };
        assert!(!format!("{config:?}").contains("secret"));
    }
}
