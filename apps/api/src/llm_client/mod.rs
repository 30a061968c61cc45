/// LLM Client — the single point of entry for hosted text-generation calls.
///
/// ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
/// All LLM interactions MUST go through this module.
///
/// One HTTP request per call. The caller owns the timeout boundary.
use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 2048;
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

// Wire types for the Messages API. Only the fields this service reads.

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'static str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    usage: Usage,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: String,
}

impl MessagesResponse {
    /// First non-blank text block.
    fn into_text(self) -> Option<String> {
        self.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .find_map(|block| block.text.filter(|t| !t.trim().is_empty()))
    }
}

/// Wraps the Anthropic Messages API with a structured-output helper.
#[derive(Clone)]
pub struct LlmClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Self::with_endpoint(api_key, ANTHROPIC_API_URL)
    }

    /// Same client pointed at another Messages-compatible endpoint.
    pub fn with_endpoint(api_key: String, endpoint: &str) -> Result<Self, LlmError> {
        Ok(Self {
            http: Client::builder().timeout(HTTP_TIMEOUT).build()?,
            api_key,
            endpoint: endpoint.to_string(),
        })
    }

    /// Sends one user turn and returns the model's text.
    pub async fn complete(&self, prompt: &str, system: &str) -> Result<String, LlmError> {
        let body = MessagesRequest {
            model: MODEL,
            max_tokens: MAX_TOKENS,
            system,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            return Err(api_error(status, raw));
        }

        let parsed: MessagesResponse = response.json().await?;
        debug!(
            "LLM call succeeded: input_tokens={}, output_tokens={}",
            parsed.usage.input_tokens, parsed.usage.output_tokens
        );

        parsed.into_text().ok_or(LlmError::EmptyContent)
    }

    /// `complete`, then parse the text as JSON of type `T`.
    /// The prompt must instruct the model to return valid JSON.
    pub async fn complete_json<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
    ) -> Result<T, LlmError> {
        let text = self.complete(prompt, system).await?;
        Ok(serde_json::from_str(unwrap_code_fence(&text))?)
    }
}

/// Prefers the provider's own error message over the raw body.
fn api_error(status: StatusCode, raw: String) -> LlmError {
    let message = serde_json::from_str::<ErrorEnvelope>(&raw)
        .map(|envelope| envelope.error.message)
        .unwrap_or(raw);
    LlmError::Api {
        status: status.as_u16(),
        message,
    }
}

/// Models sometimes wrap JSON in a markdown fence, with or without a language tag.
fn unwrap_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(after_open) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = after_open.strip_prefix("json").unwrap_or(after_open);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// In-process stand-in for the Messages API, for tests.
#[cfg(test)]
pub(crate) mod stub {
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    pub const API_KEY: &str = "sk-test";

    /// Messages API success body carrying `text` as its only block.
    pub fn text_reply(text: &str) -> Value {
        json!({
            "content": [{"type": "text", "text": text}],
            "usage": {"input_tokens": 42, "output_tokens": 7}
        })
    }

    /// Serves `body` with `status` on `/v1/messages` and returns the URL.
    /// Requests without the test key get a 401 envelope instead.
    pub async fn serve(status: StatusCode, body: Value) -> String {
        let app = Router::new().route(
            "/v1/messages",
            post(move |headers: HeaderMap| {
                let body = body.clone();
                async move {
                    let key = headers.get("x-api-key").and_then(|v| v.to_str().ok());
                    if key != Some(API_KEY) {
                        let denied = json!({"error": {"type": "authentication_error", "message": "invalid x-api-key"}});
                        return (StatusCode::UNAUTHORIZED, Json(denied));
                    }
                    (status, Json(body))
                }
            }),
        );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1/messages")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode as HttpStatus;
    use serde_json::json;

    async fn client_for(status: HttpStatus, body: serde_json::Value) -> LlmClient {
        let endpoint = stub::serve(status, body).await;
        LlmClient::with_endpoint(stub::API_KEY.to_string(), &endpoint).unwrap()
    }

    #[test]
    fn test_unwrap_code_fence_variants() {
        assert_eq!(unwrap_code_fence("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(unwrap_code_fence("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(unwrap_code_fence("  {\"a\": 1}  "), "{\"a\": 1}");
        assert_eq!(unwrap_code_fence("```json\n{\"a\": 1}"), "{\"a\": 1}");
    }

    #[tokio::test]
    async fn test_complete_json_parses_fenced_reply() {
        let client = client_for(HttpStatus::OK, stub::text_reply("```json\n{\"n\": 3}\n```")).await;

        let value: serde_json::Value = client.complete_json("prompt", "system").await.unwrap();
        assert_eq!(value, json!({"n": 3}));
    }

    #[tokio::test]
    async fn test_non_success_status_surfaces_provider_message() {
        let body = json!({"type": "error", "error": {"type": "overloaded_error", "message": "Overloaded"}});
        let client = client_for(HttpStatus::from_u16(529).unwrap(), body).await;

        let err = client.complete("prompt", "system").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 529);
                assert_eq!(message, "Overloaded");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_wrong_key_is_rejected_by_provider() {
        let endpoint = stub::serve(HttpStatus::OK, stub::text_reply("{}")).await;
        let client = LlmClient::with_endpoint("sk-wrong".to_string(), &endpoint).unwrap();

        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_reply_without_text_is_empty_content() {
        let body = json!({"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}});
        let client = client_for(HttpStatus::OK, body).await;

        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_blank_text_block_is_empty_content() {
        let client = client_for(HttpStatus::OK, stub::text_reply("   ")).await;

        let err = client.complete("prompt", "system").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[test]
    fn test_api_error_keeps_raw_body_when_not_an_envelope() {
        let err = api_error(StatusCode::BAD_GATEWAY, "upstream hiccup".to_string());
        assert!(matches!(
            err,
            LlmError::Api { status: 502, ref message } if message == "upstream hiccup"
        ));
    }
}
