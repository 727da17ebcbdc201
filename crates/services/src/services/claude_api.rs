//! Claude API client used for website generation.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Error)]
pub enum ClaudeApiError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("timeout")]
    Timeout,
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("rate limit exceeded")]
    RateLimited,
    #[error("invalid API key")]
    InvalidApiKey,
    #[error("json error: {0}")]
    Serde(String),
    #[error("unexpected response type from Claude")]
    NoTextContent,
}

/// How a failed call is reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    RateLimited,
    Authentication,
    Other,
}

impl ClaudeApiError {
    /// Classify the failure. Status codes decide first; otherwise the error
    /// body is inspected for rate-limit or key wording.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::RateLimited => FailureKind::RateLimited,
            Self::InvalidApiKey => FailureKind::Authentication,
            Self::Http { status: 403, .. } => FailureKind::Authentication,
            Self::Http { body, .. } => {
                let body = body.to_lowercase();
                if body.contains("rate limit") || body.contains("rate_limit") {
                    FailureKind::RateLimited
                } else if body.contains("api key")
                    || body.contains("api_key")
                    || body.contains("authentication_error")
                {
                    FailureKind::Authentication
                } else {
                    FailureKind::Other
                }
            }
            _ => FailureKind::Other,
        }
    }
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for Claude API
#[derive(Debug, Serialize)]
struct ClaudeRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Content block in response
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ContentBlock {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(other)]
    Other,
}

/// Response from Claude API
#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    pub id: String,
    pub content: Vec<ContentBlock>,
    pub model: String,
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Usage,
}

impl ClaudeResponse {
    /// Extract the text content from the response
    pub fn text(&self) -> Option<&str> {
        self.content.iter().find_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            ContentBlock::Other => None,
        })
    }
}

/// Token usage information
#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
}

/// Claude API client. Built once at start-up and cloned into handlers.
#[derive(Debug, Clone)]
pub struct ClaudeApiClient {
    http: Client,
    api_key: Arc<SecretString>,
    model: String,
    base_url: String,
}

impl ClaudeApiClient {
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Create a new client with the given API key
    pub fn new(api_key: SecretString, model: Option<String>) -> Result<Self, ClaudeApiError> {
        let http = Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .user_agent(concat!("site-forge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClaudeApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            api_key: Arc::new(api_key),
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the client at a different API host (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a single completion request. There is exactly one attempt; the
    /// caller decides whether to try again.
    pub async fn complete(
        &self,
        messages: Vec<Message>,
        system: Option<String>,
        max_tokens: u32,
        temperature: Option<f32>,
    ) -> Result<ClaudeResponse, ClaudeApiError> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens,
            messages,
            system,
            temperature,
        };

        debug!(model = %self.model, max_tokens, ?temperature, "Sending Claude request");

        let res = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", self.api_key.expose_secret())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        match res.status() {
            s if s.is_success() => res
                .json::<ClaudeResponse>()
                .await
                .map_err(|e| ClaudeApiError::Serde(e.to_string())),
            StatusCode::UNAUTHORIZED => Err(ClaudeApiError::InvalidApiKey),
            StatusCode::TOO_MANY_REQUESTS => Err(ClaudeApiError::RateLimited),
            s => {
                let status = s.as_u16();
                let body = res.text().await.unwrap_or_default();
                Err(ClaudeApiError::Http { status, body })
            }
        }
    }
}

fn map_reqwest_error(e: reqwest::Error) -> ClaudeApiError {
    if e.is_timeout() {
        ClaudeApiError::Timeout
    } else {
        ClaudeApiError::Transport(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode as AxumStatus, routing::post};
    use serde_json::json;

    use super::*;

    async fn spawn_api(status: AxumStatus, body: serde_json::Value) -> String {
        let app = Router::new().route(
            "/v1/messages",
            post(move || {
                let body = body.clone();
                async move { (status, Json(body)) }
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client(base_url: &str) -> ClaudeApiClient {
        ClaudeApiClient::new(SecretString::from("test-key".to_string()), None)
            .unwrap()
            .with_base_url(base_url)
    }

    #[test]
    fn classification_by_variant() {
        assert_eq!(ClaudeApiError::RateLimited.kind(), FailureKind::RateLimited);
        assert_eq!(ClaudeApiError::InvalidApiKey.kind(), FailureKind::Authentication);
        assert_eq!(ClaudeApiError::Timeout.kind(), FailureKind::Other);
    }

    #[test]
    fn classification_by_body() {
        let overloaded = ClaudeApiError::Http {
            status: 529,
            body: r#"{"type":"error","error":{"type":"overloaded_error"}}"#.into(),
        };
        assert_eq!(overloaded.kind(), FailureKind::Other);

        let limited = ClaudeApiError::Http {
            status: 400,
            body: "Rate limit reached for requests".into(),
        };
        assert_eq!(limited.kind(), FailureKind::RateLimited);

        let forbidden = ClaudeApiError::Http {
            status: 403,
            body: "permission_error".into(),
        };
        assert_eq!(forbidden.kind(), FailureKind::Authentication);
    }

    #[test]
    fn response_text_skips_non_text_blocks() {
        let response: ClaudeResponse = serde_json::from_value(json!({
            "id": "msg_1",
            "model": DEFAULT_MODEL,
            "stop_reason": "end_turn",
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "hello" }
            ],
            "usage": { "input_tokens": 12, "output_tokens": 3 }
        }))
        .unwrap();

        assert_eq!(response.text(), Some("hello"));
        assert_eq!(response.usage.input_tokens, 12);
    }

    #[test]
    fn request_omits_unset_temperature() {
        let request = ClaudeRequest {
            model: DEFAULT_MODEL,
            max_tokens: 10,
            messages: vec![Message::user("hi")],
            system: None,
            temperature: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("temperature").is_none());
        assert!(value.get("system").is_none());
    }

    #[tokio::test]
    async fn successful_completion() {
        let base = spawn_api(
            AxumStatus::OK,
            json!({
                "id": "msg_1",
                "model": DEFAULT_MODEL,
                "stop_reason": "end_turn",
                "content": [{ "type": "text", "text": "{\"html\":\"\"}" }],
                "usage": { "input_tokens": 100, "output_tokens": 50 }
            }),
        )
        .await;

        let response = client(&base)
            .complete(vec![Message::user("build")], None, 4000, Some(0.7))
            .await
            .unwrap();
        assert_eq!(response.text(), Some("{\"html\":\"\"}"));
        assert_eq!(response.usage.output_tokens, 50);
    }

    #[tokio::test]
    async fn rate_limit_status_maps_to_variant() {
        let base = spawn_api(AxumStatus::TOO_MANY_REQUESTS, json!({ "error": "slow down" })).await;
        let err = client(&base)
            .complete(vec![Message::user("build")], None, 4000, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClaudeApiError::RateLimited));
    }

    #[tokio::test]
    async fn unauthorized_status_maps_to_variant() {
        let base = spawn_api(AxumStatus::UNAUTHORIZED, json!({ "error": "bad key" })).await;
        let err = client(&base)
            .complete(vec![Message::user("build")], None, 4000, None)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Authentication);
    }
}
