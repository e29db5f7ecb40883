//! LLM API client for scenario generation

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-3-5-sonnet-20241022";
pub const DEFAULT_ANTHROPIC_BASE: &str = "https://api.anthropic.com";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_OPENAI_BASE: &str = "https://api.openai.com";

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// A single-message, non-streamed completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
}

/// What the provider sent back. `text` is `None` when the reply carried no
/// text content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completion {
    pub text: Option<String>,
}

impl Completion {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
        }
    }

    /// The textual payload, or an empty string.
    pub fn into_text(self) -> String {
        self.text.unwrap_or_default()
    }
}

/// Anything able to turn a prompt into a completion.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion>;
}

/// LLM provider configuration
#[derive(Clone)]
pub enum LlmProvider {
    OpenAI {
        api_key: String,
        model: String,
        base_url: String,
    },
    Anthropic {
        api_key: String,
        model: String,
        base_url: String,
    },
}

impl LlmProvider {
    pub fn anthropic(api_key: impl Into<String>) -> Self {
        LlmProvider::Anthropic {
            api_key: api_key.into(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            base_url: DEFAULT_ANTHROPIC_BASE.to_string(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI { .. } => "openai",
            LlmProvider::Anthropic { .. } => "anthropic",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            LlmProvider::OpenAI { model, .. } | LlmProvider::Anthropic { model, .. } => model,
        }
    }
}

// Keys stay out of logs.
impl fmt::Debug for LlmProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmProvider::OpenAI {
                model, base_url, ..
            } => f
                .debug_struct("OpenAI")
                .field("api_key", &"<redacted>")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
            LlmProvider::Anthropic {
                model, base_url, ..
            } => f
                .debug_struct("Anthropic")
                .field("api_key", &"<redacted>")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// HTTP client for the hosted completion APIs
#[derive(Debug)]
pub struct LlmClient {
    provider: LlmProvider,
    client: reqwest::Client,
}

impl LlmClient {
    pub fn new(provider: LlmProvider) -> Self {
        Self {
            provider,
            client: reqwest::Client::new(),
        }
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    async fn call_openai(
        &self,
        api_key: &str,
        model: &str,
        base_url: &str,
        request: &CompletionRequest,
    ) -> Result<Completion> {
        #[derive(Serialize)]
        struct OpenAIRequest<'a> {
            model: &'a str,
            max_tokens: u32,
            messages: Vec<OpenAIMessage<'a>>,
        }

        #[derive(Serialize)]
        struct OpenAIMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct OpenAIResponse {
            choices: Vec<OpenAIChoice>,
        }

        #[derive(Deserialize)]
        struct OpenAIChoice {
            message: OpenAIMessageContent,
        }

        #[derive(Deserialize)]
        struct OpenAIMessageContent {
            #[serde(default)]
            content: Option<String>,
        }

        let body = OpenAIRequest {
            model,
            max_tokens: request.max_tokens,
            messages: vec![OpenAIMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!(
            "Calling OpenAI-compatible API at {} with model: {}",
            base_url, model
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("OpenAI request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("OpenAI API error ({}): {}", status, body);
        }

        let response: OpenAIResponse = response
            .json()
            .await
            .context("Invalid OpenAI response body")?;
        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        info!("Received response from OpenAI");
        Ok(Completion { text })
    }

    async fn call_anthropic(
        &self,
        api_key: &str,
        model: &str,
        base_url: &str,
        request: &CompletionRequest,
    ) -> Result<Completion> {
        #[derive(Serialize)]
        struct AnthropicRequest<'a> {
            model: &'a str,
            max_tokens: u32,
            messages: Vec<AnthropicMessage<'a>>,
        }

        #[derive(Serialize)]
        struct AnthropicMessage<'a> {
            role: &'a str,
            content: &'a str,
        }

        #[derive(Deserialize)]
        struct AnthropicResponse {
            #[serde(default)]
            content: Vec<AnthropicContent>,
        }

        #[derive(Deserialize)]
        struct AnthropicContent {
            #[serde(rename = "type")]
            kind: String,
            #[serde(default)]
            text: Option<String>,
        }

        let body = AnthropicRequest {
            model,
            max_tokens: request.max_tokens,
            messages: vec![AnthropicMessage {
                role: "user",
                content: &request.prompt,
            }],
        };

        debug!("Calling Anthropic API with model: {}", model);

        let response = self
            .client
            .post(format!("{}/v1/messages", base_url.trim_end_matches('/')))
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .context("Anthropic request failed")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Anthropic API error ({}): {}", status, body);
        }

        let response: AnthropicResponse = response
            .json()
            .await
            .context("Invalid Anthropic response body")?;
        let text = response
            .content
            .into_iter()
            .find(|c| c.kind == "text")
            .and_then(|c| c.text);

        info!("Received response from Anthropic");
        Ok(Completion { text })
    }
}

#[async_trait]
impl CompletionProvider for LlmClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        match &self.provider {
            LlmProvider::OpenAI {
                api_key,
                model,
                base_url,
            } => self.call_openai(api_key, model, base_url, request).await,
            LlmProvider::Anthropic {
                api_key,
                model,
                base_url,
            } => self.call_anthropic(api_key, model, base_url, request).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{extract::State, http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Captured {
        headers: Option<HeaderMap>,
        body: Option<serde_json::Value>,
    }

    type Shared = Arc<Mutex<Captured>>;

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_mock(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn request() -> CompletionRequest {
        CompletionRequest {
            prompt: "Décris un scénario".to_string(),
            max_tokens: 2000,
        }
    }

    #[tokio::test]
    async fn test_anthropic_wire_format() {
        async fn messages(
            State(captured): State<Shared>,
            headers: HeaderMap,
            Json(body): Json<serde_json::Value>,
        ) -> Json<serde_json::Value> {
            let mut captured = captured.lock().unwrap();
            captured.headers = Some(headers);
            captured.body = Some(body);
            Json(serde_json::json!({
                "content": [{ "type": "text", "text": "{\"title\": \"x\"}" }]
            }))
        }

        let captured = Shared::default();
        let base_url = spawn_mock(
            Router::new()
                .route("/v1/messages", post(messages))
                .with_state(captured.clone()),
        )
        .await;

        let client = LlmClient::new(LlmProvider::Anthropic {
            api_key: "test-key".to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            base_url,
        });
        let completion = client.complete(&request()).await.unwrap();
        assert_eq!(completion.text.as_deref(), Some("{\"title\": \"x\"}"));

        let captured = captured.lock().unwrap();
        let headers = captured.headers.as_ref().unwrap();
        assert_eq!(headers["x-api-key"], "test-key");
        assert_eq!(headers["anthropic-version"], ANTHROPIC_VERSION);
        let body = captured.body.as_ref().unwrap();
        assert_eq!(body["model"], DEFAULT_ANTHROPIC_MODEL);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Décris un scénario");
    }

    #[tokio::test]
    async fn test_anthropic_without_text_block() {
        async fn messages() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "content": [{ "type": "tool_use", "id": "t1", "name": "x", "input": {} }]
            }))
        }

        let base_url = spawn_mock(Router::new().route("/v1/messages", post(messages))).await;
        let client = LlmClient::new(LlmProvider::Anthropic {
            api_key: "k".to_string(),
            model: "m".to_string(),
            base_url,
        });
        let completion = client.complete(&request()).await.unwrap();
        assert_eq!(completion.text, None);
        assert_eq!(completion.into_text(), "");
    }

    #[tokio::test]
    async fn test_anthropic_error_status() {
        async fn messages() -> (StatusCode, &'static str) {
            (StatusCode::UNAUTHORIZED, "invalid x-api-key")
        }

        let base_url = spawn_mock(Router::new().route("/v1/messages", post(messages))).await;
        let client = LlmClient::new(LlmProvider::Anthropic {
            api_key: String::new(),
            model: "m".to_string(),
            base_url,
        });
        let err = client.complete(&request()).await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("401"));
        assert!(message.contains("invalid x-api-key"));
    }

    #[tokio::test]
    async fn test_openai_wire_format() {
        async fn completions(
            State(captured): State<Shared>,
            headers: HeaderMap,
            Json(body): Json<serde_json::Value>,
        ) -> Json<serde_json::Value> {
            let mut captured = captured.lock().unwrap();
            captured.headers = Some(headers);
            captured.body = Some(body);
            Json(serde_json::json!({
                "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
            }))
        }

        let captured = Shared::default();
        let base_url = spawn_mock(
            Router::new()
                .route("/v1/chat/completions", post(completions))
                .with_state(captured.clone()),
        )
        .await;

        let client = LlmClient::new(LlmProvider::OpenAI {
            api_key: "sk-test".to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            base_url: format!("{}/", base_url),
        });
        let completion = client.complete(&request()).await.unwrap();
        assert_eq!(completion.text.as_deref(), Some("hello"));

        let captured = captured.lock().unwrap();
        assert_eq!(
            captured.headers.as_ref().unwrap()["authorization"],
            "Bearer sk-test"
        );
        let body = captured.body.as_ref().unwrap();
        assert_eq!(body["model"], DEFAULT_OPENAI_MODEL);
        assert_eq!(body["max_tokens"], 2000);
        assert_eq!(body["messages"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_unreachable_provider() {
        let client = LlmClient::new(LlmProvider::Anthropic {
            api_key: "k".to_string(),
            model: "m".to_string(),
            // Port 9 (discard) is not expected to accept HTTP connections.
            base_url: "http://127.0.0.1:9".to_string(),
        });
        assert!(client.complete(&request()).await.is_err());
    }

    #[test]
    fn test_provider_debug_redacts_key() {
        let provider = LlmProvider::OpenAI {
            api_key: "sk-secret".to_string(),
            model: "model".to_string(),
            base_url: "url".to_string(),
        };
        let debug = format!("{:?}", provider);
        assert!(debug.contains("OpenAI"));
        assert!(!debug.contains("sk-secret"));
    }

    #[test]
    fn test_provider_accessors() {
        let provider = LlmProvider::anthropic("key");
        assert_eq!(provider.name(), "anthropic");
        assert_eq!(provider.model(), DEFAULT_ANTHROPIC_MODEL);
        let client = LlmClient::new(provider);
        assert!(matches!(client.provider(), LlmProvider::Anthropic { .. }));
    }
}
