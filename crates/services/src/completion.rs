use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use revise_core::normalize::is_quiz_envelope;

use crate::config::AiConfig;
use crate::error::{ApiError, ConfigurationError};

/// Longest error body kept in `ApiError::Status`.
const ERROR_BODY_EXCERPT_CHARS: usize = 300;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

/// One chat-completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub messages: Vec<ChatMessage>,
    pub max_tokens: Option<u32>,
}

/// What came back from the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionReply {
    /// `choices[0].message.content` of a chat-completion body.
    Text(String),
    /// A body that is itself a quiz envelope (legacy shape).
    Envelope(Value),
}

/// A single-shot completion call. Implementations never retry.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Model name used for requests, for logging.
    fn model(&self) -> &str;

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ApiError>;
}

/// `CompletionBackend` over an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Clone)]
pub struct HttpCompletionBackend {
    client: Client,
    config: AiConfig,
}

impl HttpCompletionBackend {
    /// # Errors
    ///
    /// Returns `ConfigurationError::HttpClient` if the HTTP client cannot be built.
    pub fn new(config: AiConfig) -> Result<Self, ConfigurationError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigurationError::HttpClient(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &AiConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionBackend for HttpCompletionBackend {
    fn model(&self) -> &str {
        &self.config.model
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionReply, ApiError> {
        let url = self.config.endpoint();
        let payload = ChatRequest {
            model: self.config.model.clone(),
            messages: request.messages,
            temperature: self.config.temperature,
            max_tokens: request.max_tokens,
        };
        log::debug!("POST {url} (model {})", payload.model);

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("completion request failed with status {status}");
            return Err(ApiError::Status {
                status,
                body: excerpt(&body),
            });
        }

        let body = response.text().await?;
        decode_reply(&body)
    }
}

/// Decode a successful response body.
///
/// # Errors
///
/// Returns `ApiError::InvalidBody` if the body is not JSON, and
/// `ApiError::MissingContent` if neither a non-blank message nor a quiz envelope is present.
pub fn decode_reply(body: &str) -> Result<CompletionReply, ApiError> {
    let value: Value = serde_json::from_str(body).map_err(|e| ApiError::InvalidBody {
        message: e.to_string(),
    })?;

    if is_quiz_envelope(&value) {
        return Ok(CompletionReply::Envelope(value));
    }

    let parsed: ChatResponse = serde_json::from_value(value).map_err(|e| ApiError::InvalidBody {
        message: e.to_string(),
    })?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
        .ok_or(ApiError::MissingContent)?;

    Ok(CompletionReply::Text(content))
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= ERROR_BODY_EXCERPT_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(ERROR_BODY_EXCERPT_CHARS).collect();
    cut.push('…');
    cut
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
