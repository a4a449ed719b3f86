//! Shared error types for the services crate.

use thiserror::Error;

use revise_core::model::ValidationError;
use revise_core::normalize::MalformedResponseError;

/// Errors emitted while building or reading `AiConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigurationError {
    #[error("AI API key is not configured")]
    MissingApiKey,
    #[error("invalid AI base URL: {raw}")]
    InvalidBaseUrl { raw: String },
    #[error("invalid AI timeout (seconds): {raw}")]
    InvalidTimeout { raw: String },
    #[error("invalid AI temperature: {raw}")]
    InvalidTemperature { raw: String },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Transport-level failures talking to the completion endpoint.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion request failed with status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("completion response is not valid JSON: {message}")]
    InvalidBody { message: String },
    #[error("completion response has no message content")]
    MissingContent,
}

/// Errors emitted by `SummaryService` and `QuizGenerationService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ClientError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    MalformedResponse(#[from] MalformedResponseError),
}

/// Errors emitted while loading a study document from disk.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("unsupported document type: {extension}")]
    Unsupported { extension: String },
    #[error("document is too large ({bytes} bytes, max {max})")]
    TooLarge { bytes: u64, max: u64 },
    #[error("document is not valid UTF-8 text")]
    NotUtf8,
    #[error(transparent)]
    Text(#[from] ValidationError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
