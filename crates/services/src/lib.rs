#![forbid(unsafe_code)]

pub mod app_services;
pub mod completion;
pub mod config;
pub mod document;
pub mod error;
pub mod quiz_service;
pub mod summary_service;

pub use reqwest::StatusCode;
pub use revise_core::Clock;

pub use app_services::AppServices;
pub use completion::{
    ChatMessage, CompletionBackend, CompletionReply, CompletionRequest, HttpCompletionBackend,
};
pub use config::AiConfig;
pub use document::{DocumentKind, LoadedDocument, load_document};
pub use error::{ApiError, ClientError, ConfigurationError, DocumentError};
pub use quiz_service::QuizGenerationService;
pub use summary_service::SummaryService;
