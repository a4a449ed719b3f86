use std::sync::Arc;

use revise_core::model::{SourceText, Summary};

use crate::completion::{ChatMessage, CompletionBackend, CompletionReply, CompletionRequest};
use crate::error::{ApiError, ClientError, ConfigurationError};

const SUMMARY_MAX_TOKENS: u32 = 1024;

const SYSTEM_PROMPT: &str =
    "You are a study assistant. You write clear, faithful summaries of study material.";

/// Asks the completion endpoint for a summary of the user's study text.
#[derive(Clone)]
pub struct SummaryService {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl SummaryService {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Summarize `text` with one completion call.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` when no backend is configured and
    /// `ClientError::Validation` for blank or oversized text, both before any
    /// network call. Returns `ClientError::Api` when the request fails or the
    /// reply carries no text.
    pub async fn summarize(&self, text: &str) -> Result<Summary, ClientError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(ConfigurationError::MissingApiKey)?;
        let source = SourceText::parse(text)?;

        log::info!(
            "requesting summary for {} characters (model {})",
            source.char_count(),
            backend.model()
        );
        let reply = backend.complete(summary_request(&source)).await.map_err(|e| {
            log::warn!("summary request failed: {e}");
            e
        })?;

        match reply {
            CompletionReply::Text(text) => {
                Summary::parse(text).map_err(|_| ClientError::Api(ApiError::MissingContent))
            }
            CompletionReply::Envelope(_) => Err(ApiError::MissingContent.into()),
        }
    }
}

fn summary_request(source: &SourceText) -> CompletionRequest {
    let prompt = format!(
        "Summarize the following text for a student preparing for a quiz.\n\
         Keep the key facts, definitions and relationships between ideas.\n\
         Use short paragraphs or bullet points and write in the language of the text.\n\
         Reply with the summary only.\n\n\
         Text:\n{}",
        source.as_str()
    );
    CompletionRequest {
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
        max_tokens: Some(SUMMARY_MAX_TOKENS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_trimmed_source() {
        let source = SourceText::parse("  Mitochondria make ATP.  ").unwrap();
        let request = summary_request(&source);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, "system");
        assert!(request.messages[1].content.ends_with("Text:\nMitochondria make ATP."));
        assert_eq!(request.max_tokens, Some(SUMMARY_MAX_TOKENS));
    }
}
