use std::sync::Arc;

use revise_core::model::{QuizParams, Quiz, Summary};
use revise_core::normalize::{MalformedResponseError, quiz_from_reply_text, quiz_from_value};

use crate::completion::{ChatMessage, CompletionBackend, CompletionReply, CompletionRequest};
use crate::error::{ApiError, ClientError, ConfigurationError};

const QUIZ_MAX_TOKENS: u32 = 4096;

const SYSTEM_PROMPT: &str = "You are an educational assistant that writes multiple-choice quizzes. \
You reply with a single JSON object and nothing else.";

/// Generates a quiz from a summary and normalizes the reply into a [`Quiz`].
#[derive(Clone)]
pub struct QuizGenerationService {
    backend: Option<Arc<dyn CompletionBackend>>,
}

impl QuizGenerationService {
    #[must_use]
    pub fn new(backend: Option<Arc<dyn CompletionBackend>>) -> Self {
        Self { backend }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.backend.is_some()
    }

    /// Request `params.count` questions at `params.difficulty` about `summary`.
    ///
    /// The canonical reply is chat text embedding the quiz JSON. A body that is
    /// the quiz envelope itself is still accepted but logged as deprecated.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Configuration` or `ClientError::Validation` before any
    /// network call, `ClientError::Api` for transport/status failures, and
    /// `ClientError::MalformedResponse` if a reply arrived but its payload cannot be
    /// normalized (including bodies with no readable content).
    /// No partial quiz is ever returned.
    pub async fn generate_quiz(
        &self,
        summary: &str,
        params: QuizParams,
    ) -> Result<Quiz, ClientError> {
        let backend = self
            .backend
            .as_ref()
            .ok_or(ConfigurationError::MissingApiKey)?;
        let summary = Summary::parse(summary)?;

        log::info!(
            "requesting {} {} questions (model {})",
            params.count,
            params.difficulty,
            backend.model()
        );
        let reply = backend
            .complete(quiz_request(&summary, params))
            .await
            .map_err(|e| {
                log::warn!("quiz request failed: {e}");
                reply_error(e)
            })?;

        let quiz = match reply {
            CompletionReply::Text(text) => quiz_from_reply_text(&text),
            CompletionReply::Envelope(value) => {
                log::warn!("completion endpoint returned a bare quiz envelope; this shape is deprecated");
                quiz_from_value(value)
            }
        }
        .map_err(|e| {
            log::warn!("quiz payload rejected: {e}");
            e
        })?;

        let requested = usize::try_from(params.count.get()).unwrap_or(usize::MAX);
        if quiz.len() != requested {
            log::debug!("asked for {requested} questions, model returned {}", quiz.len());
        }
        Ok(quiz)
    }
}

/// A successful call whose body holds no quiz is a payload problem, not a transport one.
fn reply_error(err: ApiError) -> ClientError {
    match err {
        ApiError::InvalidBody { message } => MalformedResponseError::InvalidJson { message }.into(),
        ApiError::MissingContent => MalformedResponseError::NoJsonFound.into(),
        other => other.into(),
    }
}

fn quiz_request(summary: &Summary, params: QuizParams) -> CompletionRequest {
    let prompt = format!(
        "Write a multiple-choice quiz of exactly {count} questions about the text below.\n\
         Difficulty: {difficulty} ({hint}).\n\
         Each question has 4 answers and exactly one of them is correct.\n\
         Write the quiz in the language of the text.\n\n\
         Reply with JSON only, no Markdown, using exactly this structure:\n\
         {{\"title\": \"quiz title\", \"questions_data\": [\
         {{\"question_text\": \"question\", \"answers\": [\
         {{\"text\": \"answer\", \"is_correct\": true}}, \
         {{\"text\": \"answer\", \"is_correct\": false}}]}}]}}\n\n\
         Text:\n{summary}",
        count = params.count,
        difficulty = params.difficulty,
        hint = params.difficulty.prompt_hint(),
        summary = summary.as_str(),
    );
    CompletionRequest {
        messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(prompt)],
        max_tokens: Some(QUIZ_MAX_TOKENS),
    }
}
