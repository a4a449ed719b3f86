//! Converts the quiz payload returned by the completion API into a [`Quiz`].
//!
//! Expected payload:
//!
//! ```json
//! { "title": "...", "questions_data": [
//!     { "question_text": "...", "answers": [ { "text": "...", "is_correct": true } ] } ] }
//! ```
//!
//! The payload may arrive as the JSON body itself or embedded in a model's text
//! reply (optionally inside a fenced code block). Normalization is fail-fast: a
//! single defective question rejects the whole payload.

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::model::{Question, Quiz, QuizError};

/// Key that identifies a quiz envelope among arbitrary JSON objects.
pub const QUESTIONS_KEY: &str = "questions_data";

const TITLE_KEY: &str = "title";
const CHOICES_KEY: &str = "choices";
const FENCE: &str = "```";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MalformedResponseError {
    #[error("no JSON object found in the model reply")]
    NoJsonFound,

    #[error("quiz payload is not valid JSON: {message}")]
    InvalidJson { message: String },

    #[error("quiz payload has an unexpected shape: {message}")]
    InvalidShape { message: String },

    #[error("quiz payload is missing a title")]
    MissingTitle,

    #[error("quiz payload is missing questions_data")]
    MissingQuestions,

    #[error("question {} has no question_text", .index + 1)]
    MissingQuestionText { index: usize },

    #[error("question {} has no answers", .index + 1)]
    MissingAnswers { index: usize },

    #[error("answer {} of question {} has no text", .answer + 1, .index + 1)]
    MissingAnswerText { index: usize, answer: usize },

    #[error("question {} has no answer marked correct", .index + 1)]
    NoCorrectAnswer { index: usize },

    #[error("normalized quiz is invalid: {0}")]
    Invariant(#[from] QuizError),
}

#[derive(Debug, Deserialize)]
struct RawQuizPayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    questions_data: Option<Vec<RawQuestion>>,
}

#[derive(Debug, Deserialize)]
struct RawQuestion {
    #[serde(default)]
    question_text: Option<String>,
    #[serde(default)]
    answers: Option<Vec<RawAnswer>>,
}

#[derive(Debug, Deserialize)]
struct RawAnswer {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    is_correct: Option<bool>,
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|s| s.trim().is_empty())
}

/// Locate the outermost JSON object in a free-text model reply.
///
/// When the reply contains a Markdown code fence, only the fenced block is searched.
/// Within it, everything from the first `{` to the last `}` is taken.
#[must_use]
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let mut body = reply.trim();
    if let Some(open) = body.find(FENCE) {
        let rest = &body[open + FENCE.len()..];
        // Drop the info string (e.g. `json`) on the opening fence line.
        let rest = rest.split_once('\n').map_or(rest, |(_, tail)| tail);
        body = rest.find(FENCE).map_or(rest, |close| &rest[..close]);
    }

    let start = body.find('{')?;
    let end = body.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&body[start..=end])
}

/// Whether a JSON value looks like a quiz envelope rather than a chat-completion body:
/// an object carrying `title` or `questions_data` and no `choices`.
#[must_use]
pub fn is_quiz_envelope(value: &Value) -> bool {
    value.as_object().is_some_and(|object| {
        !object.contains_key(CHOICES_KEY)
            && (object.contains_key(QUESTIONS_KEY) || object.contains_key(TITLE_KEY))
    })
}

/// Normalize a model's text reply that embeds the quiz payload.
///
/// # Errors
///
/// Returns `MalformedResponseError::NoJsonFound` if no JSON object can be located,
/// `InvalidJson` if it does not parse, or any normalization error.
pub fn quiz_from_reply_text(reply: &str) -> Result<Quiz, MalformedResponseError> {
    let json = extract_json_object(reply).ok_or(MalformedResponseError::NoJsonFound)?;
    let value: Value =
        serde_json::from_str(json).map_err(|e| MalformedResponseError::InvalidJson {
            message: e.to_string(),
        })?;
    quiz_from_value(value)
}

/// Normalize an already-parsed quiz envelope.
///
/// # Errors
///
/// Returns `MalformedResponseError` if the envelope or any question is defective.
pub fn quiz_from_value(value: Value) -> Result<Quiz, MalformedResponseError> {
    let raw: RawQuizPayload =
        serde_json::from_value(value).map_err(|e| MalformedResponseError::InvalidShape {
            message: e.to_string(),
        })?;
    normalize(raw)
}

fn normalize(raw: RawQuizPayload) -> Result<Quiz, MalformedResponseError> {
    if is_blank(raw.title.as_ref()) {
        return Err(MalformedResponseError::MissingTitle);
    }
    let title = raw.title.unwrap_or_default();
    let entries = raw
        .questions_data
        .ok_or(MalformedResponseError::MissingQuestions)?;

    let mut questions = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        questions.push(normalize_question(index, entry)?);
    }

    Ok(Quiz::new(title, questions)?)
}

fn normalize_question(index: usize, entry: RawQuestion) -> Result<Question, MalformedResponseError> {
    if is_blank(entry.question_text.as_ref()) {
        return Err(MalformedResponseError::MissingQuestionText { index });
    }
    let answers = match entry.answers {
        Some(answers) if !answers.is_empty() => answers,
        _ => return Err(MalformedResponseError::MissingAnswers { index }),
    };

    // First flagged answer wins; null or absent flags are false. Never fall back to index 0.
    let correct = answers
        .iter()
        .position(|answer| answer.is_correct == Some(true))
        .ok_or(MalformedResponseError::NoCorrectAnswer { index })?;

    let options = answers
        .into_iter()
        .enumerate()
        .map(|(answer, raw)| {
            raw.text
                .ok_or(MalformedResponseError::MissingAnswerText { index, answer })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let text = entry.question_text.unwrap_or_default();
    Ok(Question::new(text, options, correct)?)
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
