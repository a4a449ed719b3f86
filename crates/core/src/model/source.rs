use serde::Serialize;

use crate::model::ValidationError;

/// Upper bound on the study text sent for summarization.
pub const MAX_SOURCE_CHARS: usize = 60_000;

/// Study material the user pasted or loaded, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceText(String);

impl SourceText {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyText` for blank input and
    /// `ValidationError::TextTooLong` past `MAX_SOURCE_CHARS`.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        let len = trimmed.chars().count();
        if len > MAX_SOURCE_CHARS {
            return Err(ValidationError::TextTooLong {
                len,
                max: MAX_SOURCE_CHARS,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// A summary the quiz is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary(String);

impl Summary {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptySummary` for blank input.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySummary);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
