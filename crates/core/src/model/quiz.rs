use serde::Serialize;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz title cannot be empty")]
    EmptyTitle,

    #[error("quiz must contain at least one question")]
    NoQuestions,

    #[error("question text cannot be empty")]
    EmptyQuestionText,

    #[error("question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct answer index {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A multiple-choice question. Option order is fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_answer_index: usize,
}

impl Question {
    /// # Errors
    ///
    /// Returns `QuizError` when the text is blank, fewer than two options are
    /// given, or `correct_answer_index` does not point into `options`.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer_index: usize,
    ) -> Result<Self, QuizError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuizError::EmptyQuestionText);
        }
        if options.len() < 2 {
            return Err(QuizError::TooFewOptions { len: options.len() });
        }
        if correct_answer_index >= options.len() {
            return Err(QuizError::CorrectIndexOutOfRange {
                index: correct_answer_index,
                len: options.len(),
            });
        }
        Ok(Self {
            text,
            options,
            correct_answer_index,
        })
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_answer_index(&self) -> usize {
        self.correct_answer_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_answer_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer_index
    }
}

//
// ─── QUIZ ──────────────────────────────────────────────────────────────────────
//

/// A titled, ordered, non-empty list of questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quiz {
    title: String,
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::EmptyTitle` or `QuizError::NoQuestions`.
    pub fn new(title: impl Into<String>, questions: Vec<Question>) -> Result<Self, QuizError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(QuizError::EmptyTitle);
        }
        if questions.is_empty() {
            return Err(QuizError::NoQuestions);
        }
        Ok(Self { title, questions })
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed quiz; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
