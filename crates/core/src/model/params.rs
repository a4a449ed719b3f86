use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Caller-supplied input rejected before any remote call is made.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("text to summarize cannot be empty")]
    EmptyText,

    #[error("text is too long to summarize ({len} characters, max {max})")]
    TextTooLong { len: usize, max: usize },

    #[error("summary cannot be empty")]
    EmptySummary,

    #[error("question count must be between {min} and {max}, got {got}")]
    QuestionCountOutOfRange { got: u32, min: u32, max: u32 },

    #[error("unknown difficulty: {raw}")]
    UnknownDifficulty { raw: String },
}

//
// ─── QUESTION COUNT ────────────────────────────────────────────────────────────
//

/// Number of questions to request for a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QuestionCount(u32);

impl QuestionCount {
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 15;
    pub const DEFAULT: u32 = 5;

    /// # Errors
    ///
    /// Returns `ValidationError::QuestionCountOutOfRange` outside `MIN..=MAX`.
    pub fn new(count: u32) -> Result<Self, ValidationError> {
        if !(Self::MIN..=Self::MAX).contains(&count) {
            return Err(ValidationError::QuestionCountOutOfRange {
                got: count,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(count))
    }

    /// Clamp an arbitrary user input into the accepted range.
    #[must_use]
    pub fn clamped(count: i64) -> Self {
        let clamped = count.clamp(i64::from(Self::MIN), i64::from(Self::MAX));
        Self(u32::try_from(clamped).unwrap_or(Self::DEFAULT))
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for QuestionCount {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl fmt::Display for QuestionCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Human label for buttons and headings.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    /// How the level is described to the model when asking for questions.
    #[must_use]
    pub fn prompt_hint(self) -> &'static str {
        match self {
            Difficulty::Easy => "basic recall of the main facts stated in the text",
            Difficulty::Medium => "understanding of the key concepts and how they relate",
            Difficulty::Hard => "advanced reasoning, application and subtle distinctions",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ValidationError::UnknownDifficulty { raw: s.to_string() }),
        }
    }
}

/// Parameters for one quiz generation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizParams {
    pub count: QuestionCount,
    pub difficulty: Difficulty,
}

impl QuizParams {
    #[must_use]
    pub fn new(count: QuestionCount, difficulty: Difficulty) -> Self {
        Self { count, difficulty }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_count_accepts_bounds() {
        assert_eq!(QuestionCount::new(3).unwrap().get(), 3);
        assert_eq!(QuestionCount::new(15).unwrap().get(), 15);
    }

    #[test]
    fn question_count_rejects_out_of_range() {
        let err = QuestionCount::new(2).unwrap_err();
        assert_eq!(
            err,
            ValidationError::QuestionCountOutOfRange {
                got: 2,
                min: 3,
                max: 15
            }
        );
        assert!(QuestionCount::new(16).is_err());
    }

    #[test]
    fn question_count_clamps_user_input() {
        assert_eq!(QuestionCount::clamped(-4).get(), 3);
        assert_eq!(QuestionCount::clamped(7).get(), 7);
        assert_eq!(QuestionCount::clamped(400).get(), 15);
    }

    #[test]
    fn difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert_eq!(" easy ".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert!(matches!(
            "extreme".parse::<Difficulty>(),
            Err(ValidationError::UnknownDifficulty { .. })
        ));
    }

    #[test]
    fn defaults_match_generator_form() {
        let params = QuizParams::default();
        assert_eq!(params.count.get(), 5);
        assert_eq!(params.difficulty, Difficulty::Medium);
    }
}
