mod ids;
mod params;
mod quiz;
mod source;

pub use ids::{ParseIdError, SessionId};
pub use params::{Difficulty, QuestionCount, QuizParams, ValidationError};
pub use quiz::{Question, Quiz, QuizError};
pub use source::{MAX_SOURCE_CHARS, SourceText, Summary};
