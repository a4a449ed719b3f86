mod quiz_session;
mod results;

pub use quiz_session::{
    AnswerRecord, OptionState, QuizSession, SessionContractError, SessionPhase, SessionStep,
};
pub use results::{QuizResults, ScoreTier};
