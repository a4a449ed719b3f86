use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::model::{Question, Quiz, SessionId};
use crate::session::results::{QuizResults, ScoreTier};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// An engine operation was called in a state that forbids it.
///
/// The UI is expected to disable these actions, so seeing one means the caller's
/// gating is wrong.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionContractError {
    #[error("current question is already answered")]
    AlreadyAnswered,

    #[error("current question has not been answered yet")]
    NotAnswered,

    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("quiz session already completed")]
    Completed,

    #[error("quiz session is not completed yet")]
    NotCompleted,
}

//
// ─── STATE TYPES ───────────────────────────────────────────────────────────────
//

/// One answered question, in answer order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_text: String,
    pub selected_index: usize,
    pub was_correct: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the user to pick an option.
    InProgress,
    /// Option locked in; waiting for `advance`.
    Answered,
    Completed,
}

/// Outcome of `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStep {
    Next { index: usize },
    Completed,
}

/// How an option of the current question should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionState {
    Neutral,
    SelectedCorrect,
    SelectedIncorrect,
    /// The correct option, shown after the user picked a different one.
    RevealedCorrect,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Progression and scoring over one quiz.
///
/// A session only changes through [`QuizSession::select_option`] and
/// [`QuizSession::advance`]. Restarting means building a new session.
#[derive(Clone)]
pub struct QuizSession {
    id: SessionId,
    quiz: Arc<Quiz>,
    current_index: usize,
    selected_option: Option<usize>,
    answered: bool,
    score: u32,
    history: Vec<AnswerRecord>,
    completed: bool,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session on the first question.
    ///
    /// `started_at` should come from the caller's clock to keep time deterministic.
    #[must_use]
    pub fn new(quiz: Arc<Quiz>, started_at: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            quiz,
            current_index: 0,
            selected_option: None,
            answered: false,
            score: 0,
            history: Vec::new(),
            completed: false,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn quiz(&self) -> &Arc<Quiz> {
        &self.quiz
    }

    #[must_use]
    pub fn title(&self) -> &str {
        self.quiz.title()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn selected_option(&self) -> Option<usize> {
        self.selected_option
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.quiz.len()
    }

    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.completed {
            SessionPhase::Completed
        } else if self.answered {
            SessionPhase::Answered
        } else {
            SessionPhase::InProgress
        }
    }

    /// The question being shown. Stays on the last question once completed.
    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.quiz.questions()[self.current_index]
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.quiz.len()
    }

    /// `(current_index + 1) / total`, in `(0, 1]`.
    #[must_use]
    pub fn progress_fraction(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let fraction = (self.current_index + 1) as f64 / self.quiz.len() as f64;
        fraction
    }

    #[must_use]
    pub fn score_tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.score, self.total_u32())
    }

    #[must_use]
    pub fn score_message(&self) -> &'static str {
        self.score_tier().message()
    }

    /// Presentation state for option `index` of the current question.
    #[must_use]
    pub fn option_state(&self, index: usize) -> OptionState {
        let Some(selected) = self.selected_option else {
            return OptionState::Neutral;
        };
        let question = self.current_question();
        match (index == selected, question.is_correct(index)) {
            (true, true) => OptionState::SelectedCorrect,
            (true, false) => OptionState::SelectedIncorrect,
            (false, true) => OptionState::RevealedCorrect,
            (false, false) => OptionState::Neutral,
        }
    }

    /// Lock in an answer for the current question.
    ///
    /// # Errors
    ///
    /// Returns `SessionContractError::Completed` after the last question,
    /// `AlreadyAnswered` if an option is already locked in (state is untouched),
    /// and `OptionOutOfRange` for an index past the option list.
    pub fn select_option(&mut self, index: usize) -> Result<&AnswerRecord, SessionContractError> {
        if self.completed {
            return Err(SessionContractError::Completed);
        }
        if self.answered {
            return Err(SessionContractError::AlreadyAnswered);
        }
        let question = &self.quiz.questions()[self.current_index];
        let len = question.option_count();
        if index >= len {
            return Err(SessionContractError::OptionOutOfRange { index, len });
        }

        let was_correct = question.is_correct(index);
        let record = AnswerRecord {
            question_text: question.text().to_string(),
            selected_index: index,
            was_correct,
        };

        self.selected_option = Some(index);
        self.answered = true;
        if was_correct {
            self.score += 1;
        }
        self.history.push(record);

        self.history.last().ok_or(SessionContractError::NotAnswered)
    }

    /// Move past the answered question.
    ///
    /// `now` is recorded as the completion time when the last question is left.
    ///
    /// # Errors
    ///
    /// Returns `SessionContractError::Completed` after completion and
    /// `NotAnswered` if no option has been selected.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<SessionStep, SessionContractError> {
        if self.completed {
            return Err(SessionContractError::Completed);
        }
        if !self.answered {
            return Err(SessionContractError::NotAnswered);
        }

        if self.is_last_question() {
            self.completed = true;
            self.completed_at = Some(now);
            return Ok(SessionStep::Completed);
        }

        self.current_index += 1;
        self.selected_option = None;
        self.answered = false;
        Ok(SessionStep::Next {
            index: self.current_index,
        })
    }

    /// Final results; only available once the session is completed.
    ///
    /// # Errors
    ///
    /// Returns `SessionContractError::NotCompleted` before completion.
    pub fn results(&self) -> Result<QuizResults, SessionContractError> {
        let completed_at = self
            .completed_at
            .filter(|_| self.completed)
            .ok_or(SessionContractError::NotCompleted)?;
        Ok(QuizResults {
            session_id: self.id,
            title: self.quiz.title().to_string(),
            score: self.score,
            total: self.total_u32(),
            tier: self.score_tier(),
            history: self.history.clone(),
            started_at: self.started_at,
            completed_at,
        })
    }

    fn total_u32(&self) -> u32 {
        u32::try_from(self.quiz.len()).unwrap_or(u32::MAX)
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("questions_len", &self.quiz.len())
            .field("current_index", &self.current_index)
            .field("selected_option", &self.selected_option)
            .field("answered", &self.answered)
            .field("score", &self.score)
            .field("history_len", &self.history.len())
            .field("completed", &self.completed)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    fn question(text: &str, correct: usize) -> Question {
        let options = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        Question::new(text, options, correct).unwrap()
    }

    fn three_question_quiz() -> Arc<Quiz> {
        Arc::new(
            Quiz::new(
                "Cells",
                vec![question("Q1", 0), question("Q2", 1), question("Q3", 2)],
            )
            .unwrap(),
        )
    }

    fn session() -> QuizSession {
        QuizSession::new(three_question_quiz(), fixed_now())
    }

    #[test]
    fn new_session_starts_on_first_question() {
        let s = session();
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.score(), 0);
        assert!(s.history().is_empty());
        assert!(!s.is_complete());
        assert_eq!(s.phase(), SessionPhase::InProgress);
        assert_eq!(s.selected_option(), None);
    }

    #[test]
    fn scoring_across_three_questions() {
        let mut s = session();
        let now = fixed_now();

        s.select_option(0).unwrap();
        assert_eq!(s.advance(now).unwrap(), SessionStep::Next { index: 1 });
        s.select_option(0).unwrap();
        assert_eq!(s.advance(now).unwrap(), SessionStep::Next { index: 2 });
        s.select_option(2).unwrap();
        assert_eq!(s.advance(now).unwrap(), SessionStep::Completed);

        assert_eq!(s.score(), 2);
        let flags: Vec<bool> = s.history().iter().map(|r| r.was_correct).collect();
        assert_eq!(flags, [true, false, true]);
        let texts: Vec<&str> = s.history().iter().map(|r| r.question_text.as_str()).collect();
        assert_eq!(texts, ["Q1", "Q2", "Q3"]);
    }

    #[test]
    fn selecting_twice_does_not_double_count() {
        let mut s = session();
        s.select_option(0).unwrap();
        let err = s.select_option(0).unwrap_err();
        assert_eq!(err, SessionContractError::AlreadyAnswered);
        assert_eq!(s.score(), 1);
        assert_eq!(s.history().len(), 1);
        assert_eq!(s.selected_option(), Some(0));

        // A different option is rejected the same way.
        assert!(s.select_option(1).is_err());
        assert_eq!(s.selected_option(), Some(0));
    }

    #[test]
    fn out_of_range_option_is_rejected_without_mutation() {
        let mut s = session();
        let err = s.select_option(3).unwrap_err();
        assert_eq!(err, SessionContractError::OptionOutOfRange { index: 3, len: 3 });
        assert!(!s.is_answered());
        assert!(s.history().is_empty());
    }

    #[test]
    fn advance_requires_an_answer() {
        let mut s = session();
        assert_eq!(
            s.advance(fixed_now()).unwrap_err(),
            SessionContractError::NotAnswered
        );
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn advance_resets_selection_for_next_question() {
        let mut s = session();
        s.select_option(1).unwrap();
        assert_eq!(s.phase(), SessionPhase::Answered);
        s.advance(fixed_now()).unwrap();
        assert_eq!(s.selected_option(), None);
        assert!(!s.is_answered());
        assert_eq!(s.current_question().text(), "Q2");
    }

    #[test]
    fn completed_session_is_terminal() {
        let mut s = session();
        let done_at = fixed_now() + Duration::seconds(42);
        for answer in [0, 1, 2] {
            s.select_option(answer).unwrap();
            s.advance(done_at).unwrap();
        }
        assert!(s.is_complete());
        assert_eq!(s.phase(), SessionPhase::Completed);
        assert_eq!(s.completed_at(), Some(done_at));

        assert_eq!(s.select_option(0).unwrap_err(), SessionContractError::Completed);
        assert_eq!(s.advance(done_at).unwrap_err(), SessionContractError::Completed);
        assert_eq!(s.score(), 3);
        assert_eq!(s.history().len(), 3);
    }

    #[test]
    fn progress_fraction_counts_current_question() {
        let mut s = session();
        assert!((s.progress_fraction() - 1.0 / 3.0).abs() < f64::EPSILON);
        s.select_option(0).unwrap();
        s.advance(fixed_now()).unwrap();
        assert!((s.progress_fraction() - 2.0 / 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn option_states_follow_selection() {
        let mut s = session();
        assert_eq!(s.option_state(0), OptionState::Neutral);

        // Correct answer for Q1 is 0; pick 2.
        s.select_option(2).unwrap();
        assert_eq!(s.option_state(2), OptionState::SelectedIncorrect);
        assert_eq!(s.option_state(0), OptionState::RevealedCorrect);
        assert_eq!(s.option_state(1), OptionState::Neutral);

        s.advance(fixed_now()).unwrap();
        s.select_option(1).unwrap();
        assert_eq!(s.option_state(1), OptionState::SelectedCorrect);
    }

    #[test]
    fn results_only_after_completion() {
        let mut s = session();
        assert_eq!(s.results().unwrap_err(), SessionContractError::NotCompleted);

        let done_at = fixed_now() + Duration::seconds(90);
        for answer in [0, 0, 2] {
            s.select_option(answer).unwrap();
            s.advance(done_at).unwrap();
        }

        let results = s.results().unwrap();
        assert_eq!(results.session_id, s.id());
        assert_eq!(results.score, 2);
        assert_eq!(results.total, 3);
        assert_eq!(results.percent(), 67);
        assert_eq!(results.tier, ScoreTier::Fair);
        assert_eq!(results.message(), ScoreTier::Fair.message());
        assert_eq!(results.elapsed(), Duration::seconds(90));
        assert_eq!(results.correct_count(), 2);
    }

    #[test]
    fn restarted_session_carries_nothing_over() {
        let quiz = three_question_quiz();
        let mut first = QuizSession::new(Arc::clone(&quiz), fixed_now());
        first.select_option(0).unwrap();
        first.advance(fixed_now()).unwrap();

        let second = QuizSession::new(quiz, fixed_now());
        assert_ne!(first.id(), second.id());
        assert_eq!(second.score(), 0);
        assert!(second.history().is_empty());
        assert_eq!(second.current_index(), 0);
    }

    #[test]
    fn single_question_quiz_completes_on_first_advance() {
        let quiz = Arc::new(Quiz::new("One", vec![question("Only", 1)]).unwrap());
        let mut s = QuizSession::new(quiz, fixed_now());
        assert!(s.is_last_question());
        assert!((s.progress_fraction() - 1.0).abs() < f64::EPSILON);
        s.select_option(1).unwrap();
        assert_eq!(s.advance(fixed_now()).unwrap(), SessionStep::Completed);
        assert_eq!(s.score_tier(), ScoreTier::Excellent);
    }
}
