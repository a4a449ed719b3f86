use std::sync::Arc;

use revise_core::model::{QuizParams, Summary};
use revise_core::session::{QuizSession, SessionStep};
use services::{Clock, QuizGenerationService, SummaryService};

use crate::views::ViewError;
use crate::vm::quiz_vm::{QuizCardVm, map_quiz_card};
use crate::vm::results_vm::{ResultsVm, map_results};

/// Which screen of the study flow is showing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudyStep {
    Input,
    Summary,
    Quiz,
    Results,
}

/// The input → summary → quiz → results flow.
///
/// A failed call never moves the flow forward: a summary failure leaves it on
/// `Input`, a quiz failure on `Summary`.
#[derive(Clone, Debug, Default)]
pub struct StudyVm {
    summary: Option<Summary>,
    params: QuizParams,
    session: Option<QuizSession>,
}

impl StudyVm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn step(&self) -> StudyStep {
        match (&self.summary, &self.session) {
            (None, _) => StudyStep::Input,
            (Some(_), None) => StudyStep::Summary,
            (Some(_), Some(session)) if session.is_complete() => StudyStep::Results,
            (Some(_), Some(_)) => StudyStep::Quiz,
        }
    }

    #[must_use]
    pub fn summary(&self) -> Option<&Summary> {
        self.summary.as_ref()
    }

    #[must_use]
    pub fn params(&self) -> QuizParams {
        self.params
    }

    pub fn set_params(&mut self, params: QuizParams) {
        self.params = params;
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn quiz_card(&self) -> Option<QuizCardVm> {
        self.session
            .as_ref()
            .filter(|session| !session.is_complete())
            .map(map_quiz_card)
    }

    #[must_use]
    pub fn results(&self) -> Option<ResultsVm> {
        self.session
            .as_ref()
            .and_then(|session| session.results().ok())
            .map(|results| map_results(&results))
    }

    /// Back to an empty input step.
    pub fn clear(&mut self) {
        self.summary = None;
        self.session = None;
    }

    /// Summarize new study text. Any previous summary and quiz are dropped first.
    ///
    /// # Errors
    ///
    /// Returns the `ViewError` mapped from the client failure.
    pub async fn submit_text(
        &mut self,
        summaries: &SummaryService,
        text: &str,
    ) -> Result<(), ViewError> {
        self.clear();
        let summary = summaries.summarize(text).await.map_err(|err| {
            log::warn!("summary failed: {err}");
            ViewError::from(&err)
        })?;
        self.summary = Some(summary);
        Ok(())
    }

    /// Generate a quiz from the current summary and start a session on it.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Unknown` without a summary, otherwise the mapped client failure.
    pub async fn generate_quiz(
        &mut self,
        quizzes: &QuizGenerationService,
        clock: Clock,
        params: QuizParams,
    ) -> Result<(), ViewError> {
        self.params = params;
        let Some(summary) = self.summary.as_ref() else {
            log::error!("quiz requested before a summary exists");
            return Err(ViewError::Unknown);
        };
        let quiz = quizzes
            .generate_quiz(summary.as_str(), params)
            .await
            .map_err(|err| {
                log::warn!("quiz generation failed: {err}");
                ViewError::from(&err)
            })?;
        let session = QuizSession::new(Arc::new(quiz), clock.now());
        log::info!(
            "session {} started with {} questions",
            session.id(),
            session.total_questions()
        );
        self.session = Some(session);
        Ok(())
    }

    /// Regenerate with the last parameters. On failure the flow lands on the summary step.
    ///
    /// # Errors
    ///
    /// Returns the mapped client failure.
    pub async fn restart(
        &mut self,
        quizzes: &QuizGenerationService,
        clock: Clock,
    ) -> Result<(), ViewError> {
        self.session = None;
        self.generate_quiz(quizzes, clock, self.params).await
    }

    /// Leave the quiz (or results) and return to the summary.
    pub fn finish(&mut self) {
        self.session = None;
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is no running session or the
    /// session rejects the selection.
    pub fn select_option(&mut self, index: usize) -> Result<(), ViewError> {
        let session = self.session.as_mut().ok_or(ViewError::Unknown)?;
        session.select_option(index).map(|_| ()).map_err(|err| {
            log::error!("select_option({index}) rejected: {err}");
            ViewError::Unknown
        })
    }

    /// # Errors
    ///
    /// Returns `ViewError::Unknown` when there is no running session or the
    /// current question is unanswered.
    pub fn advance(&mut self, clock: Clock) -> Result<SessionStep, ViewError> {
        let session = self.session.as_mut().ok_or(ViewError::Unknown)?;
        session.advance(clock.now()).map_err(|err| {
            log::error!("advance rejected: {err}");
            ViewError::Unknown
        })
    }
}
