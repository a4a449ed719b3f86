use std::sync::{Arc, Mutex};

use services::{Clock, QuizGenerationService, SummaryService};

pub trait UiApp: Send + Sync {
    fn summaries(&self) -> Arc<SummaryService>;
    fn quizzes(&self) -> Arc<QuizGenerationService>;
    fn clock(&self) -> Clock;

    /// Study text to prefill the input step with (e.g. a document given on the command line).
    fn initial_text(&self) -> Option<String>;
}

#[derive(Clone)]
pub struct AppContext {
    clock: Clock,
    summaries: Arc<SummaryService>,
    quizzes: Arc<QuizGenerationService>,
    initial_text_once: Arc<Mutex<Option<String>>>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            clock: app.clock(),
            summaries: app.summaries(),
            quizzes: app.quizzes(),
            initial_text_once: Arc::new(Mutex::new(app.initial_text())),
        }
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn summaries(&self) -> Arc<SummaryService> {
        Arc::clone(&self.summaries)
    }

    #[must_use]
    pub fn quizzes(&self) -> Arc<QuizGenerationService> {
        Arc::clone(&self.quizzes)
    }

    /// Both clients share one backend, so either reports configuration.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.summaries.enabled()
    }

    /// The preloaded text, handed out once.
    #[must_use]
    pub fn take_initial_text(&self) -> Option<String> {
        self.initial_text_once
            .lock()
            .map(|mut slot| slot.take())
            .unwrap_or_default()
    }
}

// Provided by the composition root (`crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
