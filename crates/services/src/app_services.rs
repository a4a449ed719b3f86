use std::sync::Arc;

use revise_core::Clock;
use revise_core::model::Quiz;
use revise_core::session::QuizSession;

use crate::completion::{CompletionBackend, HttpCompletionBackend};
use crate::config::AiConfig;
use crate::error::ConfigurationError;
use crate::quiz_service::QuizGenerationService;
use crate::summary_service::SummaryService;

/// Assembles app-facing services around one completion backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    summaries: Arc<SummaryService>,
    quizzes: Arc<QuizGenerationService>,
}

impl AppServices {
    /// Build services talking HTTP to the configured endpoint.
    ///
    /// With `config == None` the services are built unconfigured: every client
    /// call then fails with a configuration error instead of reaching the network.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the HTTP client cannot be built.
    pub fn from_config(config: Option<AiConfig>, clock: Clock) -> Result<Self, ConfigurationError> {
        let backend = match config {
            Some(config) => {
                let backend: Arc<dyn CompletionBackend> = Arc::new(HttpCompletionBackend::new(config)?);
                Some(backend)
            }
            None => None,
        };
        Ok(Self::with_backend(backend, clock))
    }

    #[must_use]
    pub fn with_backend(backend: Option<Arc<dyn CompletionBackend>>, clock: Clock) -> Self {
        Self {
            clock,
            summaries: Arc::new(SummaryService::new(backend.clone())),
            quizzes: Arc::new(QuizGenerationService::new(backend)),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.summaries.enabled()
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

    /// Start a fresh session on `quiz`, stamped with this service's clock.
    #[must_use]
    pub fn start_session(&self, quiz: Quiz) -> QuizSession {
        QuizSession::new(Arc::new(quiz), self.clock.now())
    }
}
