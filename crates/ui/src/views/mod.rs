mod input;
mod quiz;
mod results;
mod state;
pub(crate) mod study;
mod summary;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use input::InputStep;
pub use quiz::QuizStep;
pub use results::ResultsStep;
pub use state::ViewError;
pub use study::StudyView;
pub use summary::SummaryStep;
