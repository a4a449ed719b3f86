mod generator_vm;
mod markdown_vm;
mod quiz_vm;
mod results_vm;
mod study_vm;
mod time_fmt;

pub use generator_vm::{
    DifficultyOptionVm, difficulty_options, parse_count_input, parse_difficulty_input,
};
pub use markdown_vm::{sanitize_html, summary_to_html};
pub use quiz_vm::{Feedback, OptionVm, QuizCardVm, map_quiz_card, option_class};
pub use results_vm::{AnswerRowVm, ResultsVm, map_results};
pub use study_vm::{StudyStep, StudyVm};
pub use time_fmt::format_elapsed;
