use revise_core::session::QuizResults;

use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRowVm {
    pub number: usize,
    pub question: String,
    pub was_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub title: String,
    pub score_label: String,
    pub percent_label: String,
    pub message: &'static str,
    pub elapsed_label: String,
    pub answers: Vec<AnswerRowVm>,
}

#[must_use]
pub fn map_results(results: &QuizResults) -> ResultsVm {
    ResultsVm {
        title: results.title.clone(),
        score_label: format!("{}/{}", results.score, results.total),
        percent_label: format!("{}%", results.percent()),
        message: results.message(),
        elapsed_label: format!("Completed in {}", format_elapsed(results.elapsed())),
        answers: results
            .history
            .iter()
            .enumerate()
            .map(|(i, record)| AnswerRowVm {
                number: i + 1,
                question: record.question_text.clone(),
                was_correct: record.was_correct,
            })
            .collect(),
    }
}
