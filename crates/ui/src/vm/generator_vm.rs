use revise_core::model::{Difficulty, QuestionCount, QuizParams};

/// Parse the question-count field; junk keeps `current`, numbers are clamped into range.
#[must_use]
pub fn parse_count_input(raw: &str, current: QuestionCount) -> QuestionCount {
    raw.trim()
        .parse::<i64>()
        .map_or(current, QuestionCount::clamped)
}

#[must_use]
pub fn parse_difficulty_input(raw: &str, current: Difficulty) -> Difficulty {
    raw.parse().unwrap_or(current)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyOptionVm {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[must_use]
pub fn difficulty_options(params: QuizParams) -> Vec<DifficultyOptionVm> {
    Difficulty::ALL
        .iter()
        .map(|difficulty| DifficultyOptionVm {
            value: difficulty.as_str(),
            label: difficulty.label(),
            selected: *difficulty == params.difficulty,
        })
        .collect()
}
