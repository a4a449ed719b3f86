use revise_core::session::{OptionState, QuizSession};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub letter: char,
    pub text: String,
    pub state: OptionState,
}

impl OptionVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        option_class(self.state)
    }
}

#[must_use]
pub fn option_class(state: OptionState) -> &'static str {
    match state {
        OptionState::Neutral => "option",
        OptionState::SelectedCorrect => "option option-selected-correct",
        OptionState::SelectedIncorrect => "option option-selected-incorrect",
        OptionState::RevealedCorrect => "option option-revealed-correct",
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect,
}

impl Feedback {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Feedback::Correct => "feedback-correct",
            Feedback::Incorrect => "feedback-incorrect",
        }
    }
}

/// Everything the quiz screen renders for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizCardVm {
    pub title: String,
    pub position_label: String,
    pub score_label: String,
    pub progress_percent: u32,
    pub question_text: String,
    pub options: Vec<OptionVm>,
    pub answered: bool,
    pub feedback: Option<Feedback>,
    pub correct_option: String,
    pub next_label: &'static str,
}

impl QuizCardVm {
    #[must_use]
    pub fn feedback_text(&self) -> Option<String> {
        self.feedback.map(|feedback| match feedback {
            Feedback::Correct => "Correct! Keep it up.".to_string(),
            Feedback::Incorrect => format!("Not quite. The answer is: {}", self.correct_option),
        })
    }
}

fn option_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .and_then(|offset| b'A'.checked_add(offset))
        .filter(u8::is_ascii_uppercase)
        .map_or('?', char::from)
}

#[must_use]
pub fn map_quiz_card(session: &QuizSession) -> QuizCardVm {
    let question = session.current_question();
    let options = question
        .options()
        .iter()
        .enumerate()
        .map(|(index, text)| OptionVm {
            index,
            letter: option_letter(index),
            text: text.clone(),
            state: session.option_state(index),
        })
        .collect();

    let feedback = session.selected_option().map(|selected| {
        if question.is_correct(selected) {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        }
    });

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let progress_percent = (session.progress_fraction() * 100.0).round() as u32;

    QuizCardVm {
        title: session.title().to_string(),
        position_label: format!(
            "Question {} of {}",
            session.current_index() + 1,
            session.total_questions()
        ),
        score_label: format!("Score: {}", session.score()),
        progress_percent,
        question_text: question.text().to_string(),
        options,
        answered: session.is_answered(),
        feedback,
        correct_option: question.correct_option().to_string(),
        next_label: if session.is_last_question() {
            "Finish quiz"
        } else {
            "Next question"
        },
    }
}
