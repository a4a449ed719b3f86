use dioxus::prelude::*;

use revise_core::model::{QuestionCount, QuizParams};

use crate::vm::{difficulty_options, parse_count_input, parse_difficulty_input};

#[component]
pub fn SummaryStep(
    summary_html: String,
    params: QuizParams,
    on_generate: EventHandler<QuizParams>,
    on_new_text: EventHandler<()>,
) -> Element {
    let mut form = use_signal(|| params);
    let current = form();
    let options = difficulty_options(current);
    let count = current.count.get();
    let (min, max) = (QuestionCount::MIN, QuestionCount::MAX);

    rsx! {
        section { class: "panel", id: "summary-step",
            h2 { "Summary" }
            div { class: "summary-body", dangerous_inner_html: "{summary_html}" }
        }
        section { class: "panel", id: "quiz-generator",
            h2 { "Quiz" }
            div { class: "generator",
                label {
                    "Number of questions"
                    input {
                        id: "question-count",
                        r#type: "number",
                        min: "{min}",
                        max: "{max}",
                        value: "{count}",
                        oninput: move |evt| {
                            let mut next = form();
                            next.count = parse_count_input(&evt.value(), next.count);
                            form.set(next);
                        },
                    }
                }
                label {
                    "Difficulty"
                    select {
                        id: "difficulty",
                        onchange: move |evt| {
                            let mut next = form();
                            next.difficulty = parse_difficulty_input(&evt.value(), next.difficulty);
                            form.set(next);
                        },
                        for opt in options {
                            option { value: opt.value, selected: opt.selected, "{opt.label}" }
                        }
                    }
                }
            }
            div { class: "actions",
                button {
                    class: "primary",
                    id: "generate-quiz",
                    r#type: "button",
                    onclick: move |_| on_generate.call(form()),
                    "Generate quiz"
                }
                button {
                    id: "new-text",
                    r#type: "button",
                    onclick: move |_| on_new_text.call(()),
                    "New text"
                }
            }
        }
    }
}
