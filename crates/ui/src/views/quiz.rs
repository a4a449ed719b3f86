use dioxus::prelude::*;

use crate::vm::QuizCardVm;

#[component]
pub fn QuizStep(
    card: QuizCardVm,
    on_select: EventHandler<usize>,
    on_next: EventHandler<()>,
    on_quit: EventHandler<()>,
) -> Element {
    let feedback_class = card.feedback.map(|f| f.class()).unwrap_or_default();
    let feedback_text = card.feedback_text();
    let answered = card.answered;
    let next_label = card.next_label;
    let progress = card.progress_percent;
    let options = card.options.clone();

    rsx! {
        section { class: "panel", id: "quiz-step",
            h2 { "{card.title}" }
            div { class: "actions",
                span { class: "muted", "{card.position_label}" }
                span { class: "muted", "{card.score_label}" }
            }
            div { class: "progress",
                div { class: "progress-fill", style: "width: {progress}%" }
            }
            h3 { id: "question-text", "{card.question_text}" }
            ul { class: "options",
                for opt in options {
                    li { key: "{opt.index}",
                        button {
                            class: opt.class(),
                            r#type: "button",
                            disabled: answered,
                            onclick: move |_| on_select.call(opt.index),
                            "{opt.letter}. {opt.text}"
                        }
                    }
                }
            }
            if let Some(text) = feedback_text {
                p { class: feedback_class, id: "feedback", "{text}" }
            }
            div { class: "actions",
                button {
                    class: "primary",
                    id: "next-question",
                    r#type: "button",
                    disabled: !answered,
                    onclick: move |_| on_next.call(()),
                    "{next_label}"
                }
                button {
                    id: "quit-quiz",
                    r#type: "button",
                    onclick: move |_| on_quit.call(()),
                    "Back to summary"
                }
            }
        }
    }
}
