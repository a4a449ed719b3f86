use dioxus::prelude::*;

use crate::vm::ResultsVm;

#[component]
pub fn ResultsStep(
    results: ResultsVm,
    on_restart: EventHandler<()>,
    on_finish: EventHandler<()>,
) -> Element {
    rsx! {
        section { class: "panel", id: "results-step",
            h2 { "Quiz complete: {results.title}" }
            p { class: "score", id: "score", "{results.score_label}" }
            p { id: "percent", "{results.percent_label}" }
            p { id: "tier-message", "{results.message}" }
            p { class: "muted", "{results.elapsed_label}" }
            ol { class: "history",
                for row in results.answers {
                    li { key: "{row.number}",
                        class: if row.was_correct { "feedback-correct" } else { "feedback-incorrect" },
                        if row.was_correct { "✓ " } else { "✗ " }
                        "{row.question}"
                    }
                }
            }
            div { class: "actions",
                button {
                    class: "primary",
                    id: "restart-quiz",
                    r#type: "button",
                    onclick: move |_| on_restart.call(()),
                    "New quiz on this summary"
                }
                button {
                    id: "finish-quiz",
                    r#type: "button",
                    onclick: move |_| on_finish.call(()),
                    "Back to summary"
                }
            }
        }
    }
}
