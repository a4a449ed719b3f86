use dioxus::prelude::*;

use revise_core::model::MAX_SOURCE_CHARS;

#[component]
pub fn InputStep(text: Signal<String>, on_submit: EventHandler<()>) -> Element {
    let mut text = text;
    let char_count = text.read().chars().count();
    let blank = text.read().trim().is_empty();
    let too_long = char_count > MAX_SOURCE_CHARS;

    rsx! {
        section { class: "panel", id: "input-step",
            h2 { "Your study text" }
            p { class: "muted", "Paste or type the material you want to revise." }
            textarea {
                class: "source-input",
                id: "source-input",
                placeholder: "Start typing your text here...",
                value: "{text}",
                oninput: move |evt| text.set(evt.value()),
            }
            p { class: if too_long { "muted feedback-incorrect" } else { "muted" },
                "{char_count} / {MAX_SOURCE_CHARS} characters"
            }
            div { class: "actions",
                button {
                    class: "primary",
                    id: "summarize",
                    r#type: "button",
                    disabled: blank || too_long,
                    onclick: move |_| on_submit.call(()),
                    "Summarize"
                }
                button {
                    r#type: "button",
                    disabled: blank,
                    onclick: move |_| text.set(String::new()),
                    "Clear"
                }
            }
        }
    }
}
