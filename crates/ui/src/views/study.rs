use dioxus::prelude::*;
use dioxus::core::Task;

use revise_core::model::QuizParams;

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::input::InputStep;
use crate::views::quiz::QuizStep;
use crate::views::results::ResultsStep;
use crate::views::summary::SummaryStep;
use crate::vm::{StudyStep, StudyVm, summary_to_html};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BusyTask {
    Summarizing,
    GeneratingQuiz,
}

impl BusyTask {
    fn label(self) -> &'static str {
        match self {
            BusyTask::Summarizing => "Summarizing your text...",
            BusyTask::GeneratingQuiz => "Generating your quiz...",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum StudyIntent {
    Submit,
    Generate(QuizParams),
    Restart,
    Select(usize),
    Next,
    Finish,
    NewText,
    Cancel,
}

#[component]
pub fn StudyView() -> Element {
    let ctx = use_context::<AppContext>();
    let configured = ctx.is_configured();

    let text = use_signal({
        let ctx = ctx.clone();
        move || ctx.take_initial_text().unwrap_or_default()
    });
    let vm = use_signal(StudyVm::new);
    let mut error = use_signal(|| None::<ViewError>);
    let busy = use_signal(|| None::<BusyTask>);
    let pending = use_signal(|| None::<Task>);

    let dispatch = {
        let ctx = ctx.clone();
        use_callback(move |intent: StudyIntent| {
            let mut vm = vm;
            let mut error = error;
            let mut busy = busy;
            let mut pending = pending;
            let clock = ctx.clock();

            match intent {
                StudyIntent::Submit | StudyIntent::Generate(_) | StudyIntent::Restart => {
                    if busy.peek().is_some() {
                        return;
                    }
                    let task_kind = if intent == StudyIntent::Submit {
                        BusyTask::Summarizing
                    } else {
                        BusyTask::GeneratingQuiz
                    };
                    let summaries = ctx.summaries();
                    let quizzes = ctx.quizzes();
                    let source = text.peek().clone();
                    // Work on a copy; the signal keeps the last settled state until the call returns.
                    let mut local = vm.peek().clone();
                    error.set(None);
                    busy.set(Some(task_kind));

                    let task = spawn(async move {
                        let result = match intent {
                            StudyIntent::Submit => local.submit_text(&summaries, &source).await,
                            StudyIntent::Generate(params) => {
                                local.generate_quiz(&quizzes, clock, params).await
                            }
                            _ => local.restart(&quizzes, clock).await,
                        };
                        vm.set(local);
                        if let Err(err) = result {
                            error.set(Some(err));
                        }
                        busy.set(None);
                        pending.set(None);
                    });
                    pending.set(Some(task));
                }
                StudyIntent::Select(index) => {
                    if let Err(err) = vm.write().select_option(index) {
                        error.set(Some(err));
                    }
                }
                StudyIntent::Next => {
                    if let Err(err) = vm.write().advance(clock) {
                        error.set(Some(err));
                    }
                }
                StudyIntent::Finish => {
                    error.set(None);
                    vm.write().finish();
                }
                StudyIntent::NewText => {
                    error.set(None);
                    vm.write().clear();
                }
                StudyIntent::Cancel => {
                    if let Some(task) = pending.write().take() {
                        task.cancel();
                        log::info!("pending request cancelled");
                    }
                    busy.set(None);
                }
            }
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<StudyTestHandles>() {
                handles.register(dispatch, vm);
            }
        }
    }

    let step = vm.read().step();
    let busy_task = busy();
    let config_warning = ViewError::NotConfigured.message();

    rsx! {
        header { class: "app-header",
            h1 { "Revise" }
            span { class: "muted", "Summarize, then quiz yourself." }
        }
        if !configured {
            div { class: "banner banner-warning", id: "config-warning",
                span { "{config_warning}" }
            }
        }
        if let Some(err) = error() {
            div { class: "banner banner-error", id: "error-banner",
                span { "{err.message()}" }
                button {
                    r#type: "button",
                    onclick: move |_| error.set(None),
                    "Dismiss"
                }
            }
        }
        if let Some(task) = busy_task {
            div { class: "panel busy", id: "busy",
                p { "{task.label()}" }
                button {
                    r#type: "button",
                    onclick: move |_| dispatch.call(StudyIntent::Cancel),
                    "Cancel"
                }
            }
        } else {
            match step {
                StudyStep::Input => rsx! {
                    InputStep {
                        text,
                        on_submit: move |()| dispatch.call(StudyIntent::Submit),
                    }
                },
                StudyStep::Summary => {
                    let summary_html = vm
                        .read()
                        .summary()
                        .map(|summary| summary_to_html(summary.as_str()))
                        .unwrap_or_default();
                    let params = vm.read().params();
                    rsx! {
                        SummaryStep {
                            summary_html,
                            params,
                            on_generate: move |params| dispatch.call(StudyIntent::Generate(params)),
                            on_new_text: move |()| dispatch.call(StudyIntent::NewText),
                        }
                    }
                }
                StudyStep::Quiz => {
                    let card = vm.read().quiz_card();
                    match card {
                        Some(card) => rsx! {
                            QuizStep {
                                card,
                                on_select: move |index| dispatch.call(StudyIntent::Select(index)),
                                on_next: move |()| dispatch.call(StudyIntent::Next),
                                on_quit: move |()| dispatch.call(StudyIntent::Finish),
                            }
                        },
                        None => rsx! {},
                    }
                }
                StudyStep::Results => {
                    let results = vm.read().results();
                    match results {
                        Some(results) => rsx! {
                            ResultsStep {
                                results,
                                on_restart: move |()| dispatch.call(StudyIntent::Restart),
                                on_finish: move |()| dispatch.call(StudyIntent::Finish),
                            }
                        },
                        None => rsx! {},
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct StudyTestHandles {
    dispatch: Rc<RefCell<Option<Callback<StudyIntent>>>>,
    vm: Rc<RefCell<Option<Signal<StudyVm>>>>,
}

#[cfg(test)]
impl StudyTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<StudyIntent>, vm: Signal<StudyVm>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.vm.borrow_mut() = Some(vm);
    }

    pub(crate) fn dispatch(&self) -> Callback<StudyIntent> {
        (*self.dispatch.borrow()).expect("study dispatch registered")
    }

    pub(crate) fn vm(&self) -> Signal<StudyVm> {
        (*self.vm.borrow()).expect("study vm registered")
    }
}
