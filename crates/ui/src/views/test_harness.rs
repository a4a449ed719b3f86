use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use revise_core::time::fixed_clock;
use services::{
    ApiError, Clock, CompletionBackend, CompletionReply, CompletionRequest,
    QuizGenerationService, SummaryService,
};

use crate::context::{UiApp, build_app_context};
use crate::views::StudyView;
use crate::views::study::{StudyIntent, StudyTestHandles};
use crate::vm::StudyVm;

/// Hands out scripted replies in order; runs dry with `MissingContent`.
#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Result<CompletionReply, ApiError>>>,
}

impl ScriptedBackend {
    pub fn text(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(
                replies
                    .iter()
                    .map(|reply| Ok(CompletionReply::Text((*reply).to_string())))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl CompletionBackend for ScriptedBackend {
    fn model(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionReply, ApiError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(ApiError::MissingContent))
    }
}

#[derive(Clone)]
struct TestApp {
    summaries: Arc<SummaryService>,
    quizzes: Arc<QuizGenerationService>,
    initial_text: Option<String>,
}

impl UiApp for TestApp {
    fn summaries(&self) -> Arc<SummaryService> {
        Arc::clone(&self.summaries)
    }

    fn quizzes(&self) -> Arc<QuizGenerationService> {
        Arc::clone(&self.quizzes)
    }

    fn clock(&self) -> Clock {
        fixed_clock()
    }

    fn initial_text(&self) -> Option<String> {
        self.initial_text.clone()
    }
}

#[derive(Props, Clone)]
struct StudyHarnessProps {
    app: Arc<TestApp>,
    handles: StudyTestHandles,
}

impl PartialEq for StudyHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn StudyHarness(props: StudyHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.handles.clone());
    rsx! { StudyView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub handles: StudyTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn dispatch(&self, intent: StudyIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
    }

    pub fn vm(&self) -> Signal<StudyVm> {
        self.handles.vm()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Mount `StudyView` over `backend` (`None` = unconfigured).
pub fn setup_study_harness(
    backend: Option<ScriptedBackend>,
    initial_text: Option<&str>,
) -> ViewHarness {
    let backend = backend.map(|backend| Arc::new(backend) as Arc<dyn CompletionBackend>);
    let app = Arc::new(TestApp {
        summaries: Arc::new(SummaryService::new(backend.clone())),
        quizzes: Arc::new(QuizGenerationService::new(backend)),
        initial_text: initial_text.map(str::to_string),
    });
    let handles = StudyTestHandles::default();
    let dom = VirtualDom::new_with_props(
        StudyHarness,
        StudyHarnessProps {
            app,
            handles: handles.clone(),
        },
    );
    ViewHarness { dom, handles }
}
