use dioxus::prelude::*;

use revise_core::model::{Difficulty, QuestionCount, QuizParams};

use super::study::StudyIntent;
use crate::vm::StudyStep;
use super::test_harness::{ScriptedBackend, setup_study_harness};

const QUIZ: &str = "```json\n{\"title\": \"Cells\", \"questions_data\": [\
    {\"question_text\": \"Powerhouse of the cell?\", \"answers\": [\
      {\"text\": \"Nucleus\"}, {\"text\": \"Mitochondria\", \"is_correct\": true}]}]}\n```";

fn params() -> QuizParams {
    QuizParams::new(QuestionCount::new(4).unwrap(), Difficulty::Easy)
}

#[tokio::test(flavor = "current_thread")]
async fn input_step_renders_preloaded_text() {
    let mut harness = setup_study_harness(
        Some(ScriptedBackend::default()),
        Some("The heart has four chambers."),
    );
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Your study text"), "missing heading in {html}");
    assert!(html.contains("The heart has four chambers."), "missing text in {html}");
    assert!(!html.contains("config-warning"), "unexpected warning in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn unconfigured_app_shows_warning() {
    let mut harness = setup_study_harness(None, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("config-warning"), "missing warning in {html}");
    assert!(html.contains("REVISE_AI_API_KEY"), "missing hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn full_flow_renders_each_step() {
    let backend = ScriptedBackend::text(&["## Cells\n\n- **Mitochondria** make ATP", QUIZ]);
    let mut harness = setup_study_harness(Some(backend), Some("Cell biology chapter"));
    harness.rebuild();

    harness.dispatch(StudyIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("summary-step"), "missing summary in {html}");
    assert!(html.contains("<strong>Mitochondria</strong>"), "summary not rendered as markdown: {html}");
    assert!(html.contains("Generate quiz"), "missing generator in {html}");

    harness.dispatch(StudyIntent::Generate(params()));
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Powerhouse of the cell?"), "missing question in {html}");
    assert!(html.contains("Question 1 of 1"), "missing position in {html}");
    assert!(html.contains("Finish quiz"), "missing finish label in {html}");

    harness.dispatch(StudyIntent::Select(0));
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("option-selected-incorrect"), "missing wrong highlight in {html}");
    assert!(html.contains("option-revealed-correct"), "missing reveal in {html}");
    assert!(html.contains("The answer is: Mitochondria"), "missing feedback in {html}");

    harness.dispatch(StudyIntent::Next);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("results-step"), "missing results in {html}");
    assert!(html.contains("0/1"), "missing score in {html}");
    assert!(
        html.contains("Keep studying this topic to strengthen your knowledge."),
        "missing tier message in {html}"
    );

    harness.dispatch(StudyIntent::Finish);
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("summary-step"), "finish should return to summary: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_summary_shows_error_and_stays_on_input() {
    let mut harness = setup_study_harness(Some(ScriptedBackend::default()), Some("Some text"));
    harness.rebuild();

    harness.dispatch(StudyIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("error-banner"), "missing error banner in {html}");
    assert!(html.contains("input-step"), "should stay on input: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn malformed_quiz_stays_on_summary() {
    let backend = ScriptedBackend::text(&["A summary", "Sorry, no quiz today."]);
    let mut harness = setup_study_harness(Some(backend), Some("Some text"));
    harness.rebuild();

    harness.dispatch(StudyIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    harness.dispatch(StudyIntent::Generate(params()));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("could not read"), "missing quiz error in {html}");
    assert!(html.contains("summary-step"), "should stay on summary: {html}");
    let vm = harness.vm();
    let kept = harness.dom.in_runtime(|| vm.read().params());
    assert_eq!(kept, params());
}

#[tokio::test(flavor = "current_thread")]
async fn cancel_keeps_the_last_settled_step() {
    let backend = ScriptedBackend::text(&["A summary"]);
    let mut harness = setup_study_harness(Some(backend), Some("Some text"));
    harness.rebuild();

    harness.dispatch(StudyIntent::Submit);
    harness.dispatch(StudyIntent::Cancel);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("input-step"), "should stay on input: {html}");
    assert!(html.contains("Some text"), "input text lost: {html}");
    assert!(!html.contains("id=\"busy\""), "busy panel left open: {html}");
    assert!(!html.contains("error-banner"), "unexpected error in {html}");
    let vm = harness.vm();
    let (step, has_summary) = harness.dom.in_runtime(|| {
        let vm = vm.read();
        let settled = (vm.step(), vm.summary().is_some());
        settled
    });
    assert_eq!(step, StudyStep::Input);
    assert!(!has_summary);

    // The cancelled call never consumed its reply.
    harness.dispatch(StudyIntent::Submit);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("summary-step"), "missing summary in {html}");
}
