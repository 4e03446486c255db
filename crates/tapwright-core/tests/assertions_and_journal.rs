//! Presence/text assertions and the step journal they feed.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{automator, button, root_view, Call, ScriptedExecutor};

use tapwright_core::automator::Automator;
use tapwright_core::compose::Capture;
use tapwright_core::element::{Rect, UIElement};
use tapwright_core::journal::{Journal, StepOutcome, StepRecord};
use tapwright_core::selector::Selector;
use tapwright_core::TestFailure;

fn device_rows() -> Vec<UIElement> {
    vec![
        root_view(800.0),
        UIElement::new("TextView", Rect::new(0.0, 100.0, 400.0, 40.0))
            .with_id("device-name")
            .with_text("Kitchen Button"),
        UIElement::new("TextView", Rect::new(0.0, 140.0, 400.0, 40.0))
            .with_id("device-name")
            .with_text("Garage Button"),
    ]
}

#[tokio::test(start_paused = true)]
async fn test_assert_present_passes_and_captures() {
    let exec = Arc::new(ScriptedExecutor::new(vec![root_view(800.0), button("ok", "OK")]));
    let app = automator(&exec);

    app.assert_present(&Selector::id("ok"), "ok-visible").await.unwrap();

    assert_eq!(exec.screenshots(), vec!["ok-visible".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_assert_present_fails_naming_tag_after_capture() {
    let exec = Arc::new(ScriptedExecutor::new(vec![root_view(800.0)]));
    let app = automator(&exec);

    let err = app
        .assert_present(&Selector::id("devices"), "device-list")
        .await
        .unwrap_err();

    match err {
        TestFailure::Assertion(msg) => {
            assert!(msg.starts_with("FAILURE: device-list"), "{}", msg);
            assert!(msg.contains("id='devices'"), "{}", msg);
        }
        other => panic!("expected Assertion, got {:?}", other),
    }
    // The artifact of the wrong screen is still written.
    assert_eq!(exec.screenshots(), vec!["device-list".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_assert_text_at_matching_index() {
    let exec = Arc::new(ScriptedExecutor::new(device_rows()));
    let app = automator(&exec);

    app.assert_text_at(&Selector::id("device-name"), 1, "Garage Button", "second-row")
        .await
        .unwrap();

    assert_eq!(exec.screenshots(), vec!["second-row".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_assert_text_at_mismatch() {
    let exec = Arc::new(ScriptedExecutor::new(device_rows()));
    let app = automator(&exec);

    let err = app
        .assert_text_at(&Selector::id("device-name"), 0, "Garage Button", "first-row")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "TEST FAILURE. Expecting: Garage Button, Actual: Kitchen Button"
    );
}

#[tokio::test(start_paused = true)]
async fn test_assert_text_at_index_out_of_range_passes() {
    let exec = Arc::new(ScriptedExecutor::new(device_rows()));
    let app = automator(&exec);

    app.assert_text_at(&Selector::id("device-name"), 7, "Anything", "row")
        .await
        .unwrap();
    assert!(exec.screenshots().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_journal_records_each_step() {
    let exec = Arc::new(ScriptedExecutor::new(vec![root_view(800.0), button("save", "Save")]));
    let app = automator(&exec);

    app.tap(&Selector::id("save"), Capture::after("saved")).await.unwrap();
    app.tap_if_present(&Selector::id("gone"), Duration::from_secs(1), None)
        .await
        .unwrap();
    let _ = app.clear_text(&Selector::id("gone")).await;

    let records = app.journal().records();
    let steps: Vec<&str> = records.iter().map(|r| r.step.as_str()).collect();
    assert_eq!(steps, vec!["tap", "tap_if_present", "clear_text"]);

    assert_eq!(records[0].outcome, StepOutcome::Passed);
    assert_eq!(records[0].screenshots, vec!["saved".to_string()]);
    assert_eq!(records[0].selector, Some(Selector::id("save")));
    assert!(records[1].passed());

    let failures = app.journal().failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].step, "clear_text");
    assert_eq!(failures[0].duration_ms, 30_000);
    match &failures[0].outcome {
        StepOutcome::Failed(msg) => assert!(msg.contains("id='gone'")),
        StepOutcome::Passed => panic!("expected failure"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_shared_journal_persists_steps() {
    let path = std::env::temp_dir().join(format!("tapwright_steps_{}.jsonl", uuid::Uuid::new_v4()));
    let journal = Arc::new(Journal::with_log_file(&path).unwrap());

    let exec = Arc::new(ScriptedExecutor::new(vec![root_view(800.0), button("ok", "OK")]));
    let app = Automator::new(exec.clone()).with_journal(journal.clone());

    app.assert_present(&Selector::id("ok"), "ok").await.unwrap();
    assert_eq!(journal.len(), 1);

    let contents = std::fs::read_to_string(&path).unwrap();
    let record: StepRecord = serde_json::from_str(contents.lines().next().unwrap()).unwrap();
    assert_eq!(record.step, "assert_present");
    assert_eq!(record.screenshots, vec!["ok".to_string()]);

    std::fs::remove_file(&path).ok();
    assert!(exec.calls().contains(&Call::Screenshot("ok".to_string())));
}
