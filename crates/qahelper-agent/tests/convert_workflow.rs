mod common;

use common::{issue_page, FakeTracker, Harness, RELOAD_DELAY};
use qahelper_agent::workflow::convert::NOTHING_TO_CONVERT;
use qahelper_agent::{ControlKind, ControlState, NotificationLevel, WorkflowState};
use qahelper_core::models::{IssueTypeDescriptor, SubIssue};

fn qa_sub_issues() -> Vec<SubIssue> {
    vec![
        SubIssue::new("PRJ-11", "[Тестирование] PRJ-10"),
        SubIssue::new("PRJ-12", "[Документация] PRJ-10"),
        SubIssue::new("PRJ-13", "Unrelated work"),
    ]
}

fn convert_control() -> ControlState {
    ControlState::new(ControlKind::ConvertSubIssues)
}

#[tokio::test]
async fn test_converts_and_links_qa_sub_issues() {
    let harness = Harness::new(FakeTracker::new(qa_sub_issues()));
    let mut control = convert_control();

    let outcome = harness
        .orchestrator
        .trigger(ControlKind::ConvertSubIssues, &issue_page(), &mut control)
        .await
        .unwrap();

    assert_eq!(outcome.state, WorkflowState::Success);
    assert_eq!(outcome.level, NotificationLevel::Success);
    assert_eq!(outcome.message, "Converted and linked: PRJ-11, PRJ-12");
    assert_eq!(outcome.converted, vec!["PRJ-11", "PRJ-12"]);
    assert_eq!(
        harness.tracker.calls(),
        vec![
            "get_issue PRJ-10",
            "get_issue_types PRJ",
            "convert PRJ-11 1",
            "link PRJ-11 PRJ-10",
            "convert PRJ-12 1",
            "link PRJ-12 PRJ-10",
        ]
    );
    assert_eq!(harness.host.reloads(), vec![RELOAD_DELAY]);
    assert!(!control.enabled);
    assert_eq!(control.label, "Converting...");
}

#[tokio::test]
async fn test_conversion_accepts_prefix_without_space() {
    let harness = Harness::new(FakeTracker::new(vec![SubIssue::new(
        "PRJ-11",
        "[Тестирование]PRJ-10",
    )]));
    let mut control = convert_control();

    let outcome = harness
        .orchestrator
        .trigger(ControlKind::ConvertSubIssues, &issue_page(), &mut control)
        .await
        .unwrap();

    assert_eq!(outcome.converted, vec!["PRJ-11"]);
}

#[tokio::test]
async fn test_nothing_to_convert_warns() {
    let harness = Harness::new(FakeTracker::new(vec![SubIssue::new(
        "PRJ-13",
        "Unrelated work",
    )]));
    let mut control = convert_control();

    let outcome = harness
        .orchestrator
        .trigger(ControlKind::ConvertSubIssues, &issue_page(), &mut control)
        .await
        .unwrap();

    assert_eq!(outcome.level, NotificationLevel::Warning);
    assert_eq!(outcome.message, NOTHING_TO_CONVERT);
    assert!(!outcome.reload);
    assert!(control.enabled);
    assert_eq!(harness.tracker.calls(), vec!["get_issue PRJ-10"]);
    assert_eq!(
        harness.notifier.last(),
        Some((NotificationLevel::Warning, NOTHING_TO_CONVERT.to_string()))
    );
}

// Conversion has no per-item recovery: the first failure stops the remaining items,
// unlike creation where each sub-issue is attempted independently.
#[tokio::test]
async fn test_first_conversion_failure_aborts_run() {
    let tracker = FakeTracker::new(qa_sub_issues());
    tracker
        .fail_convert_keys
        .lock()
        .unwrap()
        .push("PRJ-11".to_string());
    let harness = Harness::new(tracker);
    let mut control = convert_control();

    let outcome = harness
        .orchestrator
        .trigger(ControlKind::ConvertSubIssues, &issue_page(), &mut control)
        .await
        .unwrap();

    assert_eq!(outcome.state, WorkflowState::Fatal);
    assert_eq!(outcome.level, NotificationLevel::Error);
    assert_eq!(outcome.message, "failed to convert PRJ-11: 400 - nope");
    assert!(harness.tracker.calls_starting_with("link").is_empty());
    assert!(!harness
        .tracker
        .calls()
        .contains(&"convert PRJ-12 1".to_string()));
    assert!(harness.host.reloads().is_empty());
    assert!(control.enabled);
}

#[tokio::test]
async fn test_missing_standard_type_is_fatal() {
    let tracker = FakeTracker::new(qa_sub_issues());
    *tracker.issue_types.lock().unwrap() =
        vec![IssueTypeDescriptor::new("10001", "QA-Subtask", true)];
    let harness = Harness::new(tracker);
    let mut control = convert_control();

    let outcome = harness
        .orchestrator
        .trigger(ControlKind::ConvertSubIssues, &issue_page(), &mut control)
        .await
        .unwrap();

    assert_eq!(outcome.state, WorkflowState::Fatal);
    assert_eq!(outcome.message, "no non-sub-issue types found");
    assert!(harness.tracker.calls_starting_with("convert").is_empty());
}
