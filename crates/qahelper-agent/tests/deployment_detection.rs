mod common;

use common::FakeTracker;
use qahelper_agent::DeploymentProvider;
use qahelper_core::models::DeploymentType;

#[tokio::test]
async fn test_detects_once() {
    let tracker = FakeTracker::new(Vec::new());
    *tracker.deployment_type.lock().unwrap() = Some("Server".to_string());
    let provider = DeploymentProvider::new();
    assert_eq!(provider.cached(), None);

    assert_eq!(provider.get(&tracker).await, DeploymentType::Server);
    assert_eq!(provider.get(&tracker).await, DeploymentType::Server);
    assert_eq!(provider.cached(), Some(DeploymentType::Server));
    assert_eq!(tracker.calls_starting_with("get_server_info").len(), 1);
}

#[tokio::test]
async fn test_concurrent_callers_share_one_lookup() {
    let tracker = FakeTracker::new(Vec::new());
    let provider = DeploymentProvider::new();

    let (a, b) = tokio::join!(provider.get(&tracker), provider.get(&tracker));
    assert_eq!(a, DeploymentType::Cloud);
    assert_eq!(b, DeploymentType::Cloud);
    assert_eq!(tracker.calls_starting_with("get_server_info").len(), 1);
}

#[tokio::test]
async fn test_failed_lookup_is_unknown_and_not_retried() {
    let tracker = FakeTracker::new(Vec::new());
    *tracker.deployment_type.lock().unwrap() = None;
    let provider = DeploymentProvider::new();

    assert_eq!(provider.get(&tracker).await, DeploymentType::Unknown);

    *tracker.deployment_type.lock().unwrap() = Some("Cloud".to_string());
    assert_eq!(provider.get(&tracker).await, DeploymentType::Unknown);
    assert_eq!(tracker.calls_starting_with("get_server_info").len(), 1);
}

#[tokio::test]
async fn test_unrecognized_descriptor_is_unknown() {
    let tracker = FakeTracker::new(Vec::new());
    *tracker.deployment_type.lock().unwrap() = Some("Mainframe".to_string());
    let provider = DeploymentProvider::new();

    assert_eq!(provider.get(&tracker).await, DeploymentType::Unknown);
}

#[tokio::test]
async fn test_fixed_provider_makes_no_request() {
    let tracker = FakeTracker::new(Vec::new());
    let provider = DeploymentProvider::fixed(DeploymentType::DataCenter);

    assert_eq!(provider.get(&tracker).await, DeploymentType::DataCenter);
    assert!(tracker.calls().is_empty());
}
