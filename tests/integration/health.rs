//! Health endpoint integration tests
//!
//! The liveness routes never consult the secret store or any upstream;
//! they must answer 200 even with an entirely empty secret.

use pretty_assertions::assert_eq;
use serde_json::Value;

use keygate::SecretFile;

use crate::common::ProxyTestHarness;

#[tokio::test]
async fn test_health_returns_ok_with_structure() {
    let harness = ProxyTestHarness::new().await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert!(body["uptime_seconds"].is_number());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_health_live_returns_ok() {
    let harness = ProxyTestHarness::new().await;

    let response = harness.server.get("/health/live").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_is_independent_of_secret_state() {
    let harness = ProxyTestHarness::with_secret_file(SecretFile::default()).await;

    let response = harness.server.get("/health").await;

    response.assert_status_ok();

    // No upstream is ever contacted for a health check.
    assert!(ProxyTestHarness::requests_for(&harness.openai)
        .await
        .is_empty());
}
