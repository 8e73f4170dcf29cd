//! Contract tests for the BackendClient capability and the registry's
//! resolution policy.

use parley::backend::{
    offline_registry, BackendClient, BackendRegistry, ScriptedBackend, TierClass,
};
use parley::error::ParleyError;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn identify_is_stable_and_submit_returns_full_text() {
    let backend: Arc<dyn BackendClient> =
        Arc::new(ScriptedBackend::new("demo", "Demo", "the whole answer"));

    let first = backend.identify();
    let second = backend.identify();
    assert_eq!(first, second);
    assert_eq!(first.id, "demo");

    let text = backend
        .submit("prompt", CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text, "the whole answer");
}

#[tokio::test]
async fn submit_observes_the_cancellation_signal() {
    let backend: Arc<dyn BackendClient> = Arc::new(
        ScriptedBackend::new("demo", "Demo", "never delivered")
            .with_delay(Duration::from_secs(300)),
    );

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let started = std::time::Instant::now();
    let err = backend.submit("prompt", cancel).await.unwrap_err();
    assert!(matches!(err, ParleyError::Cancelled));
    // Cooperative cancellation must return promptly, not after the delay.
    assert!(started.elapsed() < Duration::from_secs(10));
}

#[test]
fn tier_classification_is_name_driven() {
    assert_eq!(TierClass::classify("gpt-5-mini"), TierClass::Lightweight);
    assert_eq!(TierClass::classify("gemini-2.5-flash"), TierClass::Lightweight);
    assert_eq!(TierClass::classify("claude-opus-4-1"), TierClass::Flagship);
    assert_eq!(TierClass::classify("some-unknown-model"), TierClass::Standard);
}

#[test]
fn resolution_concatenates_tiers_and_takes_two() {
    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(
        ScriptedBackend::new("big", "Big", "x").with_tier(TierClass::Flagship),
    ));
    registry.register(Arc::new(
        ScriptedBackend::new("other", "Other", "x").with_tier(TierClass::Standard),
    ));
    registry.register(Arc::new(
        ScriptedBackend::new("small", "Small", "x").with_tier(TierClass::Lightweight),
    ));

    let resolved = registry.resolve(&[]).unwrap();
    let ids: Vec<String> = resolved.iter().map(|b| b.identify().id).collect();
    // Lightweight first, flagship second; standard only when nothing cheaper.
    assert_eq!(ids, vec!["small", "big"]);
}

#[test]
fn resolution_is_deterministic_across_calls() {
    let registry = offline_registry();
    let first: Vec<String> = registry
        .resolve(&[])
        .unwrap()
        .iter()
        .map(|b| b.identify().id)
        .collect();
    let second: Vec<String> = registry
        .resolve(&[])
        .unwrap()
        .iter()
        .map(|b| b.identify().id)
        .collect();
    assert_eq!(first, second);
}

#[test]
fn empty_catalog_refuses_resolution() {
    let registry = BackendRegistry::new();
    let err = match registry.resolve(&[]) {
        Ok(_) => panic!("expected resolve to fail"),
        Err(e) => e,
    };
    assert!(matches!(err, ParleyError::InsufficientBackends { found: 0 }));
}

#[test]
fn unused_lists_only_backends_outside_the_session() {
    let registry = offline_registry();
    let unused = registry.unused(&["demo-lite"]);
    let ids: Vec<&str> = unused.iter().map(|i| i.id.as_str()).collect();
    assert_eq!(ids, vec!["demo-flagship", "demo-standard"]);
}
