use parley::backend::{BackendRegistry, ScriptedBackend, TierClass};
use parley::error::ParleyError;
use parley::models::ComparisonSession;
use parley::orchestrator::{ComparisonService, PresentationPort};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

struct CountingPresenter {
    snapshots: AtomicUsize,
}

impl PresentationPort for CountingPresenter {
    fn present(&self, _session: &ComparisonSession) {
        self.snapshots.fetch_add(1, Ordering::SeqCst);
    }
}

fn demo_service() -> (ComparisonService, Arc<CountingPresenter>) {
    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(
        ScriptedBackend::new("lite-a", "Lite A", "recursion with a cache")
            .with_tier(TierClass::Lightweight),
    ));
    registry.register(Arc::new(
        ScriptedBackend::new("lite-b", "Lite B", "recursion with a cache")
            .with_tier(TierClass::Lightweight),
    ));
    registry.register(Arc::new(
        ScriptedBackend::new("spare", "Spare", "iterators and threads instead")
            .with_tier(TierClass::Flagship),
    ));

    let presenter = Arc::new(CountingPresenter {
        snapshots: AtomicUsize::new(0),
    });
    let service = ComparisonService::new(registry)
        .with_timeout(10)
        .with_presenter(presenter.clone());
    (service, presenter)
}

#[tokio::test]
async fn add_backend_merges_and_recomputes_analysis() {
    let (service, presenter) = demo_service();
    let cancel = CancellationToken::new();

    let mut session = service.start_session("question", &[], &cancel).await.unwrap();
    assert_eq!(session.response_count(), 2);
    assert!(session.get("spare").is_none());
    let before = session.analysis.clone().expect("analysis after fan-out");
    assert_eq!(presenter.snapshots.load(Ordering::SeqCst), 1);

    service
        .add_backend(&mut session, "spare", &cancel)
        .await
        .unwrap();

    assert_eq!(session.response_count(), 3);
    assert!(session.get("spare").unwrap().is_success());
    let after = session.analysis.clone().expect("analysis recomputed");
    // A diverging third answer must pull the similarity down.
    assert!(after.overall_similarity < before.overall_similarity);
    assert_eq!(presenter.snapshots.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn add_backend_overwrites_an_existing_slot() {
    let (service, _presenter) = demo_service();
    let cancel = CancellationToken::new();

    let mut session = service.start_session("question", &[], &cancel).await.unwrap();
    let first_started = session.get("lite-a").unwrap().started_at_ms;

    service
        .add_backend(&mut session, "lite-a", &cancel)
        .await
        .unwrap();

    // Still exactly one slot per backend id.
    assert_eq!(session.response_count(), 2);
    assert!(session.get("lite-a").unwrap().started_at_ms >= first_started);
}

#[tokio::test]
async fn add_backend_without_a_prompt_is_refused() {
    let (service, _presenter) = demo_service();
    let mut session = ComparisonSession::new("   ");

    let err = service
        .add_backend(&mut session, "spare", &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ParleyError::UnknownPrompt));
}

#[tokio::test]
async fn add_backend_with_unknown_id_is_refused() {
    let (service, _presenter) = demo_service();
    let cancel = CancellationToken::new();
    let mut session = service.start_session("question", &[], &cancel).await.unwrap();

    let err = service
        .add_backend(&mut session, "nonsense", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, ParleyError::UnknownBackend(_)));
}

#[tokio::test]
async fn explicit_preference_overrides_tier_policy() {
    let (service, _presenter) = demo_service();
    let preferred = vec!["spare".to_string(), "lite-b".to_string()];

    let session = service
        .start_session("question", &preferred, &CancellationToken::new())
        .await
        .unwrap();

    assert!(session.get("spare").is_some());
    assert!(session.get("lite-b").is_some());
    assert!(session.get("lite-a").is_none());
}
