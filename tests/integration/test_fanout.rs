use parley::backend::{BackendClient, BackendRegistry, ScriptedBackend};
use parley::error::ParleyError;
use parley::models::ResponseErrorKind;
use parley::orchestrator::ComparisonService;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn service(backends: Vec<ScriptedBackend>) -> ComparisonService {
    let mut registry = BackendRegistry::new();
    for backend in backends {
        registry.register(Arc::new(backend));
    }
    ComparisonService::new(registry).with_timeout(10)
}

fn clients(service: &ComparisonService, ids: &[&str]) -> Vec<Arc<dyn BackendClient>> {
    ids.iter()
        .map(|id| service.registry().get(id).expect("registered"))
        .collect()
}

#[tokio::test]
async fn two_successes_resolve_in_start_order() {
    // The first-submitted backend is the slowest; ordering must still follow
    // submission, not completion.
    let service = service(vec![
        ScriptedBackend::new("slow", "Slow", "the slow answer")
            .with_delay(Duration::from_millis(200)),
        ScriptedBackend::new("fast", "Fast", "the fast answer")
            .with_delay(Duration::from_millis(10)),
    ]);
    let backends = clients(&service, &["slow", "fast"]);

    let responses = service
        .compare_across_backends("question", &backends, &CancellationToken::new())
        .await
        .expect("fan-out resolves");

    assert_eq!(responses.len(), 2);
    assert_eq!(responses[0].backend_id, "slow");
    assert_eq!(responses[1].backend_id, "fast");
    assert!(responses.iter().all(|r| r.is_success()));
    assert!(responses[0].started_at_ms <= responses[1].started_at_ms);
}

#[tokio::test]
async fn internal_failure_never_aborts_the_sibling() {
    let service = service(vec![
        ScriptedBackend::new("ok", "OK", "a good answer about recursion"),
        ScriptedBackend::new("broken", "Broken", "").failing_unavailable("exploded"),
    ]);
    let backends = clients(&service, &["ok", "broken"]);

    let responses = service
        .compare_across_backends("question", &backends, &CancellationToken::new())
        .await
        .expect("fan-out still resolves");

    assert_eq!(responses.len(), 2);
    let ok = responses.iter().find(|r| r.backend_id == "ok").unwrap();
    let broken = responses.iter().find(|r| r.backend_id == "broken").unwrap();
    assert!(ok.is_success());
    assert_eq!(broken.error, Some(ResponseErrorKind::Unavailable));
    assert!(broken.text.is_empty());
    assert_eq!(broken.token_estimate, 0);
}

#[tokio::test]
async fn throttled_and_blocked_failures_keep_their_kind() {
    let service = service(vec![
        ScriptedBackend::new("throttled", "Throttled", "").failing_throttled("429"),
        ScriptedBackend::new("blocked", "Blocked", "").failing_blocked("policy"),
    ]);
    let backends = clients(&service, &["throttled", "blocked"]);

    let responses = service
        .compare_across_backends("question", &backends, &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        responses
            .iter()
            .find(|r| r.backend_id == "throttled")
            .unwrap()
            .error,
        Some(ResponseErrorKind::Throttled)
    );
    assert_eq!(
        responses
            .iter()
            .find(|r| r.backend_id == "blocked")
            .unwrap()
            .error,
        Some(ResponseErrorKind::Blocked)
    );
}

#[tokio::test]
async fn cancellation_before_any_completion_still_resolves() {
    let service = service(vec![
        ScriptedBackend::new("a", "A", "never").with_delay(Duration::from_secs(60)),
        ScriptedBackend::new("b", "B", "never").with_delay(Duration::from_secs(60)),
    ]);
    let backends = clients(&service, &["a", "b"]);

    let cancel = CancellationToken::new();
    cancel.cancel();

    let responses = service
        .compare_across_backends("question", &backends, &cancel)
        .await
        .expect("cancellation never throws out of the orchestrator");

    assert_eq!(responses.len(), 2);
    for response in &responses {
        assert_eq!(response.error, Some(ResponseErrorKind::Cancelled));
        assert!(response.text.is_empty());
    }
}

#[tokio::test]
async fn late_cancellation_keeps_completed_results() {
    let service = service(vec![
        ScriptedBackend::new("done", "Done", "finished early"),
        ScriptedBackend::new("stuck", "Stuck", "never").with_delay(Duration::from_secs(60)),
    ]);
    let backends = clients(&service, &["done", "stuck"]);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let responses = service
        .compare_across_backends("question", &backends, &cancel)
        .await
        .unwrap();

    let done = responses.iter().find(|r| r.backend_id == "done").unwrap();
    let stuck = responses.iter().find(|r| r.backend_id == "stuck").unwrap();
    assert!(done.is_success());
    assert_eq!(done.text, "finished early");
    assert_eq!(stuck.error, Some(ResponseErrorKind::Cancelled));
}

#[tokio::test]
async fn slow_backend_times_out_as_unavailable() {
    let mut registry = BackendRegistry::new();
    registry.register(Arc::new(ScriptedBackend::new("quick", "Quick", "done")));
    registry.register(Arc::new(
        ScriptedBackend::new("glacial", "Glacial", "never")
            .with_delay(Duration::from_secs(120)),
    ));
    let service = ComparisonService::new(registry).with_timeout(1);
    let backends = clients(&service, &["quick", "glacial"]);

    let responses = service
        .compare_across_backends("question", &backends, &CancellationToken::new())
        .await
        .unwrap();

    let glacial = responses.iter().find(|r| r.backend_id == "glacial").unwrap();
    assert_eq!(glacial.error, Some(ResponseErrorKind::Unavailable));
}

#[tokio::test]
async fn fewer_than_two_backends_is_refused_before_any_request() {
    let service = service(vec![ScriptedBackend::new("solo", "Solo", "alone")]);
    let backends = clients(&service, &["solo"]);

    let err = service
        .compare_across_backends("question", &backends, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, ParleyError::InsufficientBackends { found: 1 }));
}

#[tokio::test]
async fn start_session_computes_analysis_when_two_answers_arrive() {
    let service = service(vec![
        ScriptedBackend::new("a", "A", "Use recursion and a cache for this algorithm."),
        ScriptedBackend::new("b", "B", "Use recursion and a cache for this algorithm."),
    ]);

    let session = service
        .start_session("question", &[], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(session.response_count(), 2);
    let analysis = session.analysis.expect("two successes yield an analysis");
    assert_eq!(analysis.overall_similarity, 1.0);
}

#[tokio::test]
async fn start_session_skips_analysis_when_not_enough_answers() {
    let service = service(vec![
        ScriptedBackend::new("a", "A", "only answer"),
        ScriptedBackend::new("b", "B", "").failing_unavailable("down"),
    ]);

    let session = service
        .start_session("question", &[], &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(session.response_count(), 2);
    assert!(session.analysis.is_none());
}
