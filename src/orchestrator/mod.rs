//! Concurrent fan-out across backends.
//!
//! One independent task per backend, all started together and joined on a
//! single settle-all barrier. A task failure never aborts its siblings: every
//! failure is folded into an error-tagged response occupying that backend's
//! slot. Cancellation is cooperative through one shared token; the aggregate
//! call always resolves.

use crate::analysis::engine;
use crate::backend::{BackendClient, BackendRegistry};
use crate::error::ParleyError;
use crate::models::{unix_millis_now, BackendResponse, ComparisonSession, ResponseErrorKind};
use futures::future::join_all;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

/// Receives a session snapshot after each fan-out and after each incremental
/// addition. Rendering is the host's concern.
pub trait PresentationPort: Send + Sync {
    fn present(&self, session: &ComparisonSession);
}

pub struct ComparisonService {
    registry: BackendRegistry,
    request_timeout: Duration,
    presenter: Option<Arc<dyn PresentationPort>>,
}

impl ComparisonService {
    pub fn new(registry: BackendRegistry) -> Self {
        Self {
            registry,
            request_timeout: Duration::from_secs(60),
            presenter: None,
        }
    }

    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.request_timeout = Duration::from_secs(timeout_seconds.max(1));
        self
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn PresentationPort>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    /// Run the full comparison lifecycle for one prompt: resolve the backend
    /// set (preferred ids or the tier policy), fan out, analyze, present.
    pub async fn start_session(
        &self,
        prompt: &str,
        preferred: &[String],
        cancel: &CancellationToken,
    ) -> Result<ComparisonSession, ParleyError> {
        let backends = self.registry.resolve(preferred)?;
        let responses = self
            .compare_across_backends(prompt, &backends, cancel)
            .await?;

        let mut session = ComparisonSession::new(prompt);
        session.replace_responses(responses);
        self.refresh_analysis(&mut session);
        self.present(&session);
        Ok(session)
    }

    /// Fan a prompt out to every backend concurrently and settle all tasks.
    /// Responses come back ordered by task start time, not completion time,
    /// so the output is stable under network jitter.
    pub async fn compare_across_backends(
        &self,
        prompt: &str,
        backends: &[Arc<dyn BackendClient>],
        cancel: &CancellationToken,
    ) -> Result<Vec<BackendResponse>, ParleyError> {
        if backends.len() < 2 {
            return Err(ParleyError::InsufficientBackends {
                found: backends.len(),
            });
        }

        let tasks = backends
            .iter()
            .map(|backend| self.query_backend(prompt, Arc::clone(backend), cancel.clone()));
        let mut responses = join_all(tasks).await;

        // join_all preserves submission order; the stable sort keeps it for
        // equal start timestamps.
        responses.sort_by_key(|r| r.started_at_ms);
        Ok(responses)
    }

    /// Query one additional backend for an existing session, overwrite its
    /// slot, and recompute the analysis. Same failure and cancellation
    /// contract as the initial fan-out.
    pub async fn add_backend(
        &self,
        session: &mut ComparisonSession,
        backend_id: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ParleyError> {
        if session.prompt.trim().is_empty() {
            return Err(ParleyError::UnknownPrompt);
        }
        let backend = self
            .registry
            .get(backend_id)
            .ok_or_else(|| ParleyError::UnknownBackend(backend_id.to_string()))?;

        let prompt = session.prompt.clone();
        let response = self.query_backend(&prompt, backend, cancel.clone()).await;
        session.merge_response(response);
        self.refresh_analysis(session);
        self.present(session);
        Ok(())
    }

    /// One backend task. Owns exactly one response slot and always resolves:
    /// failures, timeouts and cancellation all fold into an error-tagged
    /// response.
    async fn query_backend(
        &self,
        prompt: &str,
        backend: Arc<dyn BackendClient>,
        cancel: CancellationToken,
    ) -> BackendResponse {
        let identity = backend.identify();
        let started_at_ms = unix_millis_now();
        let clock = Instant::now();

        let outcome = if cancel.is_cancelled() {
            Err(ParleyError::Cancelled)
        } else {
            tokio::select! {
                _ = cancel.cancelled() => Err(ParleyError::Cancelled),
                result = timeout(self.request_timeout, backend.submit(prompt, cancel.clone())) => {
                    match result {
                        Ok(inner) => inner,
                        Err(_) => Err(ParleyError::BackendTimeout {
                            timeout: self.request_timeout.as_secs(),
                        }),
                    }
                }
            }
        };

        let latency_ms = clock.elapsed().as_millis() as u64;
        match outcome {
            Ok(text) => BackendResponse::success(
                identity.id,
                identity.display_name,
                text,
                started_at_ms,
                latency_ms,
            ),
            Err(error) => BackendResponse::failure(
                identity.id,
                identity.display_name,
                ResponseErrorKind::from_error(&error),
                started_at_ms,
                latency_ms,
            ),
        }
    }

    /// Recompute the session's analysis from its current store. Too few
    /// successful responses leaves the analysis absent, which callers render
    /// as "analysis unavailable" rather than an error.
    fn refresh_analysis(&self, session: &mut ComparisonSession) {
        let analysis = {
            let ordered = session.ordered_responses();
            engine::compute_analysis(&ordered)
        };
        session.analysis = analysis.ok();
    }

    fn present(&self, session: &ComparisonSession) {
        if let Some(presenter) = &self.presenter {
            presenter.present(session);
        }
    }
}
