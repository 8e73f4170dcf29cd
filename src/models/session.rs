use crate::models::{AnalysisResult, BackendResponse};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One prompt's comparison lifecycle: the response store populated by the
/// fan-out, plus the analysis computed once the fan-out settles.
///
/// The store is the single source of truth consumed by the analysis engine.
/// A new prompt gets a new session; nothing is shared across sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonSession {
    pub prompt: String,
    responses: BTreeMap<String, BackendResponse>,
    pub analysis: Option<AnalysisResult>,
}

impl ComparisonSession {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            responses: BTreeMap::new(),
            analysis: None,
        }
    }

    /// Replace the whole store with a fresh fan-out's output. Any previous
    /// analysis is dropped; the caller recomputes it.
    pub fn replace_responses(&mut self, responses: Vec<BackendResponse>) {
        self.responses.clear();
        for response in responses {
            self.responses.insert(response.backend_id.clone(), response);
        }
        self.analysis = None;
    }

    /// Merge a single response, overwriting any prior entry for that backend.
    pub fn merge_response(&mut self, response: BackendResponse) {
        self.responses.insert(response.backend_id.clone(), response);
        self.analysis = None;
    }

    pub fn get(&self, backend_id: &str) -> Option<&BackendResponse> {
        self.responses.get(backend_id)
    }

    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    pub fn backend_ids(&self) -> Vec<&str> {
        self.responses.keys().map(String::as_str).collect()
    }

    /// All responses ordered by task start time (ties broken by backend id),
    /// independent of completion order.
    pub fn ordered_responses(&self) -> Vec<&BackendResponse> {
        let mut ordered: Vec<&BackendResponse> = self.responses.values().collect();
        ordered.sort_by(|a, b| {
            a.started_at_ms
                .cmp(&b.started_at_ms)
                .then_with(|| a.backend_id.cmp(&b.backend_id))
        });
        ordered
    }

    pub fn successful_responses(&self) -> Vec<&BackendResponse> {
        self.ordered_responses()
            .into_iter()
            .filter(|r| r.is_success())
            .collect()
    }

    pub fn failed_responses(&self) -> Vec<&BackendResponse> {
        self.ordered_responses()
            .into_iter()
            .filter(|r| !r.is_success())
            .collect()
    }
}
