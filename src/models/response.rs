use crate::error::ParleyError;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Failure class attached to a backend response. Presence means the text is
/// empty and the entry is excluded from analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseErrorKind {
    Unavailable,
    Throttled,
    Blocked,
    Cancelled,
}

impl ResponseErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseErrorKind::Unavailable => "UNAVAILABLE",
            ResponseErrorKind::Throttled => "THROTTLED",
            ResponseErrorKind::Blocked => "BLOCKED",
            ResponseErrorKind::Cancelled => "CANCELLED",
        }
    }

    /// Fold a backend failure into the per-response taxonomy. Timeouts and
    /// transport errors count as unavailability.
    pub fn from_error(error: &ParleyError) -> Self {
        match error {
            ParleyError::Cancelled => ResponseErrorKind::Cancelled,
            ParleyError::BackendThrottled(_) => ResponseErrorKind::Throttled,
            ParleyError::BackendBlocked(_) => ResponseErrorKind::Blocked,
            _ => ResponseErrorKind::Unavailable,
        }
    }
}

/// One backend's outcome for one prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendResponse {
    pub backend_id: String,
    pub display_name: String,
    pub text: String,
    /// Unix milliseconds at task submission. Responses are ordered by this,
    /// not by completion time.
    pub started_at_ms: u64,
    pub latency_ms: u64,
    /// Rough token estimate (text length / 4).
    pub token_estimate: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseErrorKind>,
}

impl BackendResponse {
    pub fn success(
        backend_id: impl Into<String>,
        display_name: impl Into<String>,
        text: impl Into<String>,
        started_at_ms: u64,
        latency_ms: u64,
    ) -> Self {
        let text = text.into();
        let token_estimate = text.len() / 4;
        Self {
            backend_id: backend_id.into(),
            display_name: display_name.into(),
            text,
            started_at_ms,
            latency_ms,
            token_estimate,
            error: None,
        }
    }

    pub fn failure(
        backend_id: impl Into<String>,
        display_name: impl Into<String>,
        kind: ResponseErrorKind,
        started_at_ms: u64,
        latency_ms: u64,
    ) -> Self {
        Self {
            backend_id: backend_id.into(),
            display_name: display_name.into(),
            text: String::new(),
            started_at_ms,
            latency_ms,
            token_estimate: 0,
            error: Some(kind),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

/// Wall-clock milliseconds since the Unix epoch.
pub fn unix_millis_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
