use crate::error::ParleyError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Priority tier of a backend, used by the automatic resolution policy.
/// Declaration order is the resolution order: economical variants are picked
/// before flagships, flagships before everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TierClass {
    Lightweight,
    Flagship,
    Standard,
}

const LIGHTWEIGHT_MARKERS: &[&str] = &["mini", "flash", "haiku", "lite", "nano"];
const FLAGSHIP_MARKERS: &[&str] = &["opus", "pro", "ultra", "large", "gpt-5"];

impl TierClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            TierClass::Lightweight => "lightweight",
            TierClass::Flagship => "flagship",
            TierClass::Standard => "standard",
        }
    }

    /// Classify a model id by name. Lightweight markers win over flagship
    /// ones so "gpt-5-mini" stays economical.
    pub fn classify(model: &str) -> Self {
        let lower = model.to_lowercase();
        if LIGHTWEIGHT_MARKERS.iter().any(|m| lower.contains(m)) {
            TierClass::Lightweight
        } else if FLAGSHIP_MARKERS.iter().any(|m| lower.contains(m)) {
            TierClass::Flagship
        } else {
            TierClass::Standard
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendIdentity {
    pub id: String,
    pub display_name: String,
    pub tier: TierClass,
}

impl BackendIdentity {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, tier: TierClass) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            tier,
        }
    }
}

/// One text-generation service. The orchestrator depends only on this trait;
/// vendor specifics stay inside the implementations.
#[async_trait]
pub trait BackendClient: Send + Sync {
    fn identify(&self) -> BackendIdentity;

    /// Produce the full completion text for a prompt. Implementations must
    /// observe the cancellation token and return promptly once it triggers.
    async fn submit(&self, prompt: &str, cancel: CancellationToken) -> Result<String, ParleyError>;
}
