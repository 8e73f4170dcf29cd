//! A deterministic, offline backend. Replies with canned text after an
//! optional artificial delay, or fails on cue. Drives the `--offline` demo
//! mode and every orchestrator test.

use crate::backend::client::{BackendClient, BackendIdentity, TierClass};
use crate::error::ParleyError;
use async_trait::async_trait;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
enum ScriptedOutcome {
    Reply(String),
    Unavailable(String),
    Throttled(String),
    Blocked(String),
}

pub struct ScriptedBackend {
    identity: BackendIdentity,
    outcome: ScriptedOutcome,
    delay: Duration,
}

impl ScriptedBackend {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        reply: impl Into<String>,
    ) -> Self {
        let id = id.into();
        Self {
            identity: BackendIdentity::new(&id, display_name.into(), TierClass::classify(&id)),
            outcome: ScriptedOutcome::Reply(reply.into()),
            delay: Duration::ZERO,
        }
    }

    pub fn with_tier(mut self, tier: TierClass) -> Self {
        self.identity.tier = tier;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn failing_unavailable(mut self, message: impl Into<String>) -> Self {
        self.outcome = ScriptedOutcome::Unavailable(message.into());
        self
    }

    pub fn failing_throttled(mut self, message: impl Into<String>) -> Self {
        self.outcome = ScriptedOutcome::Throttled(message.into());
        self
    }

    pub fn failing_blocked(mut self, message: impl Into<String>) -> Self {
        self.outcome = ScriptedOutcome::Blocked(message.into());
        self
    }
}

#[async_trait]
impl BackendClient for ScriptedBackend {
    fn identify(&self) -> BackendIdentity {
        self.identity.clone()
    }

    async fn submit(&self, _prompt: &str, cancel: CancellationToken) -> Result<String, ParleyError> {
        tokio::select! {
            _ = cancel.cancelled() => return Err(ParleyError::Cancelled),
            _ = tokio::time::sleep(self.delay) => {}
        }

        match &self.outcome {
            ScriptedOutcome::Reply(text) => Ok(text.clone()),
            ScriptedOutcome::Unavailable(message) => {
                Err(ParleyError::BackendUnavailable(message.clone()))
            }
            ScriptedOutcome::Throttled(message) => {
                Err(ParleyError::BackendThrottled(message.clone()))
            }
            ScriptedOutcome::Blocked(message) => Err(ParleyError::BackendBlocked(message.clone())),
        }
    }
}
