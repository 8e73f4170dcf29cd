//! Vendor-specific backend clients.
//!
//! Backends:
//!   OpenAiBackend    — OpenAI chat completions (gpt-*, o*)
//!   AnthropicBackend — Anthropic Messages API (claude-*)
//!   GeminiBackend    — Google Gemini generateContent (gemini-*)
//!
//! Each client sends one user message per prompt and races the HTTP call
//! against the shared cancellation token.

use crate::backend::client::{BackendClient, BackendIdentity, TierClass};
use crate::error::ParleyError;
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

const DEFAULT_MAX_TOKENS: u32 = 2048;
const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Turn a model id into a human-facing name ("gpt-5-mini" -> "Gpt 5 Mini").
pub fn humanize_model_id(model: &str) -> String {
    model
        .split(|c: char| c == '-' || c == '.' || c == '/')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Check the HTTP status and unwrap the body, mapping vendor failures onto
/// the error taxonomy: 429 is throttling, 403/451 a policy block, anything
/// else unavailability.
async fn check_response_status(resp: reqwest::Response) -> Result<serde_json::Value, ParleyError> {
    let status = resp.status().as_u16();
    let body: serde_json::Value = resp.json().await?;
    if status >= 400 {
        let message = body["error"]["message"]
            .as_str()
            .or_else(|| body["message"].as_str())
            .unwrap_or("unknown API error")
            .to_string();
        return Err(match status {
            429 => ParleyError::BackendThrottled(message),
            403 | 451 => ParleyError::BackendBlocked(message),
            _ => ParleyError::BackendUnavailable(format!("HTTP {status}: {message}")),
        });
    }
    Ok(body)
}

/// Race a vendor call against the cancellation token.
async fn submit_cancellable<F>(cancel: CancellationToken, call: F) -> Result<String, ParleyError>
where
    F: std::future::Future<Output = Result<String, ParleyError>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(ParleyError::Cancelled),
        result = call => result,
    }
}

// ── OpenAI ────────────────────────────────────────────────────────────────────

pub struct OpenAiBackend {
    pub model: String,
    display_name: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            display_name: humanize_model_id(&model),
            model,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParleyError> {
        let body = serde_json::json!({
            "model":       &self.model,
            "messages":    [{ "role": "user", "content": prompt }],
            "max_tokens":  DEFAULT_MAX_TOKENS,
            "temperature": DEFAULT_TEMPERATURE,
        });
        let resp = self
            .client
            .post("https://api.openai.com/v1/chat/completions")
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;

        if json["choices"][0]["finish_reason"].as_str() == Some("content_filter") {
            return Err(ParleyError::BackendBlocked(
                "completion stopped by content filter".to_string(),
            ));
        }

        Ok(json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}

#[async_trait]
impl BackendClient for OpenAiBackend {
    fn identify(&self) -> BackendIdentity {
        BackendIdentity::new(
            &self.model,
            &self.display_name,
            TierClass::classify(&self.model),
        )
    }

    async fn submit(&self, prompt: &str, cancel: CancellationToken) -> Result<String, ParleyError> {
        submit_cancellable(cancel, self.complete(prompt)).await
    }
}

// ── Anthropic ─────────────────────────────────────────────────────────────────

pub struct AnthropicBackend {
    pub model: String,
    display_name: String,
    api_key: String,
    client: reqwest::Client,
}

impl AnthropicBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            display_name: humanize_model_id(&model),
            model,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParleyError> {
        let body = serde_json::json!({
            "model":      &self.model,
            "messages":   [{ "role": "user", "content": prompt }],
            "max_tokens": DEFAULT_MAX_TOKENS,
        });
        let resp = self
            .client
            .post("https://api.anthropic.com/v1/messages")
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;
        let json = check_response_status(resp).await?;

        let content = json["content"]
            .as_array()
            .and_then(|blocks| blocks.first())
            .and_then(|b| b["text"].as_str())
            .unwrap_or("")
            .to_string();

        if content.is_empty() && json["stop_reason"].as_str() == Some("refusal") {
            return Err(ParleyError::BackendBlocked(
                "model refused the prompt".to_string(),
            ));
        }

        Ok(content)
    }
}

#[async_trait]
impl BackendClient for AnthropicBackend {
    fn identify(&self) -> BackendIdentity {
        BackendIdentity::new(
            &self.model,
            &self.display_name,
            TierClass::classify(&self.model),
        )
    }

    async fn submit(&self, prompt: &str, cancel: CancellationToken) -> Result<String, ParleyError> {
        submit_cancellable(cancel, self.complete(prompt)).await
    }
}

// ── Google Gemini ─────────────────────────────────────────────────────────────

pub struct GeminiBackend {
    pub model: String,
    display_name: String,
    api_key: String,
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let model = model.into();
        Self {
            display_name: humanize_model_id(&model),
            model,
            api_key: api_key.into(),
            client: reqwest::Client::new(),
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, ParleyError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "maxOutputTokens": DEFAULT_MAX_TOKENS,
                "temperature":     DEFAULT_TEMPERATURE,
            }
        });
        let resp = self.client.post(&url).json(&body).send().await?;
        let json = check_response_status(resp).await?;

        if let Some(reason) = json["promptFeedback"]["blockReason"].as_str() {
            return Err(ParleyError::BackendBlocked(format!(
                "prompt blocked: {reason}"
            )));
        }

        Ok(json["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap_or("")
            .to_string())
    }
}

#[async_trait]
impl BackendClient for GeminiBackend {
    fn identify(&self) -> BackendIdentity {
        BackendIdentity::new(
            &self.model,
            &self.display_name,
            TierClass::classify(&self.model),
        )
    }

    async fn submit(&self, prompt: &str, cancel: CancellationToken) -> Result<String, ParleyError> {
        submit_cancellable(cancel, self.complete(prompt)).await
    }
}
