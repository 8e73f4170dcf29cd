use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParleyError {
    #[error("At least two backends are required for a comparison (found {found})")]
    InsufficientBackends { found: usize },

    #[error("Analysis needs at least two successful responses (got {successful})")]
    InsufficientDataForAnalysis { successful: usize },

    #[error("Session has no prompt - run a comparison before adding a backend")]
    UnknownPrompt,

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend throttled: {0}")]
    BackendThrottled(String),

    #[error("Backend refused the prompt: {0}")]
    BackendBlocked(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Backend call timed out after {timeout} seconds")]
    BackendTimeout { timeout: u64 },

    #[error("Malformed upstream payload: {0}")]
    MalformedUpstreamPayload(String),

    #[error("Invalid command line arguments: {0}")]
    InvalidArguments(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("No prompt provided - empty stdin")]
    NoInput,

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
