pub mod analysis;
pub mod backend;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;

pub use error::ParleyError;

// Re-export commonly used types
pub use backend::{BackendClient, BackendIdentity, BackendRegistry, ScriptedBackend, TierClass};
pub use config::{CompareConfig, DisplayMode};
pub use models::{
    AnalysisResult, BackendResponse, CodeBlock, ComparisonSession, ComplexityBucket, DepthLevel,
    KeyDifference, ResponseErrorKind,
};
pub use orchestrator::{ComparisonService, PresentationPort};

pub use cli::CliHandler;
