// Backend module - the client capability trait and its implementations

pub mod client;
pub mod registry;
pub mod scripted;
pub mod vendor;

pub use client::{BackendClient, BackendIdentity, TierClass};
pub use registry::{offline_registry, registry_from_env, BackendRegistry};
pub use scripted::ScriptedBackend;
pub use vendor::{AnthropicBackend, GeminiBackend, OpenAiBackend};
