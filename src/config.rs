use crate::error::ParleyError;
use serde::{Deserialize, Serialize};

/// How the host renders a finished comparison. Consumed by the presentation
/// layer only; the core never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    SideBySide,
    Unified,
    AnalysisOnly,
}

impl DisplayMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayMode::SideBySide => "side-by-side",
            DisplayMode::Unified => "unified",
            DisplayMode::AnalysisOnly => "analysis-only",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, ParleyError> {
        match s.trim().to_lowercase().as_str() {
            "side-by-side" | "sidebyside" | "side" => Ok(DisplayMode::SideBySide),
            "unified" => Ok(DisplayMode::Unified),
            "analysis-only" | "analysisonly" | "analysis" => Ok(DisplayMode::AnalysisOnly),
            other => Err(ParleyError::ConfigError(format!(
                "unknown display mode '{other}' (expected side-by-side, unified or analysis-only)"
            ))),
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        DisplayMode::SideBySide
    }
}

/// The host-supplied comparison preferences. An empty backend list triggers
/// the registry's automatic tier resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompareConfig {
    pub preferred_backends: Vec<String>,
    pub include_optional: bool,
    pub display_mode: DisplayMode,
}

impl CompareConfig {
    pub fn new(
        preferred_backends: Vec<String>,
        include_optional: bool,
        display_mode: DisplayMode,
    ) -> Self {
        Self {
            preferred_backends,
            include_optional,
            display_mode,
        }
    }

    pub fn wants_auto_resolution(&self) -> bool {
        self.preferred_backends.is_empty()
    }
}

/// Split a comma-separated backend list, dropping empty segments.
pub fn parse_backend_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
