use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Structured comparison derived from one session's successful responses.
/// Never mutated after creation; a fresh result replaces it whenever the
/// response set changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Mean pairwise Jaccard similarity over significant-term sets, in [0,1].
    pub overall_similarity: f64,
    /// Shared themes, at most five, most frequent first.
    pub common_points: Vec<String>,
    pub key_differences: Vec<KeyDifference>,
    /// Per-backend code findings, keyed by backend id.
    pub code_analysis: BTreeMap<String, CodeReport>,
}

impl AnalysisResult {
    pub fn new(
        overall_similarity: f64,
        common_points: Vec<String>,
        key_differences: Vec<KeyDifference>,
        code_analysis: BTreeMap<String, CodeReport>,
    ) -> Self {
        Self {
            overall_similarity: overall_similarity.clamp(0.0, 1.0),
            common_points,
            key_differences,
            code_analysis,
        }
    }

    /// Fallback result used when an upstream payload cannot be understood:
    /// nothing in common, nothing different, zero similarity.
    pub fn degraded() -> Self {
        Self {
            overall_similarity: 0.0,
            common_points: Vec::new(),
            key_differences: Vec::new(),
            code_analysis: BTreeMap::new(),
        }
    }

    pub fn similarity_percent(&self) -> u32 {
        (self.overall_similarity * 100.0).round() as u32
    }
}

/// One detected divergence between responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyDifference {
    pub aspect: String,
    pub description: String,
}

impl KeyDifference {
    pub fn new(aspect: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            aspect: aspect.into(),
            description: description.into(),
        }
    }
}

/// Per-backend code findings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeReport {
    pub block_count: usize,
    pub languages: BTreeSet<String>,
    pub complexity: ComplexityBucket,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ComplexityBucket {
    Low,
    Medium,
    High,
}

impl ComplexityBucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityBucket::Low => "Low",
            ComplexityBucket::Medium => "Medium",
            ComplexityBucket::High => "High",
        }
    }

    /// Bucket a keyword score: >= 6 High, >= 3 Medium, else Low.
    pub fn from_score(score: u32) -> Self {
        if score >= 6 {
            ComplexityBucket::High
        } else if score >= 3 {
            ComplexityBucket::Medium
        } else {
            ComplexityBucket::Low
        }
    }
}

/// A fenced code region lifted out of a response, produced on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the opening fence, or "plaintext".
    pub language: String,
    pub code: String,
    pub backend_id: String,
    /// Prose immediately following the closing fence, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// Per-response explanatory profile, used by the explanatory comparison mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseExplanation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub introduction: Option<String>,
    /// At most five list items, or up to three emphasis sentences as fallback.
    pub key_points: Vec<String>,
    /// 1..=10.
    pub clarity_score: u8,
    pub depth: DepthLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DepthLevel {
    Basic,
    Intermediate,
    Advanced,
}

impl DepthLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DepthLevel::Basic => "Basic",
            DepthLevel::Intermediate => "Intermediate",
            DepthLevel::Advanced => "Advanced",
        }
    }

    /// Bucket a vocabulary score: >= 4 Advanced, >= 2 Intermediate, else Basic.
    pub fn from_score(score: u32) -> Self {
        if score >= 4 {
            DepthLevel::Advanced
        } else if score >= 2 {
            DepthLevel::Intermediate
        } else {
            DepthLevel::Basic
        }
    }
}
