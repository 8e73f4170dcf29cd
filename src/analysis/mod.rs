// Analysis engine - pure, deterministic heuristics over response text

pub mod codeblocks;
pub mod differences;
pub mod engine;
pub mod explanation;
pub mod similarity;
pub mod terms;

pub use codeblocks::{complexity_bucket, extract_code_blocks};
pub use engine::{compute_analysis, compute_explanations, extract_all_code_blocks};
pub use explanation::{clarity_score, depth_level, explanation_profile};
pub use similarity::{jaccard, overall_similarity};
pub use terms::significant_terms;
