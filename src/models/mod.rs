pub mod analysis;
pub mod response;
pub mod session;

pub use analysis::{
    AnalysisResult, CodeBlock, CodeReport, ComplexityBucket, DepthLevel, KeyDifference,
    ResponseExplanation,
};
pub use response::{unix_millis_now, BackendResponse, ResponseErrorKind};
pub use session::ComparisonSession;
