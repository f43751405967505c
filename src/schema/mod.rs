pub mod detection;
pub mod evidence;
pub mod report;

// Re-export commonly used types
pub use detection::{BoundingBox, Detection};
pub use evidence::Evidence;
pub use report::{EvaluationReport, Violation};

// Report schema version
pub const SCHEMA_VERSION: &str = "0.2.0";
