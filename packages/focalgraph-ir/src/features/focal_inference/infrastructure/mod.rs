pub mod body_scanner;
pub mod classifier;
pub mod focal_search;
pub mod program;
pub mod regex_framework;

pub use body_scanner::{scan_function_body, ScanOutcome};
pub use classifier::MutationClassifier;
pub use focal_search::FocalSearch;
pub use program::{is_memory_intrinsic, AnalyzedProgram};
pub use regex_framework::RegexTestFramework;
