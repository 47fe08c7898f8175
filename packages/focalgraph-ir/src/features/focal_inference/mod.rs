// Focal-method inference
//
// Hexagonal Architecture:
// - domain: Function bodies, mutation verdicts, memo-table states
// - ports: TestFramework (which functions are tests and assertions)
// - infrastructure: Body scanner, mutation classifier, backward focal search
// - application: FocalMethodAnalyzer (Phase A discovery + Phase B search)

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{FocalMethodAnalyzer, FocalMethodMap};
pub use domain::{CacheSlot, FunctionBody, MutationKind, Verdict};
pub use infrastructure::{AnalyzedProgram, FocalSearch, MutationClassifier, RegexTestFramework};
pub use ports::TestFramework;
