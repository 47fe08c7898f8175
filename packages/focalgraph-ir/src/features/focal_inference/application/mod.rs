pub mod analyzer;

pub use analyzer::{FocalMethodAnalyzer, FocalMethodMap};
