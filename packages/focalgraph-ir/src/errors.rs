//! Error types for focalgraph-ir
//!
//! Line-level parse failures are recovered inside the scanner and surface as
//! [`Diagnostic`](crate::features::ir_parsing::domain::Diagnostic) records.
//! Only configuration and input problems abort a run.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for focalgraph-ir operations
#[derive(Debug, Error)]
pub enum FocalError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input module does not exist
    #[error("Input IR file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FocalError {
    /// Create an input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        FocalError::InputNotFound(path.into())
    }
}

/// Result type alias for focalgraph operations
pub type Result<T> = std::result::Result<T, FocalError>;
