//! Analysis configuration
//!
//! - Preset: `AnalysisConfig::gtest()` for GoogleTest suites
//! - YAML: versioned schema (`version: 1`), unknown fields rejected
//! - Validation: every pattern must be non-empty and compile
//!
//! ```rust,ignore
//! use focalgraph_ir::config::AnalysisConfig;
//!
//! let config = AnalysisConfig::gtest().with_max_depth(3);
//! let config = AnalysisConfig::from_yaml("focal.yaml")?;
//! ```

pub mod analysis_config;
pub mod error;
pub mod io;
pub mod validation;

pub use analysis_config::{
    AnalysisConfig, DEFAULT_MAX_DEPTH, GTEST_ASSERTION_PATTERN, GTEST_ASSERTION_TYPE_PATTERN,
    GTEST_TEST_PATTERN,
};
pub use error::{ConfigError, ConfigResult};
pub use io::ConfigFileV1;
pub use validation::Validatable;
