//! Analysis configuration
//!
//! Three patterns drive the whole analysis: which functions are tests, which
//! calls are assertions, and (optionally) which functions to leave alone.
//! `max_depth` bounds how many call hops from a test are ever parsed.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::io::{ConfigFileV1, SUPPORTED_VERSIONS};
use super::validation::{compile_optional_pattern, compile_pattern, Validatable};

/// GoogleTest test bodies: `@_ZN..._Test8TestBodyEv`
pub const GTEST_TEST_PATTERN: &str = "TestBodyEv$";

/// GoogleTest comparison helpers (`CmpHelperEQ`, `CmpHelperSTREQ`,
/// `CmpHelperFloatingPointEQ`, `EqHelper::Compare`), excluding the
/// `...Failure` reporters
pub const GTEST_ASSERTION_PATTERN: &str = r"^@_ZN7testing8internal(?:\d+CmpHelper(?:[A-Z]{2,9}|FloatingPoint[A-Z]{2})[EI]|8EqHelper7Compare)";

pub const GTEST_ASSERTION_TYPE_PATTERN: &str = "testing::AssertionResult";

pub const DEFAULT_MAX_DEPTH: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub test_function_pattern: String,
    pub assertion_function_pattern: String,
    pub exclusion_function_pattern: Option<String>,
    /// Assertion arguments of a matching type are never traced
    pub assertion_type_pattern: Option<String>,
    pub max_depth: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::gtest()
    }
}

impl AnalysisConfig {
    pub fn new(
        test_function_pattern: impl Into<String>,
        assertion_function_pattern: impl Into<String>,
        max_depth: usize,
    ) -> Self {
        Self {
            test_function_pattern: test_function_pattern.into(),
            assertion_function_pattern: assertion_function_pattern.into(),
            exclusion_function_pattern: None,
            assertion_type_pattern: None,
            max_depth,
        }
    }

    /// GoogleTest preset
    pub fn gtest() -> Self {
        Self {
            test_function_pattern: GTEST_TEST_PATTERN.to_string(),
            assertion_function_pattern: GTEST_ASSERTION_PATTERN.to_string(),
            exclusion_function_pattern: None,
            assertion_type_pattern: Some(GTEST_ASSERTION_TYPE_PATTERN.to_string()),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_exclusion_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.exclusion_function_pattern = Some(pattern.into());
        self
    }

    pub fn with_assertion_type_pattern(mut self, pattern: Option<String>) -> Self {
        self.assertion_type_pattern = pattern;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn from_yaml(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(text)?;
        let version = file.version.ok_or(ConfigError::MissingVersion)?;
        if !SUPPORTED_VERSIONS.contains(&version) {
            return Err(ConfigError::UnsupportedVersion {
                found: version,
                supported: SUPPORTED_VERSIONS.to_vec(),
            });
        }

        let preset = Self::gtest();
        let config = Self {
            test_function_pattern: file
                .test_function_pattern
                .unwrap_or(preset.test_function_pattern),
            assertion_function_pattern: file
                .assertion_function_pattern
                .unwrap_or(preset.assertion_function_pattern),
            exclusion_function_pattern: file
                .exclusion_function_pattern
                .or(preset.exclusion_function_pattern),
            assertion_type_pattern: file.assertion_type_pattern.or(preset.assertion_type_pattern),
            max_depth: file.max_depth.unwrap_or(preset.max_depth),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> ConfigResult<String> {
        let file = ConfigFileV1 {
            version: Some(1),
            test_function_pattern: Some(self.test_function_pattern.clone()),
            assertion_function_pattern: Some(self.assertion_function_pattern.clone()),
            exclusion_function_pattern: self.exclusion_function_pattern.clone(),
            assertion_type_pattern: self.assertion_type_pattern.clone(),
            max_depth: Some(self.max_depth),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}

impl Validatable for AnalysisConfig {
    fn validate(&self) -> ConfigResult<()> {
        compile_pattern("test_function_pattern", &self.test_function_pattern)?;
        compile_pattern("assertion_function_pattern", &self.assertion_function_pattern)?;
        compile_optional_pattern(
            "exclusion_function_pattern",
            self.exclusion_function_pattern.as_deref(),
        )?;
        compile_optional_pattern("assertion_type_pattern", self.assertion_type_pattern.as_deref())?;
        Ok(())
    }
}
