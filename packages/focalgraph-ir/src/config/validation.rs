//! Configuration validation

use regex::Regex;

use super::error::{ConfigError, ConfigResult};

/// Trait for validatable configuration objects
///
/// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
pub trait Validatable {
    fn validate(&self) -> ConfigResult<()>;
}

/// Compile a required pattern, rejecting the empty string
pub fn compile_pattern(field: &'static str, pattern: &str) -> ConfigResult<Regex> {
    if pattern.trim().is_empty() {
        return Err(ConfigError::EmptyPattern(field));
    }
    Regex::new(pattern).map_err(|source| ConfigError::invalid_pattern(field, source))
}

pub fn compile_optional_pattern(
    field: &'static str,
    pattern: Option<&str>,
) -> ConfigResult<Option<Regex>> {
    pattern.map(|p| compile_pattern(field, p)).transpose()
}
