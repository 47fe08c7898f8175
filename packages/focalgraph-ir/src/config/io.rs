//! Configuration file schema
//!
//! Defines the YAML schema types; loading lives in `analysis_config.rs`.

use serde::{Deserialize, Serialize};

/// YAML Schema v1
///
/// Every field except `version` is optional and falls back to the GoogleTest
/// preset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    #[serde(default)]
    pub version: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_function_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion_function_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclusion_function_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assertion_type_pattern: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

pub const SUPPORTED_VERSIONS: &[u32] = &[1];
