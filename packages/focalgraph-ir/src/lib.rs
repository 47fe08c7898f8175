/*
 * Focalgraph IR - Focal-Method Inference over LLVM IR
 *
 * Feature-First Hexagonal Architecture:
 * - config/    : Analysis configuration (patterns, depth horizon, YAML)
 * - features/  : Vertical slices (ir_parsing → function_registry → flow_graph
 *                → data_flow → focal_inference)
 * - errors     : Crate-level error type
 *
 * Performance:
 * - Phase B searches run on the rayon pool (`parallel` feature)
 * - Only functions within `max_depth` calls of a test are parsed
 */

#![allow(clippy::too_many_arguments)] // Search steps thread queue and candidates explicitly
#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Analysis configuration
pub mod config;

/// Error types
pub mod errors;

/// Feature modules
pub mod features;

// ═══════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, ConfigError, ConfigResult};
pub use errors::{FocalError, Result};
pub use features::focal_inference::{FocalMethodAnalyzer, FocalMethodMap, TestFramework};
pub use features::ir_parsing::Diagnostic;
