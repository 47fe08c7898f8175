//! Read-only view over everything Phase A produced

use rustc_hash::FxHashMap;

use crate::features::focal_inference::domain::FunctionBody;
use crate::features::focal_inference::ports::TestFramework;
use crate::features::function_registry::FunctionRegistry;

/// Shared by every per-test search; cheap to copy
#[derive(Clone, Copy)]
pub struct AnalyzedProgram<'p> {
    pub registry: &'p FunctionRegistry,
    pub bodies: &'p FxHashMap<String, FunctionBody>,
    pub framework: &'p dyn TestFramework,
    pub max_depth: usize,
}

impl<'p> AnalyzedProgram<'p> {
    /// Body of `name`, looked up through aliases
    pub fn body(&self, name: &str) -> Option<&'p FunctionBody> {
        self.bodies.get(self.registry.resolve_alias(name))
    }

    pub fn resolve(&self, name: &'p str) -> &'p str {
        self.registry.resolve_alias(name)
    }

    /// Never looked into: assertion helpers, excluded functions, intrinsics
    pub fn is_opaque_by_policy(&self, callee: &str) -> bool {
        callee.starts_with("@llvm.")
            || self.framework.is_assertion_function(callee)
            || self.framework.is_excluded_function(callee)
    }
}

/// `llvm.memcpy.*`, `llvm.memmove.*`, `llvm.memset.*` and their inline variants
pub fn is_memory_intrinsic(callee: &str) -> bool {
    ["@llvm.memcpy", "@llvm.memmove", "@llvm.memset"]
        .iter()
        .any(|prefix| callee.starts_with(prefix))
}
