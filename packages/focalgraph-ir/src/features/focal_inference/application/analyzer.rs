//! Focal-Method Analysis Use Case
//!
//! ## Algorithm
//! 1. Split the module; register aliases, attribute groups and every
//!    `define` header
//! 2. Phase A: scan every test body, then up to `max_depth` rounds of the
//!    functions those bodies call
//! 3. Phase B: for every assertion argument of every test, search backwards
//!    for the call that last changed it
//!
//! Only functions within `max_depth` calls of a test are ever scanned.
//! Assertion helpers and excluded functions are never scanned at all.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, info, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{AnalysisConfig, ConfigResult, Validatable};
use crate::errors::{FocalError, Result};
use crate::features::flow_graph::infrastructure::CallGraph;
use crate::features::focal_inference::domain::FunctionBody;
use crate::features::focal_inference::infrastructure::{
    scan_function_body, AnalyzedProgram, FocalSearch, RegexTestFramework,
};
use crate::features::focal_inference::ports::TestFramework;
use crate::features::function_registry::FunctionRegistry;
use crate::features::ir_parsing::domain::{Diagnostic, ParseError};
use crate::features::ir_parsing::infrastructure::{FunctionSource, ModuleSource};

/// Test function → focal methods
pub type FocalMethodMap = BTreeMap<String, BTreeSet<String>>;

/// Whole-module analysis state; one run per [`get_relevant_functions`] call
///
/// [`get_relevant_functions`]: FocalMethodAnalyzer::get_relevant_functions
pub struct FocalMethodAnalyzer {
    config: AnalysisConfig,
    framework: Box<dyn TestFramework>,
    registry: FunctionRegistry,
    bodies: FxHashMap<String, FunctionBody>,
    call_graph: CallGraph,
    /// Scanned functions, tests first, then in discovery order
    evaluated: Vec<String>,
    tests: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl FocalMethodAnalyzer {
    /// Validate `config` and build the pattern-driven test framework from it
    pub fn new(config: AnalysisConfig) -> ConfigResult<Self> {
        config.validate()?;
        let framework = RegexTestFramework::from_config(&config)?;
        Ok(Self::with_framework(config, Box::new(framework)))
    }

    /// Use a custom [`TestFramework`]; only `config.max_depth` is read
    pub fn with_framework(config: AnalysisConfig, framework: Box<dyn TestFramework>) -> Self {
        Self {
            config,
            framework,
            registry: FunctionRegistry::new(),
            bodies: FxHashMap::default(),
            call_graph: CallGraph::new(),
            evaluated: Vec::new(),
            tests: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Read and analyze one `.ll` file
    pub fn analyze_file(&mut self, path: impl AsRef<Path>) -> Result<FocalMethodMap> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FocalError::input_not_found(path));
        }
        let source = std::fs::read_to_string(path)?;
        Ok(self.analyze_str(&source))
    }

    /// Both phases over module text
    pub fn analyze_str(&mut self, source: &str) -> FocalMethodMap {
        self.get_relevant_functions(source);
        self.get_focal_methods()
    }

    /// Phase A. Returns the scanned functions in evaluation order.
    pub fn get_relevant_functions(&mut self, source: &str) -> &[String] {
        self.reset();
        let module = ModuleSource::split(source);

        for line in &module.aliases {
            if let Err(err) = self.registry.register_alias(&line.text) {
                self.report(None, line.number, err);
            }
        }
        for line in &module.attribute_groups {
            if let Err(err) = self.registry.register_attribute_group(&line.text) {
                self.report(None, line.number, err);
            }
        }

        let mut sources: FxHashMap<String, &FunctionSource> = FxHashMap::default();
        for function in &module.functions {
            match self.registry.identify_function(&function.header.text) {
                Ok(name) => {
                    if self.registry.is_startup_func(&name) {
                        self.call_graph.mark_start(&name);
                    }
                    sources.entry(name).or_insert(function);
                }
                Err(err) => {
                    warn!("line {}: malformed define header: {}", function.header.number, err);
                    self.diagnostics
                        .push(Diagnostic::new(None, function.header.number, &err));
                }
            }
        }
        info!(
            "registered {} functions, {} aliases",
            self.registry.len(),
            module.aliases.len()
        );

        let test_names: Vec<String> = self
            .registry
            .functions()
            .map(|f| f.name.clone())
            .filter(|name| {
                self.framework.is_test_function(name) && !self.framework.is_excluded_function(name)
            })
            .collect();

        let mut to_evaluate: Vec<String> = Vec::new();
        for name in test_names {
            if let Some(&source) = sources.get(&name) {
                self.call_graph.mark_test(&name);
                self.tests.push(name.clone());
                let callees = self.evaluate(&name, source);
                enqueue(&mut to_evaluate, callees);
            }
        }
        info!("evaluated {} test functions", self.tests.len());

        for round in 1..=self.config.max_depth {
            if to_evaluate.is_empty() {
                break;
            }
            let queue = std::mem::take(&mut to_evaluate);
            let before = self.evaluated.len();

            for callee in queue {
                let name = self.registry.resolve_alias(&callee).to_string();
                if self.bodies.contains_key(&name) {
                    continue;
                }
                if self.framework.is_assertion_function(&callee)
                    || self.framework.is_assertion_function(&name)
                    || self.framework.is_excluded_function(&name)
                {
                    debug!("not expanding {}", name);
                    continue;
                }
                let Some(&source) = sources.get(&name) else {
                    debug!("no body for {}", name);
                    continue;
                };
                let callees = self.evaluate(&name, source);
                enqueue(&mut to_evaluate, callees);
            }

            info!(
                "round {}: evaluated {} functions",
                round,
                self.evaluated.len() - before
            );
        }

        &self.evaluated
    }

    /// Phase B over the current Phase A state
    pub fn get_focal_methods(&self) -> FocalMethodMap {
        let program = self.program();

        #[cfg(feature = "parallel")]
        let results: Vec<(String, BTreeSet<String>)> = self
            .tests
            .par_iter()
            .map(|test| (test.clone(), FocalSearch::new(program).focal_methods_of_test(test)))
            .collect();

        #[cfg(not(feature = "parallel"))]
        let results: Vec<(String, BTreeSet<String>)> = self
            .tests
            .iter()
            .map(|test| (test.clone(), FocalSearch::new(program).focal_methods_of_test(test)))
            .collect();

        for (test, focal) in &results {
            info!("{}: {} focal methods", test, focal.len());
        }
        results.into_iter().collect()
    }

    pub fn evaluated_functions(&self) -> &[String] {
        &self.evaluated
    }

    pub fn test_functions(&self) -> &[String] {
        &self.tests
    }

    pub fn is_analyzed(&self, name: &str) -> bool {
        self.bodies.contains_key(self.registry.resolve_alias(name))
    }

    pub fn body(&self, name: &str) -> Option<&FunctionBody> {
        self.bodies.get(self.registry.resolve_alias(name))
    }

    /// Scanned bodies in evaluation order
    pub fn bodies(&self) -> impl Iterator<Item = &FunctionBody> {
        self.evaluated.iter().filter_map(|name| self.bodies.get(name))
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    pub fn call_graph(&self) -> &CallGraph {
        &self.call_graph
    }

    /// Lines skipped during the last run
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    fn program(&self) -> AnalyzedProgram<'_> {
        AnalyzedProgram {
            registry: &self.registry,
            bodies: &self.bodies,
            framework: self.framework.as_ref(),
            max_depth: self.config.max_depth,
        }
    }

    fn reset(&mut self) {
        self.registry = FunctionRegistry::new();
        self.bodies.clear();
        self.call_graph = CallGraph::new();
        self.evaluated.clear();
        self.tests.clear();
        self.diagnostics.clear();
    }

    fn report(&mut self, function: Option<&str>, line: usize, err: ParseError) {
        warn!("line {}: {}", line, err);
        self.diagnostics.push(Diagnostic::new(function, line, &err));
    }

    /// Scan one body; returns its direct callees
    fn evaluate(&mut self, name: &str, source: &FunctionSource) -> Vec<String> {
        let outcome = scan_function_body(
            name,
            source,
            self.framework.as_ref(),
            &mut self.registry,
            &mut self.call_graph,
        );
        self.diagnostics.extend(outcome.diagnostics);
        self.bodies.insert(name.to_string(), outcome.body);
        self.evaluated.push(name.to_string());
        outcome.callees
    }
}

/// Append unseen callees, keeping first-seen order
fn enqueue(queue: &mut Vec<String>, callees: Vec<String>) {
    let mut seen: FxHashSet<String> = queue.iter().cloned().collect();
    for callee in callees {
        if seen.insert(callee.clone()) {
            queue.push(callee);
        }
    }
}
