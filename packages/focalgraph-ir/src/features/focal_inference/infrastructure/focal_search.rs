//! Backward focal-method search
//!
//! Starting from an assertion call, walk the instruction graph backwards
//! breadth-first, carrying the register whose value the assertion compares.
//! At every call boundary the classifier decides whether the callee changed
//! that value. The nearest confirmed mutator wins: once one is found at
//! depth `d`, nothing deeper than `d` is added.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use rustc_hash::FxHashSet;

use super::classifier::MutationClassifier;
use super::program::{is_memory_intrinsic, AnalyzedProgram};
use crate::features::data_flow::domain::Provenance;
use crate::features::flow_graph::domain::NodeId;
use crate::features::focal_inference::domain::{FunctionBody, MutationKind, Verdict};
use crate::features::ir_parsing::domain::{is_pointer_type, tracked_name, Call, Statement};

/// Bound on `getelementptr`/cast chains followed when matching store aliases
const ALIAS_CHAIN_LIMIT: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TraceState<'p> {
    register: &'p str,
    node: NodeId,
    is_reference: bool,
    /// Backward steps from the assertion
    depth: usize,
}

/// Candidates collected over one trace
#[derive(Debug)]
struct Candidates {
    mutators: BTreeSet<String>,
    cutoff: usize,
    opaque: BTreeMap<String, usize>,
    provisional: BTreeSet<String>,
}

impl Default for Candidates {
    fn default() -> Self {
        Self {
            mutators: BTreeSet::new(),
            cutoff: usize::MAX,
            opaque: BTreeMap::new(),
            provisional: BTreeSet::new(),
        }
    }
}

impl Candidates {
    fn add_mutator(&mut self, name: &str, depth: usize) {
        if depth < self.cutoff {
            self.mutators.clear();
            self.cutoff = depth;
        }
        if depth == self.cutoff {
            self.mutators.insert(name.to_string());
        }
    }

    fn add_opaque(&mut self, name: &str, depth: usize) {
        let entry = self.opaque.entry(name.to_string()).or_insert(depth);
        *entry = (*entry).min(depth);
    }

    fn add_provisional(&mut self, name: &str) {
        self.provisional.insert(name.to_string());
    }

    fn into_focal_methods(self) -> BTreeSet<String> {
        let cutoff = self.cutoff;
        let mut focal = self.mutators;
        focal.extend(
            self.opaque
                .into_iter()
                .filter(|(_, depth)| *depth <= cutoff)
                .map(|(name, _)| name),
        );
        if cutoff == usize::MAX {
            focal.extend(self.provisional);
        }
        focal
    }
}

/// One search context per test; reuses the classifier memo across that
/// test's assertions
pub struct FocalSearch<'p> {
    program: AnalyzedProgram<'p>,
    classifier: MutationClassifier<'p>,
}

impl<'p> FocalSearch<'p> {
    pub fn new(program: AnalyzedProgram<'p>) -> Self {
        Self {
            program,
            classifier: MutationClassifier::new(program),
        }
    }

    /// Focal methods for every assertion argument of `test`
    pub fn focal_methods_of_test(&mut self, test: &str) -> BTreeSet<String> {
        let mut focal = BTreeSet::new();
        let Some(body) = self.program.body(test) else {
            return focal;
        };

        for &node in &body.assertions {
            let Some(call) = body.call_at(node) else {
                continue;
            };
            for argument in &call.arguments {
                if self.program.framework.is_assertion_type(&argument.ty) {
                    continue;
                }
                // constant expressions are tracked through the global they address
                let Some(tracked) = tracked_name(&argument.value) else {
                    continue;
                };
                focal.extend(self.find_focal_methods(body, tracked, argument.is_reference(), node));
            }
        }
        focal
    }

    /// Functions that last changed `test_var` before control reached `test_node`
    pub fn find_focal_methods(
        &mut self,
        body: &'p FunctionBody,
        test_var: &'p str,
        is_reference: bool,
        test_node: NodeId,
    ) -> BTreeSet<String> {
        let mut candidates = Candidates::default();
        let mut visited: FxHashSet<(NodeId, &'p str, bool)> = FxHashSet::default();
        let mut queue: VecDeque<TraceState<'p>> = VecDeque::new();

        let start = TraceState {
            register: test_var,
            node: test_node,
            is_reference,
            depth: 0,
        };
        follow(&mut queue, body, start, test_var, is_reference);

        while let Some(state) = queue.pop_front() {
            if state.depth > candidates.cutoff {
                continue;
            }
            if !visited.insert((state.node, state.register, state.is_reference)) {
                continue;
            }
            self.step(body, state, &mut queue, &mut candidates);
        }

        candidates.into_focal_methods()
    }

    fn step(
        &mut self,
        body: &'p FunctionBody,
        state: TraceState<'p>,
        queue: &mut VecDeque<TraceState<'p>>,
        candidates: &mut Candidates,
    ) {
        let Some(node) = body.graph.node(state.node) else {
            return;
        };
        let Some(statement) = node.statement.as_ref() else {
            follow(queue, body, state, state.register, state.is_reference);
            return;
        };
        let defines = node.assignee.as_deref() == Some(state.register);

        if let Some(call) = statement.call() {
            self.step_call(body, state, call, defines, queue, candidates);
            return;
        }

        if defines {
            match statement {
                Statement::Load { address, .. }
                | Statement::Cmpxchg { address, .. }
                | Statement::AtomicRmw { address, .. } => {
                    follow(queue, body, state, address, true);
                }
                Statement::GetElementPtr { base, .. } => follow(queue, body, state, base, true),
                Statement::Conversion { value, .. } => {
                    follow(queue, body, state, value, state.is_reference);
                }
                other => {
                    let is_reference = state.is_reference && !other.is_computation();
                    for used in other.used_registers() {
                        follow(queue, body, state, used, is_reference);
                    }
                }
            }
            return;
        }

        if state.is_reference {
            let written = match statement {
                Statement::Store {
                    ty, value, address, ..
                } => Some((ty, value, address)),
                Statement::Cmpxchg {
                    ty,
                    new_value,
                    address,
                    ..
                } => Some((ty, new_value, address)),
                Statement::AtomicRmw {
                    ty, value, address, ..
                } => Some((ty, value, address)),
                _ => None,
            };
            if let Some((ty, value, address)) = written {
                if address == state.register {
                    follow(queue, body, state, value, is_pointer_type(ty));
                    // whole value overwritten; nothing earlier reaches the assertion
                    if matches!(statement, Statement::Store { .. }) {
                        return;
                    }
                } else if derives_from(body, address, state.register) {
                    follow(queue, body, state, value, is_pointer_type(ty));
                }
            }
        }

        follow(queue, body, state, state.register, state.is_reference);
    }

    fn step_call(
        &mut self,
        body: &'p FunctionBody,
        state: TraceState<'p>,
        call: &'p Call,
        defines: bool,
        queue: &mut VecDeque<TraceState<'p>>,
        candidates: &mut Candidates,
    ) {
        // a pointer into the tracked object hands the callee the object too
        let positions: Vec<usize> = call
            .arguments
            .iter()
            .enumerate()
            .filter(|(_, argument)| {
                names(&argument.value, state.register)
                    || derives_from(body, &argument.value, state.register)
            })
            .map(|(index, _)| index)
            .collect();
        if !defines && positions.is_empty() {
            follow(queue, body, state, state.register, state.is_reference);
            return;
        }

        let callee = self.program.resolve(&call.callee);

        if is_memory_intrinsic(callee) {
            if state.is_reference && positions.contains(&0) {
                if let Some(source) = call.arguments.get(1) {
                    follow(queue, body, state, &source.value, source.is_reference());
                }
                let whole = call
                    .arguments
                    .first()
                    .is_some_and(|destination| names(&destination.value, state.register));
                if whole {
                    return;
                }
            }
            follow(queue, body, state, state.register, state.is_reference);
            return;
        }

        if self.program.is_opaque_by_policy(callee) {
            self.pass_call(body, state, call, defines, queue);
            return;
        }

        if !call.is_direct() || self.program.body(callee).is_none() {
            if call.is_direct() {
                candidates.add_opaque(callee, state.depth);
            }
            self.pass_call(body, state, call, defines, queue);
            return;
        }

        let mut verdict = if defines {
            self.classifier.classify_return(callee, 1)
        } else {
            Verdict::INSPECTOR
        };
        if state.is_reference {
            for index in positions {
                let argument = self.classifier.classify_call_argument(call, index, 1);
                verdict = verdict.merge(argument);
            }
        }

        match verdict.kind {
            MutationKind::Mutator => candidates.add_mutator(callee, state.depth),
            MutationKind::Uncertain => {
                candidates.add_provisional(callee);
                trace_arguments(queue, body, state, call);
                if !defines {
                    follow(queue, body, state, state.register, state.is_reference);
                }
            }
            MutationKind::Inspector => self.pass_call(body, state, call, defines, queue),
        }
    }

    /// Continue past a call that did not change the tracked value: a result
    /// depends on the call's arguments, anything else was merely passed in.
    fn pass_call(
        &self,
        body: &'p FunctionBody,
        state: TraceState<'p>,
        call: &'p Call,
        defines: bool,
        queue: &mut VecDeque<TraceState<'p>>,
    ) {
        if defines {
            trace_arguments(queue, body, state, call);
        } else {
            follow(queue, body, state, state.register, state.is_reference);
        }
    }
}

/// Queue `register` at every predecessor of `state.node`
fn follow<'p>(
    queue: &mut VecDeque<TraceState<'p>>,
    body: &'p FunctionBody,
    state: TraceState<'p>,
    register: &'p str,
    is_reference: bool,
) {
    let Some(register) = tracked_name(register) else {
        return;
    };
    for predecessor in body.graph.predecessors(state.node) {
        queue.push_back(TraceState {
            register,
            node: predecessor,
            is_reference,
            depth: state.depth + 1,
        });
    }
}

/// Start new roots on every register argument other than the tracked one
fn trace_arguments<'p>(
    queue: &mut VecDeque<TraceState<'p>>,
    body: &'p FunctionBody,
    state: TraceState<'p>,
    call: &'p Call,
) {
    for argument in &call.arguments {
        if !names(&argument.value, state.register) {
            follow(queue, body, state, &argument.value, argument.is_reference());
        }
    }
}

/// Does operand `value` stand for `register` itself?
fn names(value: &str, register: &str) -> bool {
    tracked_name(value) == Some(register)
}

/// Is `address` a `getelementptr`/cast of `base`?
fn derives_from(body: &FunctionBody, address: &str, base: &str) -> bool {
    let mut current = address;
    for _ in 0..ALIAS_CHAIN_LIMIT {
        // constant expression over a global
        if current != base && names(current, base) {
            return true;
        }
        match body.dataflow.definition(current) {
            Some(Provenance::ReferencedFrom(source)) | Some(Provenance::Converted(source)) => {
                if source == base {
                    return true;
                }
                current = source.as_str();
            }
            _ => return false,
        }
    }
    false
}
