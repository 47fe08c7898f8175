//! Inter-procedural mutation classifier
//!
//! Answers "does `function` change what `register` points to?" by following
//! the register through its body: aliases made by spills and reloads,
//! `getelementptr`, casts and merges are followed, a store through any of
//! them is a mutation, and passing one to another analyzed function recurses
//! into that function's parameter.
//!
//! # Termination
//! Verdicts are memoized per slot: an argument query keyed by (function,
//! register, is_reference), or a function's return value. A slot is marked
//! `Pending` while its body is inspected, and a recursive call chain that
//! reaches it again reads the slot's current assumption (first Inspector).
//! The slot that opened such a cycle is re-inspected until its verdict stops
//! changing; slots computed inside an unfinished cycle are not committed.
//! Recursion across functions is capped at `max_depth`, and a verdict cut
//! short by the cap is not committed either.

use rustc_hash::{FxHashMap, FxHashSet};

use super::program::{is_memory_intrinsic, AnalyzedProgram};
use crate::features::data_flow::domain::Provenance;
use crate::features::focal_inference::domain::{CacheSlot, FunctionBody, Verdict};
use crate::features::ir_parsing::domain::{is_register, Call};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum SlotKey {
    Argument {
        function: String,
        register: String,
        is_reference: bool,
    },
    Return(String),
}

/// A slot whose verdict is being computed
#[derive(Debug)]
struct OpenSlot {
    key: SlotKey,
    /// Lowest stack position of a pending slot read below this one
    low: usize,
    /// Deepest call hop inspected below this slot
    height: usize,
    /// Some branch below hit the depth cap
    truncated: bool,
}

/// Classifier with its memo table; one per test search
pub struct MutationClassifier<'p> {
    program: AnalyzedProgram<'p>,
    slots: FxHashMap<SlotKey, CacheSlot>,
    open: Vec<OpenSlot>,
}

fn is_read_only_attribute(attribute: &str) -> bool {
    match attribute {
        "readnone" | "readonly" => true,
        _ => attribute
            .strip_prefix("memory(")
            .is_some_and(|rest| !rest.contains("write")),
    }
}

impl<'p> MutationClassifier<'p> {
    pub fn new(program: AnalyzedProgram<'p>) -> Self {
        Self {
            program,
            slots: FxHashMap::default(),
            open: Vec::new(),
        }
    }

    /// Classify `register` inside `function`. `depth` counts call hops from
    /// the search that asked.
    pub fn is_arg_mutated(
        &mut self,
        function: &str,
        register: &str,
        is_reference: bool,
        depth: usize,
    ) -> Verdict {
        // a callee only ever sees a copy of a by-value argument
        if !is_reference {
            return Verdict::INSPECTOR;
        }
        if depth > self.program.max_depth {
            return self.depth_exceeded();
        }
        let Some(body) = self.program.body(function) else {
            self.record_hop(0);
            return Verdict::UNCERTAIN;
        };

        let key = SlotKey::Argument {
            function: body.name.clone(),
            register: register.to_string(),
            is_reference,
        };
        self.memoized(key, depth, |classifier| {
            classifier.classify_reference(body, register, depth)
        })
    }

    /// Look `key` up, or compute it with `inspect` and commit the verdict
    /// when it is final
    fn memoized(
        &mut self,
        key: SlotKey,
        depth: usize,
        inspect: impl Fn(&mut Self) -> Verdict,
    ) -> Verdict {
        let previous = self.slots.get(&key).copied();
        match previous {
            Some(CacheSlot::Pending(assumed)) => {
                let position = self.open.iter().position(|slot| slot.key == key);
                if let (Some(position), Some(top)) = (position, self.open.last_mut()) {
                    top.low = top.low.min(position);
                }
                self.record_hop(0);
                return assumed;
            }
            Some(slot @ CacheSlot::Done { height, .. }) => {
                if let Some(verdict) = slot.reusable(depth, self.program.max_depth) {
                    self.record_hop(height);
                    return verdict;
                }
            }
            None => {}
        }

        let position = self.open.len();
        let mut assumed = Verdict::INSPECTOR;
        loop {
            self.slots.insert(key.clone(), CacheSlot::Pending(assumed));
            self.open.push(OpenSlot {
                key: key.clone(),
                low: usize::MAX,
                height: 0,
                truncated: false,
            });
            let mut verdict = inspect(self);
            let Some(slot) = self.open.pop() else {
                return verdict;
            };

            // this slot opened a cycle: repeat until the assumption holds
            if slot.low == position && !verdict.kind.is_mutator() {
                let next = assumed.merge(verdict);
                if next != assumed {
                    assumed = next;
                    continue;
                }
                verdict = next;
            }
            return self.close(key, slot, verdict, position, previous);
        }
    }

    fn close(
        &mut self,
        key: SlotKey,
        slot: OpenSlot,
        verdict: Verdict,
        position: usize,
        previous: Option<CacheSlot>,
    ) -> Verdict {
        let inside_open_cycle = slot.low < position;

        #[cfg(feature = "trace")]
        tracing::debug!(
            "{:?} = {:?}{}{}",
            key,
            verdict.kind,
            if verdict.returned_by_reference { " (returned)" } else { "" },
            if inside_open_cycle || slot.truncated { " (provisional)" } else { "" }
        );

        if inside_open_cycle || slot.truncated {
            // keep a verdict committed earlier with a larger budget
            match previous {
                Some(done @ CacheSlot::Done { .. }) => self.slots.insert(key, done),
                _ => self.slots.remove(&key),
            };
            if let Some(parent) = self.open.last_mut() {
                if inside_open_cycle {
                    parent.low = parent.low.min(slot.low);
                }
                parent.truncated |= slot.truncated;
            }
        } else {
            self.slots.insert(
                key,
                CacheSlot::Done {
                    verdict,
                    height: slot.height,
                },
            );
        }
        self.record_hop(slot.height);
        verdict
    }

    /// The slot being computed looked one call hop down, `height_below`
    /// hops further
    fn record_hop(&mut self, height_below: usize) {
        if let Some(parent) = self.open.last_mut() {
            parent.height = parent.height.max(height_below + 1);
        }
    }

    fn depth_exceeded(&mut self) -> Verdict {
        if let Some(parent) = self.open.last_mut() {
            parent.truncated = true;
        }
        self.record_hop(0);
        Verdict::UNCERTAIN
    }

    /// Walk every alias of `register` inside `body`
    fn classify_reference(&mut self, body: &FunctionBody, register: &str, depth: usize) -> Verdict {
        let registry = self.program.registry;
        let mut verdict = Verdict::INSPECTOR;
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut worklist: Vec<&str> = vec![register];

        while let Some(alias) = worklist.pop() {
            if !seen.insert(alias) {
                continue;
            }
            if body.dataflow.is_stored_through(alias) {
                return Verdict {
                    returned_by_reference: verdict.returned_by_reference,
                    ..Verdict::MUTATOR
                };
            }
            if body.dataflow.is_returned(alias) {
                verdict.returned_by_reference = true;
            }

            for site in registry.call_sites(&body.name) {
                let Some(call) = body.call_at(site.node) else {
                    continue;
                };
                for (index, argument) in call.arguments.iter().enumerate() {
                    if argument.value != alias {
                        continue;
                    }
                    let argument_verdict = self.classify_call_argument(call, index, depth + 1);
                    if argument_verdict.kind.is_mutator() {
                        return Verdict {
                            returned_by_reference: verdict.returned_by_reference,
                            ..Verdict::MUTATOR
                        };
                    }
                    verdict.kind = verdict.kind.merge(argument_verdict.kind);
                    // the callee handed the reference back: its result aliases too
                    if argument_verdict.returned_by_reference {
                        if let Some(result) = body.assignee_at(site.node) {
                            worklist.push(result);
                        }
                    }
                }
            }

            for flow in body.dataflow.users(alias) {
                match &flow.provenance {
                    Provenance::StoredFrom(_) => {
                        worklist.extend(body.dataflow.reloads(&flow.register));
                    }
                    Provenance::LoadedFrom { is_pointer, .. } => {
                        if *is_pointer {
                            worklist.push(&flow.register);
                        }
                    }
                    Provenance::ReferencedFrom(_)
                    | Provenance::Converted(_)
                    | Provenance::Assigned(_) => worklist.push(&flow.register),
                    Provenance::Computed(_) | Provenance::CallResult(_) => {}
                }
            }
        }

        verdict
    }

    /// Verdict for passing argument `index` to `call`'s callee, which sits
    /// `depth` call hops away
    pub fn classify_call_argument(&mut self, call: &Call, index: usize, depth: usize) -> Verdict {
        let Some(argument) = call.arguments.get(index) else {
            return Verdict::INSPECTOR;
        };
        let callee = self.program.registry.resolve_alias(&call.callee);

        if is_memory_intrinsic(callee) {
            return if index == 0 {
                Verdict::MUTATOR
            } else {
                Verdict::INSPECTOR
            };
        }
        if !argument.is_reference() || self.program.is_opaque_by_policy(callee) {
            return Verdict::INSPECTOR;
        }
        if call.function_attributes.iter().any(|a| is_read_only_attribute(a))
            || argument.attributes.iter().any(|a| is_read_only_attribute(a))
        {
            return Verdict::INSPECTOR;
        }
        if !call.is_direct() {
            return Verdict::UNCERTAIN;
        }

        let registry = self.program.registry;
        if registry
            .function_attributes(callee)
            .iter()
            .any(|a| is_read_only_attribute(a))
        {
            return Verdict::INSPECTOR;
        }
        let Some(function) = registry.get_function(callee) else {
            return Verdict::UNCERTAIN;
        };
        let Some(parameter) = function.parameters.get(index) else {
            return Verdict::UNCERTAIN;
        };
        if parameter.is_variadic() {
            return Verdict::UNCERTAIN;
        }
        if parameter.attributes.iter().any(|a| is_read_only_attribute(a)) {
            return Verdict::INSPECTOR;
        }

        self.is_arg_mutated(callee, &parameter.register, true, depth)
    }

    /// Does `function` produce its return value, or just hand back something
    /// it read? Computed values are Mutator, reads and parameters Inspector.
    pub fn classify_return(&mut self, function: &str, depth: usize) -> Verdict {
        if depth > self.program.max_depth {
            return self.depth_exceeded();
        }
        let Some(body) = self.program.body(function) else {
            self.record_hop(0);
            return Verdict::UNCERTAIN;
        };

        let key = SlotKey::Return(body.name.clone());
        self.memoized(key, depth, |classifier| {
            let mut verdict = Verdict::INSPECTOR;
            for value in body.dataflow.returns() {
                verdict = verdict.merge(classifier.classify_produced_value(body, value, depth));
                if verdict.kind.is_mutator() {
                    break;
                }
            }
            verdict
        })
    }

    fn classify_produced_value(
        &mut self,
        body: &FunctionBody,
        value: &str,
        depth: usize,
    ) -> Verdict {
        let mut verdict = Verdict::INSPECTOR;
        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut worklist: Vec<&str> = vec![value];

        while let Some(current) = worklist.pop() {
            if !is_register(current) || !seen.insert(current) {
                continue;
            }
            match body.dataflow.definition(current) {
                // parameters, globals, allocas
                None => {}
                Some(Provenance::Computed(_)) => return Verdict::MUTATOR,
                Some(Provenance::LoadedFrom { address, .. }) => {
                    worklist.extend(body.dataflow.stored_values(address).iter().map(String::as_str));
                }
                Some(Provenance::ReferencedFrom(_)) => verdict.returned_by_reference = true,
                Some(Provenance::Converted(source)) => worklist.push(source),
                Some(Provenance::Assigned(sources)) => {
                    worklist.extend(sources.iter().map(String::as_str));
                }
                Some(Provenance::StoredFrom(_)) => {}
                Some(Provenance::CallResult(node)) => {
                    let Some(call) = body.call_at(*node) else {
                        continue;
                    };
                    let callee = self.program.registry.resolve_alias(&call.callee);
                    if self.program.is_opaque_by_policy(callee) {
                        continue;
                    }
                    let inner = if call.is_direct() {
                        self.classify_return(callee, depth + 1)
                    } else {
                        Verdict::UNCERTAIN
                    };
                    verdict.kind = verdict.kind.merge(inner.kind);
                    if verdict.kind.is_mutator() {
                        return verdict;
                    }
                }
            }
        }

        verdict
    }
}
