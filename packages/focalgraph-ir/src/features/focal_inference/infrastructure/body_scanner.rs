//! Linear body scan
//!
//! Walks the logical lines of one `define` body once, top to bottom, and
//! produces its instruction graph and data-flow table. All scan state lives in
//! [`AnalysisContext`], which is created per function and consumed at the end,
//! so nothing leaks from one body into the next.

use tracing::{debug, warn};

use crate::features::data_flow::domain::{DataflowTable, Provenance};
use crate::features::flow_graph::domain::{Graph, NodeId};
use crate::features::flow_graph::infrastructure::CallGraph;
use crate::features::focal_inference::domain::FunctionBody;
use crate::features::focal_inference::ports::TestFramework;
use crate::features::function_registry::{CallSite, FunctionRegistry};
use crate::features::ir_parsing::domain::{is_pointer_type, label_register, Diagnostic, Statement};
use crate::features::ir_parsing::infrastructure::{
    logical_lines, parse_instruction, FunctionSource, LogicalLine, SourceLine,
};

/// Everything one body scan produced
#[derive(Debug)]
pub struct ScanOutcome {
    pub body: FunctionBody,
    /// Direct callees in first-call order, without duplicates
    pub callees: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Scan state for one function
struct AnalysisContext<'a> {
    function: &'a str,
    framework: &'a dyn TestFramework,
    graph: Graph,
    dataflow: DataflowTable,
    entry: NodeId,
    /// Node control falls through from; `None` right after a terminator
    previous: Option<NodeId>,
    assertions: Vec<NodeId>,
    callees: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> AnalysisContext<'a> {
    fn new(function: &'a str, framework: &'a dyn TestFramework) -> Self {
        let mut graph = Graph::new(function);
        let entry = graph.add_node(function);
        if let Some(node) = graph.node_mut(entry) {
            node.is_start = true;
            node.is_test = framework.is_test_function(function);
        }
        Self {
            function,
            framework,
            graph,
            dataflow: DataflowTable::new(),
            entry,
            previous: Some(entry),
            assertions: Vec::new(),
            callees: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    fn enter_block(&mut self, label: &str) {
        let node = self.graph.register_start_of_block(label);
        if let Some(previous) = self.previous {
            self.graph.add_edge(previous, node, None);
        }
        self.previous = Some(node);
    }

    fn scan_instruction(
        &mut self,
        line: &SourceLine,
        registry: &mut FunctionRegistry,
        call_graph: &mut CallGraph,
    ) {
        let parsed = match parse_instruction(&line.text) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!("{}:{}: skipping '{}': {}", self.function, line.number, line.text, err);
                self.diagnostics
                    .push(Diagnostic::new(Some(self.function), line.number, &err));
                return;
            }
        };

        let Some(statement) = parsed.statement else {
            debug!("{}:{}: no data flow in {:?}", self.function, line.number, parsed.kind);
            return;
        };

        let node = self.graph.add_statement_node(
            line.text.as_str(),
            statement,
            parsed.assignee,
            line.number,
        );
        if let Some(previous) = self.previous {
            self.graph.add_edge(previous, node, None);
        }

        let Some(current) = self.graph.node(node) else {
            return;
        };
        let Some(statement) = current.statement.as_ref() else {
            return;
        };
        record_dataflow(
            &mut self.dataflow,
            node,
            current.assignee.as_deref(),
            statement,
        );

        let successors = statement.successors();
        let is_terminator = statement.is_terminator();
        let call = statement
            .call()
            .zip(statement.call_kind())
            .map(|(call, kind)| (call.callee.clone(), call.is_direct(), kind));

        if let Some((callee, is_direct, kind)) = call {
            registry.add_call_site(
                self.function,
                CallSite {
                    node,
                    kind,
                    callee: callee.clone(),
                },
            );
            if is_direct {
                let resolved = registry.resolve_alias(&callee).to_string();
                call_graph.add_call(self.function, &resolved);
                if self.framework.is_assertion_function(&callee) {
                    if let Some(node) = self.graph.node_mut(node) {
                        node.is_assertion = true;
                    }
                    self.assertions.push(node);
                }
                if !self.callees.contains(&callee) {
                    self.callees.push(callee);
                }
            }
        }

        for (label, edge_label) in successors {
            let target = self.graph.block_node(&label_register(&label));
            self.graph.add_edge(node, target, edge_label.as_deref());
        }

        self.previous = if is_terminator { None } else { Some(node) };
    }

    fn finish(self) -> ScanOutcome {
        for label in self.graph.undefined_blocks() {
            debug!("{}: jump to undefined block {}", self.function, label);
        }
        ScanOutcome {
            body: FunctionBody {
                name: self.function.to_string(),
                graph: self.graph,
                dataflow: self.dataflow,
                entry: self.entry,
                assertions: self.assertions,
            },
            callees: self.callees,
            diagnostics: self.diagnostics,
        }
    }
}

/// Record what `statement` at `node` contributes to the data-flow table
fn record_dataflow(
    table: &mut DataflowTable,
    node: NodeId,
    assignee: Option<&str>,
    statement: &Statement,
) {
    let owned = |values: Vec<&str>| values.into_iter().map(str::to_string).collect::<Vec<_>>();

    let provenance = match statement {
        Statement::Store { value, address, .. } => {
            table.record_store(address, value);
            None
        }
        Statement::Cmpxchg {
            address,
            new_value: value,
            ty,
            ..
        }
        | Statement::AtomicRmw {
            address, value, ty, ..
        } => {
            table.record_store(address, value);
            Some(Provenance::LoadedFrom {
                address: address.clone(),
                is_pointer: is_pointer_type(ty),
            })
        }
        Statement::Ret {
            value: Some(value), ..
        } => {
            table.record_return(value);
            None
        }
        Statement::Load { ty, address, .. } => Some(Provenance::LoadedFrom {
            address: address.clone(),
            is_pointer: is_pointer_type(ty),
        }),
        Statement::GetElementPtr { base, .. } => Some(Provenance::ReferencedFrom(base.clone())),
        Statement::Conversion { value, .. } => Some(Provenance::Converted(value.clone())),
        Statement::Call(_) | Statement::Invoke { .. } | Statement::CallBr { .. } => {
            Some(Provenance::CallResult(node))
        }
        other if other.is_computation() => Some(Provenance::Computed(owned(other.used_values()))),
        other => Some(Provenance::Assigned(owned(other.used_registers()))),
    };

    if let (Some(register), Some(provenance)) = (assignee, provenance) {
        table.record(register, provenance);
    }
}

/// Scan one function body, recording its call sites in `registry` and its
/// calls in `call_graph`
pub fn scan_function_body(
    function: &str,
    source: &FunctionSource,
    framework: &dyn TestFramework,
    registry: &mut FunctionRegistry,
    call_graph: &mut CallGraph,
) -> ScanOutcome {
    let mut context = AnalysisContext::new(function, framework);

    for line in logical_lines(&source.body) {
        match line {
            LogicalLine::Label(label) => context.enter_block(&label),
            LogicalLine::Instruction(line) => {
                context.scan_instruction(&line, registry, call_graph)
            }
        }
    }

    let outcome = context.finish();
    debug!(
        "{}: {} nodes, {} assertions, {} callees",
        function,
        outcome.body.graph.len(),
        outcome.body.assertions.len(),
        outcome.callees.len()
    );
    outcome
}
