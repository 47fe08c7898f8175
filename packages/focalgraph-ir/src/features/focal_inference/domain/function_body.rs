//! An analyzed function: its instruction graph and data-flow table

use crate::features::data_flow::domain::DataflowTable;
use crate::features::flow_graph::domain::{Graph, NodeId};
use crate::features::ir_parsing::domain::{Call, Statement};

#[derive(Debug, Clone)]
pub struct FunctionBody {
    pub name: String,
    pub graph: Graph,
    pub dataflow: DataflowTable,
    /// Synthetic start node
    pub entry: NodeId,
    /// Assertion call nodes, in body order
    pub assertions: Vec<NodeId>,
}

impl FunctionBody {
    pub fn statement_at(&self, node: NodeId) -> Option<&Statement> {
        self.graph.node(node)?.statement.as_ref()
    }

    pub fn call_at(&self, node: NodeId) -> Option<&Call> {
        self.statement_at(node)?.call()
    }

    pub fn assignee_at(&self, node: NodeId) -> Option<&str> {
        self.graph.node(node)?.assignee.as_deref()
    }

    /// Node defining `register`, if it is an instruction result
    pub fn defining_node(&self, register: &str) -> Option<NodeId> {
        self.graph
            .nodes()
            .iter()
            .find(|node| node.assignee.as_deref() == Some(register))
            .map(|node| node.id)
    }
}
