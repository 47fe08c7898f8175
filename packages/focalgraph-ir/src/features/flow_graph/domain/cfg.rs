/*
 * Per-function instruction graph
 *
 * One node per instruction, plus synthetic nodes for the function start and
 * for every block label. Branch targets resolve to the label node, which is
 * created on first reference (forward jumps) and reused when the label line
 * is reached.
 */

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Serialize;

use crate::features::ir_parsing::domain::Statement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EdgeId(pub usize);

#[derive(Debug, Clone, Serialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    /// `None` for the start node and block labels
    pub statement: Option<Statement>,
    /// Register defined by this instruction (`%5` in `%5 = ...`)
    pub assignee: Option<String>,
    /// 1-based source line, 0 for synthetic nodes
    pub line: usize,
    pub is_final: bool,
    pub is_test: bool,
    pub is_assertion: bool,
    pub is_start: bool,
    pub outs: Vec<EdgeId>,
    pub incs: Vec<EdgeId>,
}

impl Node {
    fn new(id: NodeId, name: String) -> Self {
        Self {
            id,
            name,
            statement: None,
            assignee: None,
            line: 0,
            is_final: false,
            is_test: false,
            is_assertion: false,
            is_start: false,
            outs: Vec::new(),
            incs: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.statement.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub source: NodeId,
    pub target: NodeId,
    pub label: Option<String>,
}

/// Instruction graph of one function
#[derive(Debug, Clone, Default)]
pub struct Graph {
    name: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    /// (source, target, label) → edge
    edge_index: FxHashMap<(NodeId, NodeId, Option<String>), EdgeId>,
    /// Block label (`%5`) → label node
    block_starts: FxHashMap<String, NodeId>,
    /// Labels whose definition line has been seen
    defined_blocks: FxHashSet<String>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fresh node; ids grow monotonically
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(id, name.into()));
        id
    }

    pub fn add_statement_node(
        &mut self,
        name: impl Into<String>,
        statement: Statement,
        assignee: Option<String>,
        line: usize,
    ) -> NodeId {
        let id = self.add_node(name);
        let node = &mut self.nodes[id.0];
        node.is_final = statement.is_final();
        node.statement = Some(statement);
        node.assignee = assignee;
        node.line = line;
        id
    }

    /// Idempotent per (source, target, label)
    pub fn add_edge(&mut self, source: NodeId, target: NodeId, label: Option<&str>) -> EdgeId {
        let key = (source, target, label.map(str::to_string));
        if let Some(&existing) = self.edge_index.get(&key) {
            return existing;
        }

        let id = EdgeId(self.edges.len());
        self.edges.push(Edge {
            source,
            target,
            label: key.2.clone(),
        });
        self.edge_index.insert(key, id);
        self.nodes[source.0].outs.push(id);
        self.nodes[target.0].incs.push(id);
        id
    }

    /// Label node for `label`, created as a placeholder if not seen yet
    pub fn block_node(&mut self, label: &str) -> NodeId {
        if let Some(&id) = self.block_starts.get(label) {
            return id;
        }
        let id = self.add_node(label);
        self.block_starts.insert(label.to_string(), id);
        id
    }

    /// The scanner reached `label:`; returns the node later jumps resolve to
    pub fn register_start_of_block(&mut self, label: &str) -> NodeId {
        self.defined_blocks.insert(label.to_string());
        self.block_node(label)
    }

    pub fn get_start_of_block(&self, label: &str) -> Option<NodeId> {
        self.block_starts.get(label).copied()
    }

    /// Labels jumped to but never defined in the body
    pub fn undefined_blocks(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self
            .block_starts
            .keys()
            .filter(|label| !self.defined_blocks.contains(*label))
            .map(String::as_str)
            .collect();
        labels.sort_unstable();
        labels
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.0)
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn predecessors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(|node| node.incs.iter())
            .map(move |edge| self.edges[edge.0].source)
    }

    pub fn successors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .get(id.0)
            .into_iter()
            .flat_map(|node| node.outs.iter())
            .map(move |edge| self.edges[edge.0].target)
    }

    /// Nodes holding a statement, in creation order
    pub fn statements(&self) -> impl Iterator<Item = (NodeId, &Statement)> {
        self.nodes
            .iter()
            .filter_map(|node| node.statement.as_ref().map(|s| (node.id, s)))
    }
}
