//! Whole-program call graph
//!
//! One node per distinct function name, however many call sites mention it.
//! Edges point caller → callee.

use std::collections::VecDeque;

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, EdgeReference, NodeIndex};
use petgraph::Direction;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::features::flow_graph::ports::CallGraphProvider;

#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    graph: DiGraph<String, ()>,
    /// Function name → node index
    index: FxHashMap<String, NodeIndex>,
    tests: FxHashSet<String>,
    starts: FxHashSet<String>,
}

impl CallGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the node for `name`
    pub fn add_function(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    pub fn add_call(&mut self, caller: &str, callee: &str) {
        let from = self.add_function(caller);
        let to = self.add_function(callee);
        self.graph.update_edge(from, to, ());
    }

    pub fn mark_test(&mut self, name: &str) {
        self.add_function(name);
        self.tests.insert(name.to_string());
    }

    /// Program entry (`main`, `.text.startup` functions)
    pub fn mark_start(&mut self, name: &str) {
        self.add_function(name);
        self.starts.insert(name.to_string());
    }

    pub fn is_test(&self, name: &str) -> bool {
        self.tests.contains(name)
    }

    pub fn is_start(&self, name: &str) -> bool {
        self.starts.contains(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, name: &str, direction: Direction) -> Vec<String> {
        let Some(&idx) = self.index.get(name) else {
            return Vec::new();
        };
        // petgraph yields neighbors newest-first
        let mut names: Vec<String> = self
            .graph
            .neighbors_directed(idx, direction)
            .map(|n| self.graph[n].clone())
            .collect();
        names.reverse();
        names
    }

    /// Call hops from `root` to every reachable function (BFS)
    pub fn distances_from(&self, root: &str) -> FxHashMap<String, usize> {
        let mut distances = FxHashMap::default();
        let Some(&start) = self.index.get(root) else {
            return distances;
        };

        let mut queue = VecDeque::from([(start, 0usize)]);
        distances.insert(root.to_string(), 0);
        while let Some((idx, distance)) = queue.pop_front() {
            for next in self.graph.neighbors_directed(idx, Direction::Outgoing) {
                let name = &self.graph[next];
                if !distances.contains_key(name) {
                    distances.insert(name.clone(), distance + 1);
                    queue.push_back((next, distance + 1));
                }
            }
        }
        distances
    }

    /// DOT text; start functions green, tests blue
    pub fn to_dot(&self) -> String {
        let edge_attributes = |_: &DiGraph<String, ()>, _: EdgeReference<'_, ()>| String::new();
        let node_attributes = |_: &DiGraph<String, ()>, (_, name): (NodeIndex, &String)| {
            if self.starts.contains(name) {
                "style=filled fillcolor=green".to_string()
            } else if self.tests.contains(name) {
                "style=filled fillcolor=lightblue".to_string()
            } else {
                String::new()
            }
        };
        let dot = Dot::with_attr_getters(
            &self.graph,
            &[Config::EdgeNoLabel],
            &edge_attributes,
            &node_attributes,
        );
        format!("{dot:?}")
    }
}

impl CallGraphProvider for CallGraph {
    fn get_callees(&self, func_name: &str) -> Vec<String> {
        self.neighbors(func_name, Direction::Outgoing)
    }

    fn get_functions(&self) -> Vec<String> {
        self.graph.node_weights().cloned().collect()
    }

    fn get_callers(&self, func_name: &str) -> Vec<String> {
        self.neighbors(func_name, Direction::Incoming)
    }

    fn contains_function(&self, func_name: &str) -> bool {
        self.index.contains_key(func_name)
    }

    fn num_functions(&self) -> usize {
        self.graph.node_count()
    }
}
