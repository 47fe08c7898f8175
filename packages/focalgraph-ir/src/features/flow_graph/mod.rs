// Control flow and call graphs
//
// Hexagonal Architecture:
// - domain: Per-function instruction graph with block-label resolution
// - infrastructure: petgraph-backed call graph, DOT export
// - ports: CallGraphProvider

pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use domain::{Edge, EdgeId, Graph, Node, NodeId};
pub use infrastructure::{cfg_to_dot, CallGraph};
pub use ports::CallGraphProvider;
