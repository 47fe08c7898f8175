pub mod call_graph;
pub mod dot;

pub use call_graph::CallGraph;
pub use dot::cfg_to_dot;
