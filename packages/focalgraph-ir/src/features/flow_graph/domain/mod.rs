pub mod cfg;

pub use cfg::{Edge, EdgeId, Graph, Node, NodeId};
