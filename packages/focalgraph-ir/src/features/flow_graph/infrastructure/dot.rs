//! DOT export of instruction graphs
//!
//! Start node green, final nodes as double circles, assertion calls red,
//! test entry blue.

use std::fmt::Write;

use crate::features::flow_graph::domain::{Graph, Node};

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

fn node_style(node: &Node) -> &'static str {
    if node.is_start && node.is_test {
        ", style=filled, fillcolor=lightblue"
    } else if node.is_start {
        ", style=filled, fillcolor=green"
    } else if node.is_assertion {
        ", style=filled, fillcolor=red"
    } else if node.is_final {
        ", shape=doublecircle"
    } else {
        ""
    }
}

pub fn cfg_to_dot(graph: &Graph) -> String {
    let mut out = String::new();
    // writing to a String cannot fail
    let _ = writeln!(out, "digraph \"{}\" {{", escape(graph.name()));
    for node in graph.nodes() {
        let _ = writeln!(
            out,
            "    n{} [label=\"{}\"{}];",
            node.id.0,
            escape(&node.name),
            node_style(node)
        );
    }
    for edge in graph.edges() {
        match &edge.label {
            Some(label) => {
                let _ = writeln!(
                    out,
                    "    n{} -> n{} [label=\"{}\"];",
                    edge.source.0,
                    edge.target.0,
                    escape(label)
                );
            }
            None => {
                let _ = writeln!(out, "    n{} -> n{};", edge.source.0, edge.target.0);
            }
        }
    }
    out.push_str("}\n");
    out
}
