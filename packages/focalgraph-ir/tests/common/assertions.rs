//! Custom assertions for test verification
//!
//! Domain-specific checks over analysis results and instruction graphs.

#![allow(dead_code)]

use std::collections::BTreeSet;

use focalgraph_ir::features::flow_graph::Graph;
use focalgraph_ir::{FocalMethodAnalyzer, FocalMethodMap};

/// Assert the focal set of `test` is exactly `expected`
pub fn assert_focal_methods(focal: &FocalMethodMap, test: &str, expected: &[&str]) {
    let Some(methods) = focal.get(test) else {
        panic!(
            "Expected {test} in the result, got tests: {:?}",
            focal.keys().collect::<Vec<_>>()
        );
    };
    let expected: BTreeSet<String> = expected.iter().map(|s| s.to_string()).collect();
    pretty_assertions::assert_eq!(methods, &expected, "focal methods of {test}");
}

/// Assert the last run skipped no lines
pub fn assert_no_diagnostics(analyzer: &FocalMethodAnalyzer) {
    assert!(
        analyzer.diagnostics().is_empty(),
        "Expected no diagnostics, got: {:?}",
        analyzer.diagnostics()
    );
}

/// Assert every edge joins two existing nodes and is listed on both ends
pub fn assert_edges_consistent(graph: &Graph) {
    for (index, edge) in graph.edges().iter().enumerate() {
        let source = graph
            .node(edge.source)
            .unwrap_or_else(|| panic!("{}: edge {index} has no source node", graph.name()));
        let target = graph
            .node(edge.target)
            .unwrap_or_else(|| panic!("{}: edge {index} has no target node", graph.name()));
        assert!(
            source.outs.iter().any(|id| id.0 == index),
            "{}: edge {index} missing from its source's outs",
            graph.name()
        );
        assert!(
            target.incs.iter().any(|id| id.0 == index),
            "{}: edge {index} missing from its target's incs",
            graph.name()
        );
    }
}

/// Assert every jumped-to label was defined in the body
pub fn assert_blocks_resolved(graph: &Graph) {
    assert!(
        graph.undefined_blocks().is_empty(),
        "{}: undefined blocks {:?}",
        graph.name(),
        graph.undefined_blocks()
    );
}

/// Assert exactly one node carries each block label
pub fn assert_one_node_per_label(graph: &Graph) {
    let mut seen = BTreeSet::new();
    for node in graph.nodes().iter().filter(|n| n.is_placeholder()) {
        assert!(
            seen.insert(node.name.clone()),
            "{}: label {} has more than one node",
            graph.name(),
            node.name
        );
    }
}
