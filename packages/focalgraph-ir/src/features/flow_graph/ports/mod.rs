mod call_graph_provider;

pub use call_graph_provider::CallGraphProvider;
