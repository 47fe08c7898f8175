//! Feature modules
//!
//! Each feature follows hexagonal architecture:
//! - domain: Core business logic
//! - ports: Interface definitions
//! - infrastructure: External adapters
//! - application: Use cases

pub mod data_flow;
pub mod flow_graph;
pub mod focal_inference;
pub mod function_registry;
pub mod ir_parsing;
