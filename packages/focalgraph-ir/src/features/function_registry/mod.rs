// Function registry
//
// - domain: Function, Parameter, CallSite records
// - infrastructure: define/alias/attribute-group parsers and the registry

pub mod domain;
pub mod infrastructure;

pub use domain::{CallSite, Function, Parameter};
pub use infrastructure::FunctionRegistry;
