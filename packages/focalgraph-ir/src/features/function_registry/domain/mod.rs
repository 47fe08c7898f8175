pub mod function;

pub use function::{CallSite, Function, Parameter};
