pub mod header_parser;
pub mod registry;

pub use header_parser::{parse_alias, parse_attribute_group, parse_define_header};
pub use registry::FunctionRegistry;
