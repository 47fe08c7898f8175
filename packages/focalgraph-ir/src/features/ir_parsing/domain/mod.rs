mod errors;
pub mod statement;
pub mod values;

pub use errors::{Diagnostic, ParseError, ParseResult};
pub use statement::{Argument, Call, CallKind, OperandBundle, Statement, SwitchCase};
pub use values::{
    has_attribute, is_global, is_pointer_type, is_register, label_register, tracked_name,
};
