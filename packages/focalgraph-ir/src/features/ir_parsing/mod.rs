// LLVM IR text parsing
//
// Hexagonal Architecture:
// - domain: Statement records, value helpers, parse errors
// - infrastructure: Lexer, type/value readers, per-family statement parsers,
//   module splitting

pub mod domain;
pub mod infrastructure;

pub use domain::{
    Argument, Call, CallKind, Diagnostic, OperandBundle, ParseError, ParseResult, Statement,
    SwitchCase,
};
pub use infrastructure::{
    logical_lines, parse_instruction, InstructionKind, LogicalLine, ModuleSource,
    ParsedInstruction, SourceLine, TokenStream,
};
