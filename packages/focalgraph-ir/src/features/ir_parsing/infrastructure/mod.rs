pub mod attributes;
pub mod instruction_parser;
pub mod keywords;
pub mod lexer;
pub mod line_reader;
pub mod statements;
pub mod type_reader;
pub mod value_reader;

pub use instruction_parser::{parse_instruction, InstructionKind, ParsedInstruction};
pub use lexer::{Token, TokenKind, TokenStream};
pub use line_reader::{logical_lines, FunctionSource, LogicalLine, ModuleSource, SourceLine};
pub use type_reader::read_type;
pub use value_reader::{read_typed_value, read_value, referenced_global};
