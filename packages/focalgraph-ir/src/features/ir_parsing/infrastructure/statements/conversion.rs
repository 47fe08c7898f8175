//! Cast instructions: `<opcode> <ty> <value> to <ty2>`

use super::super::lexer::TokenStream;
use super::super::type_reader::read_type;
use super::super::value_reader::read_typed_value;
use crate::features::ir_parsing::domain::{ParseResult, Statement};

pub fn parse_conversion(opcode: &str, ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    // zext nneg, trunc nuw nsw
    while matches!(ts.peek_text(), Some("nneg" | "nuw" | "nsw")) {
        ts.advance();
    }
    let (from_ty, value) = read_typed_value(ts)?;
    ts.expect("to", "'to'")?;
    let to_ty = read_type(ts)?.to_string();
    Ok(Statement::Conversion {
        opcode: opcode.to_string(),
        from_ty,
        value,
        to_ty,
    })
}
