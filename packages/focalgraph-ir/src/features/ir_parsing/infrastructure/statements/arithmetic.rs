//! Unary and binary operators

use super::super::keywords::{is_fast_math_flag, is_float_binop, is_integer_binop, is_overflow_flag};
use super::super::lexer::TokenStream;
use super::super::value_reader::{read_typed_value, read_value};
use crate::features::ir_parsing::domain::{ParseResult, Statement};

fn read_flags(ts: &mut TokenStream<'_>) -> Vec<String> {
    let mut flags = Vec::new();
    while let Some(word) = ts.peek_text() {
        if !(is_overflow_flag(word) || is_fast_math_flag(word)) {
            break;
        }
        ts.advance();
        flags.push(word.to_string());
    }
    flags
}

/// `fneg [fast-math flags] <ty> <op>`
pub fn parse_unary(opcode: &str, ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let flags = read_flags(ts);
    let (ty, operand) = read_typed_value(ts)?;
    Ok(Statement::UnaryOp {
        opcode: opcode.to_string(),
        flags,
        ty,
        operand,
    })
}

/// `<opcode> [flags] <ty> <op1>, <op2>`, routed to the integer, float or
/// bitwise variant by opcode
pub fn parse_binary(opcode: &str, ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let flags = read_flags(ts);
    let (ty, op1) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let op2 = read_value(ts)?.to_string();
    let opcode = opcode.to_string();

    Ok(if is_integer_binop(&opcode) {
        Statement::BinOp {
            opcode,
            flags,
            ty,
            op1,
            op2,
        }
    } else if is_float_binop(&opcode) {
        Statement::FpBinOp {
            opcode,
            flags,
            ty,
            op1,
            op2,
        }
    } else {
        Statement::BitwiseBinary {
            opcode,
            flags,
            ty,
            op1,
            op2,
        }
    })
}
