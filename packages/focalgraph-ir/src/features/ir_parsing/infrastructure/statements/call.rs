//! Call-like instructions: `call`, `invoke`, `callbr`
//!
//! All three share the same core: calling convention, return attributes,
//! return type, callee, argument list, function attributes and operand
//! bundles. Casts around the callee are peeled so the call site names the
//! function actually reached.

use super::super::attributes::{
    read_address_space, read_calling_convention, read_function_attributes, read_param_attributes,
};
use super::super::keywords::{is_conversion_opcode, is_fast_math_flag};
use super::super::lexer::{TokenKind, TokenStream};
use super::super::type_reader::read_type;
use super::super::value_reader::{
    is_value_start, read_inline_asm, read_label, read_typed_value, read_value, referenced_global,
};
use crate::features::ir_parsing::domain::{
    Argument, Call, OperandBundle, ParseError, ParseResult, Statement,
};

fn read_callee(ts: &mut TokenStream<'_>) -> ParseResult<String> {
    match ts.peek_text() {
        Some("asm") => Ok(read_inline_asm(ts)?.to_string()),
        Some(word) if is_conversion_opcode(word) => {
            let value = read_value(ts)?;
            Ok(referenced_global(value).unwrap_or_else(|| value.to_string()))
        }
        _ => Ok(read_value(ts)?.to_string()),
    }
}

fn read_argument(ts: &mut TokenStream<'_>) -> ParseResult<Argument> {
    let ty = read_type(ts)?.to_string();
    let attributes = read_param_attributes(ts)?;

    // `metadata i32* %x` wraps a typed value
    let value = if ty == "metadata" && !ts.peek().is_some_and(|t| is_value_start(&t)) {
        let (inner_ty, inner_value) = read_typed_value(ts)?;
        format!("{inner_ty} {inner_value}")
    } else {
        read_value(ts)?.to_string()
    };

    Ok(Argument {
        ty,
        attributes,
        value,
    })
}

fn read_arguments(ts: &mut TokenStream<'_>) -> ParseResult<Vec<Argument>> {
    ts.expect("(", "'('")?;
    let mut arguments = Vec::new();
    while !ts.eat(")") {
        if !arguments.is_empty() {
            ts.expect(",", "','")?;
        }
        if ts.eat("...") {
            continue;
        }
        arguments.push(read_argument(ts)?);
    }
    Ok(arguments)
}

/// `[ "tag"(ty val, ...), ... ]`
fn read_operand_bundles(ts: &mut TokenStream<'_>) -> ParseResult<Vec<OperandBundle>> {
    let mut bundles = Vec::new();
    if !ts.eat("[") {
        return Ok(bundles);
    }
    while !ts.eat("]") {
        if !bundles.is_empty() {
            ts.expect(",", "','")?;
        }
        let tag = ts.next_token("operand bundle tag")?;
        if tag.kind != TokenKind::Str {
            return Err(ParseError::unexpected("operand bundle tag", tag.text));
        }
        ts.expect("(", "'('")?;
        let mut operands = Vec::new();
        while !ts.eat(")") {
            if !operands.is_empty() {
                ts.expect(",", "','")?;
            }
            operands.push(read_typed_value(ts)?);
        }
        bundles.push(OperandBundle {
            tag: tag.text.trim_matches('"').to_string(),
            operands,
        });
    }
    Ok(bundles)
}

fn read_call(ts: &mut TokenStream<'_>, tail: Option<String>) -> ParseResult<Call> {
    let mut fast_math_flags = Vec::new();
    while let Some(word) = ts.peek_text().filter(|w| is_fast_math_flag(w)) {
        ts.advance();
        fast_math_flags.push(word.to_string());
    }
    let calling_convention = read_calling_convention(ts)?;
    let return_attributes = read_param_attributes(ts)?;
    let address_space = read_address_space(ts)?;
    let return_type = read_type(ts)?.to_string();
    let callee = read_callee(ts)?;
    let arguments = read_arguments(ts)?;
    let function_attributes = read_function_attributes(ts)?;
    let operand_bundles = read_operand_bundles(ts)?;

    Ok(Call {
        tail,
        fast_math_flags,
        calling_convention,
        return_attributes,
        address_space,
        return_type,
        callee,
        arguments,
        function_attributes,
        operand_bundles,
    })
}

pub fn parse_call(ts: &mut TokenStream<'_>, tail: Option<String>) -> ParseResult<Statement> {
    Ok(Statement::Call(read_call(ts, tail)?))
}

/// `invoke ... to label %normal unwind label %lpad`
pub fn parse_invoke(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let call = read_call(ts, None)?;
    ts.expect("to", "'to'")?;
    let normal = read_label(ts)?;
    ts.expect("unwind", "'unwind'")?;
    let unwind = read_label(ts)?;
    Ok(Statement::Invoke {
        call,
        normal,
        unwind,
    })
}

/// `callbr ... to label %fallthrough [label %indirect, ...]`
pub fn parse_callbr(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let call = read_call(ts, None)?;
    ts.expect("to", "'to'")?;
    let fallthrough = read_label(ts)?;
    ts.expect("[", "'['")?;
    let mut indirect = Vec::new();
    while !ts.eat("]") {
        if !indirect.is_empty() {
            ts.expect(",", "','")?;
        }
        indirect.push(read_label(ts)?);
    }
    Ok(Statement::CallBr {
        call,
        fallthrough,
        indirect,
    })
}
