//! Terminators that end a block without calling: `ret`, `br`, `switch`,
//! `indirectbr`, `resume`, `unreachable`

use super::super::lexer::TokenStream;
use super::super::type_reader::read_type;
use super::super::value_reader::{read_label, read_typed_value, read_value};
use crate::features::ir_parsing::domain::{ParseResult, Statement, SwitchCase};

pub fn parse_ret(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let ty = read_type(ts)?.to_string();
    if ty == "void" {
        return Ok(Statement::Ret { ty, value: None });
    }
    let value = read_value(ts)?.to_string();
    Ok(Statement::Ret {
        ty,
        value: Some(value),
    })
}

pub fn parse_br(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    if ts.peek_is("label") {
        let if_true = read_label(ts)?;
        return Ok(Statement::Br {
            condition: None,
            if_true,
            if_false: None,
        });
    }

    let (_, condition) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let if_true = read_label(ts)?;
    let if_false = if ts.eat(",") {
        Some(read_label(ts)?)
    } else {
        None
    };
    Ok(Statement::Br {
        condition: Some(condition),
        if_true,
        if_false,
    })
}

/// `switch i32 %v, label %default [ i32 0, label %a  i32 1, label %b ]`
pub fn parse_switch(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, value) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let default = read_label(ts)?;
    ts.expect("[", "'['")?;

    let mut cases = Vec::new();
    while !ts.eat("]") {
        let (case_ty, case_value) = read_typed_value(ts)?;
        ts.expect(",", "','")?;
        let label = read_label(ts)?;
        cases.push(SwitchCase {
            ty: case_ty,
            value: case_value,
            label,
        });
    }

    Ok(Statement::Switch {
        ty,
        value,
        default,
        cases,
    })
}

/// `indirectbr ptr %addr, [ label %a, label %b ]`
pub fn parse_indirectbr(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, address) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    ts.expect("[", "'['")?;
    let mut destinations = Vec::new();
    while !ts.eat("]") {
        if !destinations.is_empty() {
            ts.expect(",", "','")?;
        }
        destinations.push(read_label(ts)?);
    }
    Ok(Statement::IndirectBr {
        ty,
        address,
        destinations,
    })
}

pub fn parse_resume(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, value) = read_typed_value(ts)?;
    Ok(Statement::Resume { ty, value })
}
