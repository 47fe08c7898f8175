//! Comparisons and value selection: `icmp`, `fcmp`, `phi`, `select`, `freeze`

use super::super::keywords::{is_fast_math_flag, is_fcmp_predicate, is_icmp_predicate};
use super::super::lexer::TokenStream;
use super::super::type_reader::read_type;
use super::super::value_reader::{read_typed_value, read_value};
use crate::features::ir_parsing::domain::{ParseError, ParseResult, Statement};

fn read_fast_math_flags(ts: &mut TokenStream<'_>) -> Vec<String> {
    let mut flags = Vec::new();
    while let Some(word) = ts.peek_text().filter(|w| is_fast_math_flag(w)) {
        ts.advance();
        flags.push(word.to_string());
    }
    flags
}

fn read_operand_pair(ts: &mut TokenStream<'_>) -> ParseResult<(String, String, String)> {
    let (ty, op1) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let op2 = read_value(ts)?.to_string();
    Ok((ty, op1, op2))
}

pub fn parse_icmp(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    ts.eat("samesign");
    let predicate = ts.next_token("icmp predicate")?.text;
    if !is_icmp_predicate(predicate) {
        return Err(ParseError::unexpected("icmp predicate", predicate));
    }
    let (ty, op1, op2) = read_operand_pair(ts)?;
    Ok(Statement::ICmp {
        predicate: predicate.to_string(),
        ty,
        op1,
        op2,
    })
}

pub fn parse_fcmp(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let flags = read_fast_math_flags(ts);
    let predicate = ts.next_token("fcmp predicate")?.text;
    if !is_fcmp_predicate(predicate) {
        return Err(ParseError::unexpected("fcmp predicate", predicate));
    }
    let (ty, op1, op2) = read_operand_pair(ts)?;
    Ok(Statement::FCmp {
        flags,
        predicate: predicate.to_string(),
        ty,
        op1,
        op2,
    })
}

/// `phi <ty> [ <val>, %label ], ...`
pub fn parse_phi(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    read_fast_math_flags(ts);
    let ty = read_type(ts)?.to_string();
    let mut incoming = Vec::new();
    loop {
        ts.expect("[", "'['")?;
        let value = read_value(ts)?.to_string();
        ts.expect(",", "','")?;
        let label = read_value(ts)?.to_string();
        ts.expect("]", "']'")?;
        incoming.push((value, label));
        if !(ts.peek_is(",") && ts.peek_nth_is(1, "[")) {
            break;
        }
        ts.advance();
    }
    Ok(Statement::Phi { ty, incoming })
}

pub fn parse_select(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    read_fast_math_flags(ts);
    let (_, condition) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (ty, if_true) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, if_false) = read_typed_value(ts)?;
    Ok(Statement::Select {
        condition,
        ty,
        if_true,
        if_false,
    })
}

pub fn parse_freeze(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, value) = read_typed_value(ts)?;
    Ok(Statement::Freeze { ty, value })
}
