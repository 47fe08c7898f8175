//! `extractvalue` / `insertvalue`

use super::super::lexer::TokenStream;
use super::super::value_reader::{is_annotation_start, is_numeric_literal, read_typed_value};
use crate::features::ir_parsing::domain::{ParseError, ParseResult, Statement};

fn read_indices(ts: &mut TokenStream<'_>) -> ParseResult<Vec<String>> {
    let mut indices = Vec::new();
    while ts.peek_is(",") && !is_annotation_start(ts) {
        ts.advance();
        let token = ts.next_token("aggregate index")?;
        if !is_numeric_literal(token.text) {
            return Err(ParseError::unexpected("aggregate index", token.text));
        }
        indices.push(token.text.to_string());
    }
    if indices.is_empty() {
        return Err(ParseError::UnexpectedEnd {
            expected: "aggregate index",
        });
    }
    Ok(indices)
}

pub fn parse_extractvalue(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, aggregate) = read_typed_value(ts)?;
    let indices = read_indices(ts)?;
    Ok(Statement::ExtractValue {
        ty,
        aggregate,
        indices,
    })
}

pub fn parse_insertvalue(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, aggregate) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, element) = read_typed_value(ts)?;
    let indices = read_indices(ts)?;
    Ok(Statement::InsertValue {
        ty,
        aggregate,
        element,
        indices,
    })
}
