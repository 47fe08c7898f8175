//! `extractelement`, `insertelement`, `shufflevector`

use super::super::lexer::TokenStream;
use super::super::value_reader::read_typed_value;
use crate::features::ir_parsing::domain::{ParseResult, Statement};

pub fn parse_extractelement(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, vector) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, index) = read_typed_value(ts)?;
    Ok(Statement::ExtractElement { ty, vector, index })
}

pub fn parse_insertelement(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, vector) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, element) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, index) = read_typed_value(ts)?;
    Ok(Statement::InsertElement {
        ty,
        vector,
        element,
        index,
    })
}

pub fn parse_shufflevector(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (ty, v1) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, v2) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, mask) = read_typed_value(ts)?;
    Ok(Statement::ShuffleVector { ty, v1, v2, mask })
}
