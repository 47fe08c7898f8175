//! Attribute and flag readers shared by call sites and define headers

use super::keywords::{is_calling_convention, is_function_attribute, is_param_attribute};
use super::lexer::{TokenKind, TokenStream};
use super::value_reader::is_numeric_literal;
use crate::features::ir_parsing::domain::ParseResult;

/// One keyword attribute with its optional argument: `align 8`, `sret(%T)`,
/// `dereferenceable(16)`, `nonnull`.
pub fn read_attribute<'a>(ts: &mut TokenStream<'a>) -> ParseResult<&'a str> {
    let mark = ts.position();
    let word = ts.next_token("attribute")?.text;
    if ts.peek_is("(") {
        ts.skip_balanced()?;
    } else if matches!(word, "align" | "alignstack")
        && ts.peek_text().is_some_and(is_numeric_literal)
    {
        ts.advance();
    }
    Ok(ts.text_since(mark))
}

pub fn read_param_attributes(ts: &mut TokenStream<'_>) -> ParseResult<Vec<String>> {
    let mut attributes = Vec::new();
    while let Some(token) = ts.peek() {
        if token.is_word() && is_param_attribute(token.text) {
            attributes.push(read_attribute(ts)?.to_string());
        } else {
            break;
        }
    }
    Ok(attributes)
}

/// Keyword attributes, `"key"="value"` string attributes and `#N` group
/// references, in any order.
pub fn read_function_attributes(ts: &mut TokenStream<'_>) -> ParseResult<Vec<String>> {
    let mut attributes = Vec::new();
    while let Some(token) = ts.peek() {
        match token.kind {
            TokenKind::Word if token.text.starts_with('#') => {
                ts.advance();
                attributes.push(token.text.to_string());
            }
            TokenKind::Word if is_function_attribute(token.text) => {
                attributes.push(read_attribute(ts)?.to_string());
            }
            TokenKind::Str => {
                let mark = ts.position();
                ts.advance();
                if ts.eat("=") {
                    ts.next_token("attribute value")?;
                }
                attributes.push(ts.text_since(mark).to_string());
            }
            _ => break,
        }
    }
    Ok(attributes)
}

/// `fastcc`, `cc 10`, ... ; `None` when the stream does not sit on one
pub fn read_calling_convention(ts: &mut TokenStream<'_>) -> ParseResult<Option<String>> {
    match ts.peek_text() {
        Some("cc") => {
            let mark = ts.position();
            ts.advance();
            ts.next_token("calling convention number")?;
            Ok(Some(ts.text_since(mark).to_string()))
        }
        Some(word) if is_calling_convention(word) => {
            ts.advance();
            Ok(Some(word.to_string()))
        }
        _ => Ok(None),
    }
}

/// `addrspace(N)` in a non-type position
pub fn read_address_space(ts: &mut TokenStream<'_>) -> ParseResult<Option<String>> {
    if ts.peek_is("addrspace") && ts.peek_nth_is(1, "(") {
        let mark = ts.position();
        ts.advance();
        ts.skip_balanced()?;
        return Ok(Some(ts.text_since(mark).to_string()));
    }
    Ok(None)
}
