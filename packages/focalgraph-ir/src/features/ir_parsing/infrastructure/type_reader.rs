//! Type expression reader
//!
//! Consumes exactly one type: primitives, named struct types, arrays,
//! vectors (scalable included), literal and packed structs, and any number of
//! pointer / `addrspace(N)` / function-parameter suffixes.

use super::lexer::{TokenKind, TokenStream};
use crate::features::ir_parsing::domain::{ParseError, ParseResult};

fn is_integer_type(word: &str) -> bool {
    word.len() > 1 && word.starts_with('i') && word[1..].bytes().all(|b| b.is_ascii_digit())
}

/// Words that can start a type
pub fn is_type_word(word: &str) -> bool {
    (word.starts_with('%') && word.len() > 1)
        || is_integer_type(word)
        || matches!(
            word,
            "void"
                | "half"
                | "bfloat"
                | "float"
                | "double"
                | "fp128"
                | "x86_fp80"
                | "ppc_fp128"
                | "x86_mmx"
                | "x86_amx"
                | "label"
                | "metadata"
                | "token"
                | "ptr"
                | "opaque"
                | "target"
        )
}

/// Read one type and return its source text
pub fn read_type<'a>(ts: &mut TokenStream<'a>) -> ParseResult<&'a str> {
    let mark = ts.position();
    let token = ts.peek().ok_or(ParseError::UnexpectedEnd { expected: "type" })?;

    match token.kind {
        TokenKind::Punct('[') | TokenKind::Punct('{') | TokenKind::Punct('<') => {
            ts.skip_balanced()?;
        }
        TokenKind::Word if is_type_word(token.text) => {
            ts.advance();
            if token.text == "target" && ts.peek_is("(") {
                ts.skip_balanced()?;
            }
        }
        _ => return Err(ParseError::unexpected("type", token.text)),
    }

    loop {
        if ts.peek_is("*") {
            ts.advance();
        } else if ts.peek_is("addrspace") && ts.peek_nth_is(1, "(") {
            ts.advance();
            ts.skip_balanced()?;
        } else if ts.peek_is("(") {
            // function type: parameter list
            ts.skip_balanced()?;
        } else {
            break;
        }
    }

    Ok(ts.text_since(mark))
}
