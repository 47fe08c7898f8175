//! Value expression reader
//!
//! Recognizes, in order: registers and globals, literals (booleans, numbers,
//! hex floats, `null`/`none`/`undef`/`poison`, `zeroinitializer`, `c"..."`),
//! metadata, aggregate and vector constants, `blockaddress`, inline asm, and
//! constant expressions, which re-enter the type and value readers.

use super::keywords::{
    is_constant_expression, is_conversion_opcode, is_fast_math_flag, is_fcmp_predicate,
    is_icmp_predicate, is_overflow_flag,
};
use super::lexer::{Token, TokenKind, TokenStream};
use super::type_reader::read_type;
use crate::features::ir_parsing::domain::{is_global, is_register, ParseError, ParseResult};

pub fn is_numeric_literal(text: &str) -> bool {
    let body = text.strip_prefix('-').unwrap_or(text);
    body.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

/// Single-token values
pub fn is_simple_value(text: &str) -> bool {
    is_register(text)
        || is_numeric_literal(text)
        || text.starts_with("c\"")
        || matches!(
            text,
            "true" | "false" | "null" | "none" | "undef" | "poison" | "zeroinitializer"
        )
}

/// Could this token open a value (as opposed to a type)?
pub fn is_value_start(token: &Token<'_>) -> bool {
    token.is_word()
        && (is_simple_value(token.text)
            || token.text.starts_with('!')
            || is_constant_expression(token.text)
            || matches!(
                token.text,
                "blockaddress" | "dso_local_equivalent" | "no_cfi" | "asm"
            ))
}

/// Read one value and return its source text
pub fn read_value<'a>(ts: &mut TokenStream<'a>) -> ParseResult<&'a str> {
    let mark = ts.position();
    let token = ts.peek().ok_or(ParseError::UnexpectedEnd { expected: "value" })?;

    match token.kind {
        TokenKind::Punct('{') | TokenKind::Punct('[') | TokenKind::Punct('<') => {
            ts.skip_balanced()?;
        }
        TokenKind::Word => read_word_value(ts, token.text)?,
        _ => return Err(ParseError::unexpected("value", token.text)),
    }

    Ok(ts.text_since(mark))
}

fn read_word_value(ts: &mut TokenStream<'_>, text: &str) -> ParseResult<()> {
    if text.starts_with('!') {
        ts.advance();
        if ts.peek_is("{") || ts.peek_is("(") {
            ts.skip_balanced()?;
        }
        return Ok(());
    }
    if is_simple_value(text) {
        ts.advance();
        return Ok(());
    }

    match text {
        "blockaddress" | "dso_local_equivalent" | "no_cfi" => {
            ts.advance();
            if ts.peek_is("(") {
                ts.skip_balanced()?;
            } else {
                read_value(ts)?;
            }
            Ok(())
        }
        "asm" => read_inline_asm(ts).map(|_| ()),
        keyword if is_constant_expression(keyword) => read_constant_expression(ts),
        other => Err(ParseError::unexpected("value", other)),
    }
}

/// `asm [sideeffect] [alignstack] [inteldialect] [unwind] "<asm>", "<constraints>"`
pub fn read_inline_asm<'a>(ts: &mut TokenStream<'a>) -> ParseResult<&'a str> {
    let mark = ts.position();
    ts.expect("asm", "'asm'")?;
    while matches!(
        ts.peek_text(),
        Some("sideeffect" | "alignstack" | "inteldialect" | "unwind")
    ) {
        ts.advance();
    }
    expect_string(ts, "asm string")?;
    ts.expect(",", "','")?;
    expect_string(ts, "asm constraints")?;
    Ok(ts.text_since(mark))
}

fn expect_string<'a>(ts: &mut TokenStream<'a>, expected: &'static str) -> ParseResult<&'a str> {
    let token = ts.next_token(expected)?;
    if token.kind == TokenKind::Str {
        Ok(token.text)
    } else {
        Err(ParseError::unexpected(expected, token.text))
    }
}

/// Typed (`i32 %x`) or untyped (`5`) operand inside a constant expression
pub fn read_operand<'a>(ts: &mut TokenStream<'a>) -> ParseResult<&'a str> {
    let mark = ts.position();
    if ts.eat("inrange") && ts.peek_is("(") {
        ts.skip_balanced()?;
    }

    let typed_start = ts.position();
    if read_type(ts).is_ok() && read_value(ts).is_ok() {
        return Ok(ts.text_since(mark));
    }
    ts.reset(typed_start);
    read_value(ts)?;
    Ok(ts.text_since(mark))
}

fn read_constant_expression(ts: &mut TokenStream<'_>) -> ParseResult<()> {
    let keyword = ts.next_token("constant expression")?.text;

    if is_conversion_opcode(keyword) {
        while ts.peek_text().is_some_and(is_overflow_flag) {
            ts.advance();
        }
        let parenthesized = ts.eat("(");
        read_type(ts)?;
        read_value(ts)?;
        ts.expect("to", "'to'")?;
        read_type(ts)?;
        if parenthesized {
            ts.expect(")", "')'")?;
        }
        return Ok(());
    }

    let mut predicate_seen = false;
    loop {
        match ts.peek_text() {
            Some(word) if is_overflow_flag(word) || is_fast_math_flag(word) => {}
            Some("inbounds" | "nusw") => {}
            Some("inrange") if keyword == "getelementptr" => {
                ts.advance();
                if ts.peek_is("(") {
                    ts.skip_balanced()?;
                }
                continue;
            }
            Some(word)
                if !predicate_seen
                    && ((keyword == "icmp" && is_icmp_predicate(word))
                        || (keyword == "fcmp" && is_fcmp_predicate(word))) =>
            {
                predicate_seen = true;
            }
            _ => break,
        }
        ts.advance();
    }

    let parenthesized = ts.eat("(");
    read_operand(ts)?;
    while ts.peek_is(",") && !(parenthesized && ts.peek_nth_is(1, ")")) {
        if !parenthesized && is_annotation_start(ts) {
            break;
        }
        ts.advance();
        read_operand(ts)?;
    }
    if parenthesized {
        ts.expect(")", "')'")?;
    }
    Ok(())
}

/// `, align N` or `, !kind !N` after the last operand of an instruction
pub fn is_annotation_start(ts: &TokenStream<'_>) -> bool {
    ts.peek_is(",")
        && ts
            .peek_nth(1)
            .is_some_and(|t| t.text == "align" || (t.is_word() && t.text.starts_with('!')))
}

/// `<type> <value>`
pub fn read_typed_value(ts: &mut TokenStream<'_>) -> ParseResult<(String, String)> {
    let ty = read_type(ts)?.to_string();
    let value = read_value(ts)?.to_string();
    Ok((ty, value))
}

/// `label %dest`
pub fn read_label(ts: &mut TokenStream<'_>) -> ParseResult<String> {
    ts.expect("label", "'label'")?;
    Ok(read_value(ts)?.to_string())
}

/// First `@global` mentioned inside a value (e.g. the function hidden in a cast)
pub fn referenced_global(value: &str) -> Option<String> {
    if is_global(value) {
        return Some(value.to_string());
    }
    let mut ts = TokenStream::new(value).ok()?;
    while let Some(token) = ts.advance() {
        if token.is_word() && is_global(token.text) {
            return Some(token.text.to_string());
        }
    }
    None
}
