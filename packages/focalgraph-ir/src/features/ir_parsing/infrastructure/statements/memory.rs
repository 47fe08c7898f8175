//! Memory access and addressing: `load`, `store`, `cmpxchg`, `atomicrmw`,
//! `getelementptr`

use super::super::keywords::is_atomic_ordering;
use super::super::lexer::TokenStream;
use super::super::type_reader::read_type;
use super::super::value_reader::{is_annotation_start, read_typed_value};
use crate::features::ir_parsing::domain::{ParseResult, Statement};

/// `volatile` / `atomic` qualifiers in either order
fn read_qualifiers(ts: &mut TokenStream<'_>) -> (bool, bool) {
    let mut volatile = false;
    let mut atomic = false;
    loop {
        if ts.eat("volatile") {
            volatile = true;
        } else if ts.eat("atomic") {
            atomic = true;
        } else {
            return (volatile, atomic);
        }
    }
}

/// `[syncscope("...")] <ordering>...`
fn skip_ordering(ts: &mut TokenStream<'_>) -> ParseResult<()> {
    if ts.eat("syncscope") {
        ts.skip_balanced()?;
    }
    while ts.peek_text().is_some_and(is_atomic_ordering) {
        ts.advance();
    }
    Ok(())
}

pub fn parse_load(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (volatile, atomic) = read_qualifiers(ts);
    let ty = read_type(ts)?.to_string();
    ts.expect(",", "','")?;
    let (address_ty, address) = read_typed_value(ts)?;
    skip_ordering(ts)?;
    Ok(Statement::Load {
        volatile,
        atomic,
        ty,
        address_ty,
        address,
    })
}

pub fn parse_store(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let (volatile, atomic) = read_qualifiers(ts);
    let (ty, value) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (address_ty, address) = read_typed_value(ts)?;
    skip_ordering(ts)?;
    Ok(Statement::Store {
        volatile,
        atomic,
        ty,
        value,
        address_ty,
        address,
    })
}

/// `cmpxchg [weak] [volatile] ptr %p, i32 %cmp, i32 %new [syncscope] <ord> <ord>`
pub fn parse_cmpxchg(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let weak = ts.eat("weak");
    let volatile = ts.eat("volatile");
    let (_, address) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (ty, compare) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (_, new_value) = read_typed_value(ts)?;
    skip_ordering(ts)?;
    Ok(Statement::Cmpxchg {
        weak,
        volatile,
        address,
        compare,
        ty,
        new_value,
    })
}

/// `atomicrmw [volatile] <op> ptr %p, i32 %v [syncscope] <ord>`
pub fn parse_atomicrmw(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let volatile = ts.eat("volatile");
    let operation = ts.next_token("atomicrmw operation")?.text.to_string();
    let (_, address) = read_typed_value(ts)?;
    ts.expect(",", "','")?;
    let (ty, value) = read_typed_value(ts)?;
    skip_ordering(ts)?;
    Ok(Statement::AtomicRmw {
        volatile,
        operation,
        address,
        ty,
        value,
    })
}

/// `getelementptr [inbounds] <ty>, <ty>* %base, <ty> <idx>, ...`
pub fn parse_getelementptr(ts: &mut TokenStream<'_>) -> ParseResult<Statement> {
    let mut inbounds = false;
    loop {
        match ts.peek_text() {
            Some("inbounds") => inbounds = true,
            Some("nusw" | "nuw") => {}
            Some("inrange") if ts.peek_nth_is(1, "(") => {
                ts.advance();
                ts.skip_balanced()?;
                continue;
            }
            _ => break,
        }
        ts.advance();
    }

    let source_ty = read_type(ts)?.to_string();
    ts.expect(",", "','")?;
    let (base_ty, base) = read_typed_value(ts)?;

    let mut indices = Vec::new();
    while ts.peek_is(",") && !is_annotation_start(ts) {
        ts.advance();
        ts.eat("inrange");
        indices.push(read_typed_value(ts)?);
    }

    Ok(Statement::GetElementPtr {
        inbounds,
        source_ty,
        base_ty,
        base,
        indices,
    })
}
