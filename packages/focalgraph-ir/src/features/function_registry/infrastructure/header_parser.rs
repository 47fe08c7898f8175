//! `define`, `alias` and `attributes` line parsers
//!
//! Header grammar, in order:
//!
//! ```text
//! define [linkage] [preemption] [visibility] [DLLStorageClass] [cconv]
//!        [ret attrs] <ResultType> @<Name> ([params]) [unnamed_addr]
//!        [addrspace(N)] [fn attrs] [section "s"] [partition "p"]
//!        [comdat [($name)]] [align N] [gc "name"] [prefix <const>]
//!        [prologue <const>] [personality <const>] (!name !N)*
//! ```

use crate::features::function_registry::domain::{Function, Parameter};
use crate::features::ir_parsing::domain::{ParseError, ParseResult};
use crate::features::ir_parsing::infrastructure::attributes::{
    read_address_space, read_attribute, read_calling_convention, read_function_attributes,
    read_param_attributes,
};
use crate::features::ir_parsing::infrastructure::keywords::{
    is_dll_storage_class, is_linkage, is_preemption, is_unnamed_addr, is_visibility,
};
use crate::features::ir_parsing::infrastructure::{
    read_type, read_typed_value, read_value, referenced_global, TokenKind, TokenStream,
};

fn eat_if(ts: &mut TokenStream<'_>, accept: fn(&str) -> bool) -> Option<String> {
    let word = ts.peek_text().filter(|w| accept(w))?;
    ts.advance();
    Some(word.to_string())
}

fn read_string<'a>(ts: &mut TokenStream<'a>, expected: &'static str) -> ParseResult<&'a str> {
    let token = ts.next_token(expected)?;
    if token.kind == TokenKind::Str {
        Ok(token.text.trim_matches('"'))
    } else {
        Err(ParseError::unexpected(expected, token.text))
    }
}

fn read_parameters(ts: &mut TokenStream<'_>) -> ParseResult<Vec<Parameter>> {
    ts.expect("(", "'('")?;
    let mut parameters = Vec::new();
    let mut unnamed = 0usize;
    while !ts.eat(")") {
        if !parameters.is_empty() {
            ts.expect(",", "','")?;
        }
        if ts.eat("...") {
            parameters.push(Parameter::variadic());
            continue;
        }

        let ty = read_type(ts)?.to_string();
        let attributes = read_param_attributes(ts)?;
        let register = match ts.peek() {
            Some(token) if token.is_word() && token.text.starts_with('%') => {
                ts.advance();
                token.text.to_string()
            }
            _ => {
                let register = format!("%{unnamed}");
                unnamed += 1;
                register
            }
        };
        parameters.push(Parameter {
            ty,
            attributes,
            register,
        });
    }
    Ok(parameters)
}

/// `<type> <constant>` as one string
fn read_typed_constant(ts: &mut TokenStream<'_>) -> ParseResult<String> {
    let (ty, value) = read_typed_value(ts)?;
    Ok(format!("{ty} {value}"))
}

/// Parse a `define` line (without its opening brace)
pub fn parse_define_header(header: &str) -> ParseResult<Function> {
    let mut ts = TokenStream::new(header)?;
    ts.expect("define", "'define'")?;

    let linkage = eat_if(&mut ts, is_linkage);
    let preemption = eat_if(&mut ts, is_preemption);
    let visibility = eat_if(&mut ts, is_visibility);
    let dll_storage_class = eat_if(&mut ts, is_dll_storage_class);
    let calling_convention = read_calling_convention(&mut ts)?;
    let return_attributes = read_param_attributes(&mut ts)?;
    let return_type = read_type(&mut ts)?.to_string();

    let name = ts.next_token("function name")?;
    if !name.text.starts_with('@') {
        return Err(ParseError::unexpected("function name", name.text));
    }

    let mut function = Function::new(name.text, return_type);
    function.linkage = linkage;
    if let Some(preemption) = preemption {
        function.preemption = preemption;
    }
    function.visibility = visibility;
    function.dll_storage_class = dll_storage_class;
    if let Some(cc) = calling_convention {
        function.calling_convention = cc;
    }
    function.return_attributes = return_attributes;
    function.parameters = read_parameters(&mut ts)?;
    function.unnamed_addr = eat_if(&mut ts, is_unnamed_addr);
    function.address_space = read_address_space(&mut ts)?;
    function.attributes = read_function_attributes(&mut ts)?;

    while let Some(keyword) = ts.peek_text() {
        match keyword {
            "section" => {
                ts.advance();
                function.section = Some(read_string(&mut ts, "section name")?.to_string());
            }
            "partition" => {
                ts.advance();
                function.partition = Some(read_string(&mut ts, "partition name")?.to_string());
            }
            "comdat" => {
                ts.advance();
                function.comdat = Some(if ts.peek_is("(") {
                    ts.skip_balanced()?
                        .trim_start_matches('(')
                        .trim_end_matches(')')
                        .trim()
                        .to_string()
                } else {
                    function.name.replacen('@', "$", 1)
                });
            }
            "align" => {
                ts.advance();
                function.alignment = Some(ts.next_token("alignment")?.text.to_string());
            }
            "gc" => {
                ts.advance();
                function.gc = Some(read_string(&mut ts, "gc name")?.to_string());
            }
            "prefix" => {
                ts.advance();
                function.prefix = Some(read_typed_constant(&mut ts)?);
            }
            "prologue" => {
                ts.advance();
                function.prologue = Some(read_typed_constant(&mut ts)?);
            }
            "personality" => {
                ts.advance();
                function.personality = Some(read_typed_constant(&mut ts)?);
            }
            kind if kind.starts_with('!') => {
                ts.advance();
                let node = read_value(&mut ts)?.to_string();
                function.metadata.push((kind.to_string(), node));
            }
            _ => {
                // late function attributes (e.g. after a section)
                let before = ts.position();
                function.attributes.extend(read_function_attributes(&mut ts)?);
                if ts.position() == before {
                    break;
                }
            }
        }
    }

    ts.finish("define header")?;
    Ok(function)
}

/// `@alias = [linkage] ... alias <ty>, <ty>* @aliasee` → (alias, aliasee)
pub fn parse_alias(line: &str) -> ParseResult<(String, String)> {
    let mut ts = TokenStream::new(line)?;
    let name = ts.next_token("alias name")?.text.to_string();
    ts.expect("=", "'='")?;
    while !ts.eat("alias") {
        ts.next_token("'alias'")?;
    }
    read_type(&mut ts)?;
    ts.expect(",", "','")?;
    let (_, aliasee) = read_typed_value(&mut ts)?;
    let target = referenced_global(&aliasee).ok_or_else(|| ParseError::unexpected("aliasee", &aliasee))?;
    Ok((name, target))
}

/// `attributes #0 = { ... }` → ("#0", attributes)
pub fn parse_attribute_group(line: &str) -> ParseResult<(String, Vec<String>)> {
    let mut ts = TokenStream::new(line)?;
    ts.expect("attributes", "'attributes'")?;
    let id = ts.next_token("attribute group id")?.text.to_string();
    ts.expect("=", "'='")?;
    ts.expect("{", "'{'")?;

    let mut attributes = Vec::new();
    while !ts.eat("}") {
        let mut known = read_function_attributes(&mut ts)?;
        if known.is_empty() {
            // keywords not tracked individually, kept verbatim
            known.push(read_attribute(&mut ts)?.to_string());
        }
        attributes.extend(known);
    }
    ts.finish("attribute group")?;
    Ok((id, attributes))
}
