//! Instruction line dispatch
//!
//! A line is split into an optional `%reg =` assignee and an instruction
//! keyword; the keyword is mapped once to an [`InstructionKind`] and the
//! matching family parser consumes the rest. Recognized instructions the
//! analysis has no use for parse to `None`.

use super::keywords::{is_conversion_opcode, is_tail_marker};
use super::lexer::TokenStream;
use super::statements::{aggregate, arithmetic, call, conversion, memory, other, terminator, vector};
use super::value_reader::read_value;
use crate::features::ir_parsing::domain::{ParseError, ParseResult, Statement};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionKind {
    // Terminators
    Ret,
    Br,
    Switch,
    IndirectBr,
    Invoke,
    CallBr,
    Resume,
    Unreachable,
    CatchSwitch,
    CatchRet,
    CleanupRet,
    // Operators
    UnaryOp,
    BinaryOp,
    ExtractElement,
    InsertElement,
    ShuffleVector,
    ExtractValue,
    InsertValue,
    // Memory
    Alloca,
    Load,
    Store,
    Fence,
    Cmpxchg,
    AtomicRmw,
    GetElementPtr,
    Conversion,
    // Other
    ICmp,
    FCmp,
    Phi,
    Select,
    Freeze,
    Call,
    VaArg,
    LandingPad,
    CatchPad,
    CleanupPad,
}

impl InstructionKind {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let kind = match keyword {
            "ret" => Self::Ret,
            "br" => Self::Br,
            "switch" => Self::Switch,
            "indirectbr" => Self::IndirectBr,
            "invoke" => Self::Invoke,
            "callbr" => Self::CallBr,
            "resume" => Self::Resume,
            "unreachable" => Self::Unreachable,
            "catchswitch" => Self::CatchSwitch,
            "catchret" => Self::CatchRet,
            "cleanupret" => Self::CleanupRet,
            "fneg" => Self::UnaryOp,
            "add" | "sub" | "mul" | "udiv" | "sdiv" | "urem" | "srem" | "fadd" | "fsub"
            | "fmul" | "fdiv" | "frem" | "shl" | "lshr" | "ashr" | "and" | "or" | "xor" => {
                Self::BinaryOp
            }
            "extractelement" => Self::ExtractElement,
            "insertelement" => Self::InsertElement,
            "shufflevector" => Self::ShuffleVector,
            "extractvalue" => Self::ExtractValue,
            "insertvalue" => Self::InsertValue,
            "alloca" => Self::Alloca,
            "load" => Self::Load,
            "store" => Self::Store,
            "fence" => Self::Fence,
            "cmpxchg" => Self::Cmpxchg,
            "atomicrmw" => Self::AtomicRmw,
            "getelementptr" => Self::GetElementPtr,
            word if is_conversion_opcode(word) => Self::Conversion,
            "icmp" => Self::ICmp,
            "fcmp" => Self::FCmp,
            "phi" => Self::Phi,
            "select" => Self::Select,
            "freeze" => Self::Freeze,
            "call" => Self::Call,
            "va_arg" => Self::VaArg,
            "landingpad" => Self::LandingPad,
            "catchpad" => Self::CatchPad,
            "cleanuppad" => Self::CleanupPad,
            _ => return None,
        };
        Some(kind)
    }

    /// Recognized, but contributes nothing to the analysis
    pub fn is_skipped(self) -> bool {
        matches!(
            self,
            Self::Alloca
                | Self::Fence
                | Self::VaArg
                | Self::LandingPad
                | Self::CatchSwitch
                | Self::CatchRet
                | Self::CleanupRet
                | Self::CatchPad
                | Self::CleanupPad
        )
    }
}

/// One parsed instruction line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedInstruction {
    pub assignee: Option<String>,
    pub kind: InstructionKind,
    /// `None` for recognized instructions without data-flow effect (`alloca`, `fence`, ...)
    pub statement: Option<Statement>,
}

pub fn parse_instruction(line: &str) -> ParseResult<ParsedInstruction> {
    let mut ts = TokenStream::new(line)?;

    let assignee = match ts.peek() {
        Some(token) if token.text.starts_with('%') && ts.peek_nth_is(1, "=") => {
            ts.advance();
            ts.advance();
            Some(token.text.to_string())
        }
        _ => None,
    };

    let mut keyword = ts.next_token("instruction")?.text;
    let mut tail = None;
    if is_tail_marker(keyword) {
        tail = Some(keyword.to_string());
        keyword = ts.expect("call", "'call'")?.text;
    }

    let kind = InstructionKind::from_keyword(keyword)
        .ok_or_else(|| ParseError::UnknownInstruction(keyword.to_string()))?;

    let statement = match kind {
        InstructionKind::Ret => Some(terminator::parse_ret(&mut ts)?),
        InstructionKind::Br => Some(terminator::parse_br(&mut ts)?),
        InstructionKind::Switch => Some(terminator::parse_switch(&mut ts)?),
        InstructionKind::IndirectBr => Some(terminator::parse_indirectbr(&mut ts)?),
        InstructionKind::Invoke => Some(call::parse_invoke(&mut ts)?),
        InstructionKind::CallBr => Some(call::parse_callbr(&mut ts)?),
        InstructionKind::Resume => Some(terminator::parse_resume(&mut ts)?),
        InstructionKind::Unreachable => Some(Statement::Unreachable),
        InstructionKind::UnaryOp => Some(arithmetic::parse_unary(keyword, &mut ts)?),
        InstructionKind::BinaryOp => Some(arithmetic::parse_binary(keyword, &mut ts)?),
        InstructionKind::ExtractElement => Some(vector::parse_extractelement(&mut ts)?),
        InstructionKind::InsertElement => Some(vector::parse_insertelement(&mut ts)?),
        InstructionKind::ShuffleVector => Some(vector::parse_shufflevector(&mut ts)?),
        InstructionKind::ExtractValue => Some(aggregate::parse_extractvalue(&mut ts)?),
        InstructionKind::InsertValue => Some(aggregate::parse_insertvalue(&mut ts)?),
        InstructionKind::Load => Some(memory::parse_load(&mut ts)?),
        InstructionKind::Store => Some(memory::parse_store(&mut ts)?),
        InstructionKind::Cmpxchg => Some(memory::parse_cmpxchg(&mut ts)?),
        InstructionKind::AtomicRmw => Some(memory::parse_atomicrmw(&mut ts)?),
        InstructionKind::GetElementPtr => Some(memory::parse_getelementptr(&mut ts)?),
        InstructionKind::Conversion => Some(conversion::parse_conversion(keyword, &mut ts)?),
        InstructionKind::ICmp => Some(other::parse_icmp(&mut ts)?),
        InstructionKind::FCmp => Some(other::parse_fcmp(&mut ts)?),
        InstructionKind::Phi => Some(other::parse_phi(&mut ts)?),
        InstructionKind::Select => Some(other::parse_select(&mut ts)?),
        InstructionKind::Freeze => Some(other::parse_freeze(&mut ts)?),
        InstructionKind::Call => Some(call::parse_call(&mut ts, tail)?),
        InstructionKind::Alloca
        | InstructionKind::Fence
        | InstructionKind::VaArg
        | InstructionKind::LandingPad
        | InstructionKind::CatchSwitch
        | InstructionKind::CatchRet
        | InstructionKind::CleanupRet
        | InstructionKind::CatchPad
        | InstructionKind::CleanupPad => None,
    };

    if statement.is_some() {
        skip_annotations(&mut ts)?;
        ts.finish("instruction")?;
    }

    Ok(ParsedInstruction {
        assignee,
        kind,
        statement,
    })
}

/// Trailing `, align N` and `, !kind !N` attachments
fn skip_annotations(ts: &mut TokenStream<'_>) -> ParseResult<()> {
    while ts.eat(",") {
        let token = ts.next_token("annotation")?;
        if token.text == "align" {
            ts.next_token("alignment")?;
        } else if token.is_word() && token.text.starts_with('!') {
            read_value(ts)?;
        } else {
            return Err(ParseError::unexpected("annotation", token.text));
        }
    }
    Ok(())
}
