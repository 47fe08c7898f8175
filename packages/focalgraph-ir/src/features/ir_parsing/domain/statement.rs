//! Typed instruction records
//!
//! One variant per instruction family the analysis understands. Every
//! variant reports the values it reads (`used_values`), which is what the
//! backward trace follows; the defined register lives next to the statement
//! on its CFG node.

use serde::Serialize;

use super::values::{has_attribute, is_pointer_type, is_register};

/// Actual argument at a call site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub ty: String,
    pub attributes: Vec<String>,
    pub value: String,
}

impl Argument {
    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }

    /// Passed as an address the callee can write through (`byval` copies don't count)
    pub fn is_reference(&self) -> bool {
        is_pointer_type(&self.ty) && !self.has_attribute("byval")
    }
}

/// `"tag"(ty val, ...)` entry of an operand-bundle list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperandBundle {
    pub tag: String,
    pub operands: Vec<(String, String)>,
}

/// Common part of `call`, `invoke` and `callbr`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Call {
    pub tail: Option<String>,
    pub fast_math_flags: Vec<String>,
    pub calling_convention: Option<String>,
    pub return_attributes: Vec<String>,
    pub address_space: Option<String>,
    pub return_type: String,
    /// Callee name, with casts peeled off (`@f`), a register for indirect
    /// calls, or the inline-asm text
    pub callee: String,
    pub arguments: Vec<Argument>,
    pub function_attributes: Vec<String>,
    pub operand_bundles: Vec<OperandBundle>,
}

impl Call {
    pub fn argument_values(&self) -> impl Iterator<Item = &str> {
        self.arguments.iter().map(|a| a.value.as_str())
    }

    /// Direct call to a named function
    pub fn is_direct(&self) -> bool {
        self.callee.starts_with('@') && self.callee.len() > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CallKind {
    Call,
    Invoke,
    CallBr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchCase {
    pub ty: String,
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Statement {
    Ret {
        ty: String,
        value: Option<String>,
    },
    Br {
        condition: Option<String>,
        if_true: String,
        if_false: Option<String>,
    },
    Switch {
        ty: String,
        value: String,
        default: String,
        cases: Vec<SwitchCase>,
    },
    IndirectBr {
        ty: String,
        address: String,
        destinations: Vec<String>,
    },
    Invoke {
        call: Call,
        normal: String,
        unwind: String,
    },
    CallBr {
        call: Call,
        fallthrough: String,
        indirect: Vec<String>,
    },
    Resume {
        ty: String,
        value: String,
    },
    Unreachable,
    UnaryOp {
        opcode: String,
        flags: Vec<String>,
        ty: String,
        operand: String,
    },
    BinOp {
        opcode: String,
        flags: Vec<String>,
        ty: String,
        op1: String,
        op2: String,
    },
    FpBinOp {
        opcode: String,
        flags: Vec<String>,
        ty: String,
        op1: String,
        op2: String,
    },
    BitwiseBinary {
        opcode: String,
        flags: Vec<String>,
        ty: String,
        op1: String,
        op2: String,
    },
    ExtractElement {
        ty: String,
        vector: String,
        index: String,
    },
    InsertElement {
        ty: String,
        vector: String,
        element: String,
        index: String,
    },
    ShuffleVector {
        ty: String,
        v1: String,
        v2: String,
        mask: String,
    },
    ExtractValue {
        ty: String,
        aggregate: String,
        indices: Vec<String>,
    },
    InsertValue {
        ty: String,
        aggregate: String,
        element: String,
        indices: Vec<String>,
    },
    Load {
        volatile: bool,
        atomic: bool,
        ty: String,
        address_ty: String,
        address: String,
    },
    Store {
        volatile: bool,
        atomic: bool,
        ty: String,
        value: String,
        address_ty: String,
        address: String,
    },
    Cmpxchg {
        weak: bool,
        volatile: bool,
        address: String,
        compare: String,
        ty: String,
        new_value: String,
    },
    AtomicRmw {
        volatile: bool,
        operation: String,
        address: String,
        ty: String,
        value: String,
    },
    GetElementPtr {
        inbounds: bool,
        source_ty: String,
        base_ty: String,
        base: String,
        indices: Vec<(String, String)>,
    },
    Conversion {
        opcode: String,
        from_ty: String,
        value: String,
        to_ty: String,
    },
    ICmp {
        predicate: String,
        ty: String,
        op1: String,
        op2: String,
    },
    FCmp {
        flags: Vec<String>,
        predicate: String,
        ty: String,
        op1: String,
        op2: String,
    },
    Phi {
        ty: String,
        incoming: Vec<(String, String)>,
    },
    Select {
        condition: String,
        ty: String,
        if_true: String,
        if_false: String,
    },
    Freeze {
        ty: String,
        value: String,
    },
    Call(Call),
}

impl Statement {
    /// Every value this statement reads, literals included
    pub fn used_values(&self) -> Vec<&str> {
        match self {
            Statement::Ret { value, .. } => value.iter().map(String::as_str).collect(),
            Statement::Br { condition, .. } => condition.iter().map(String::as_str).collect(),
            Statement::Switch { value, .. } => vec![value.as_str()],
            Statement::IndirectBr { address, .. } => vec![address.as_str()],
            Statement::Invoke { call, .. }
            | Statement::CallBr { call, .. }
            | Statement::Call(call) => call.argument_values().collect(),
            Statement::Resume { value, .. } => vec![value.as_str()],
            Statement::Unreachable => Vec::new(),
            Statement::UnaryOp { operand, .. } => vec![operand.as_str()],
            Statement::BinOp { op1, op2, .. }
            | Statement::FpBinOp { op1, op2, .. }
            | Statement::BitwiseBinary { op1, op2, .. }
            | Statement::ICmp { op1, op2, .. }
            | Statement::FCmp { op1, op2, .. } => vec![op1.as_str(), op2.as_str()],
            Statement::ExtractElement { vector, index, .. } => vec![vector.as_str(), index.as_str()],
            Statement::InsertElement {
                vector,
                element,
                index,
                ..
            } => vec![vector.as_str(), element.as_str(), index.as_str()],
            Statement::ShuffleVector { v1, v2, mask, .. } => {
                vec![v1.as_str(), v2.as_str(), mask.as_str()]
            }
            Statement::ExtractValue { aggregate, .. } => vec![aggregate.as_str()],
            Statement::InsertValue {
                aggregate, element, ..
            } => vec![aggregate.as_str(), element.as_str()],
            Statement::Load { address, .. } => vec![address.as_str()],
            Statement::Store { value, address, .. } => vec![value.as_str(), address.as_str()],
            Statement::Cmpxchg {
                address,
                compare,
                new_value,
                ..
            } => vec![address.as_str(), compare.as_str(), new_value.as_str()],
            Statement::AtomicRmw { address, value, .. } => vec![address.as_str(), value.as_str()],
            Statement::GetElementPtr { base, indices, .. } => std::iter::once(base.as_str())
                .chain(indices.iter().map(|(_, index)| index.as_str()))
                .collect(),
            Statement::Conversion { value, .. } => vec![value.as_str()],
            Statement::Phi { incoming, .. } => incoming.iter().map(|(v, _)| v.as_str()).collect(),
            Statement::Select {
                condition,
                if_true,
                if_false,
                ..
            } => vec![condition.as_str(), if_true.as_str(), if_false.as_str()],
            Statement::Freeze { value, .. } => vec![value.as_str()],
        }
    }

    /// Used values that are registers or globals
    pub fn used_registers(&self) -> Vec<&str> {
        self.used_values()
            .into_iter()
            .filter(|v| is_register(v))
            .collect()
    }

    pub fn call(&self) -> Option<&Call> {
        match self {
            Statement::Call(call)
            | Statement::Invoke { call, .. }
            | Statement::CallBr { call, .. } => Some(call),
            _ => None,
        }
    }

    pub fn call_kind(&self) -> Option<CallKind> {
        match self {
            Statement::Call(_) => Some(CallKind::Call),
            Statement::Invoke { .. } => Some(CallKind::Invoke),
            Statement::CallBr { .. } => Some(CallKind::CallBr),
            _ => None,
        }
    }

    pub fn is_terminator(&self) -> bool {
        matches!(
            self,
            Statement::Ret { .. }
                | Statement::Br { .. }
                | Statement::Switch { .. }
                | Statement::IndirectBr { .. }
                | Statement::Invoke { .. }
                | Statement::CallBr { .. }
                | Statement::Resume { .. }
                | Statement::Unreachable
        )
    }

    /// Leaves the function
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            Statement::Ret { .. } | Statement::Resume { .. } | Statement::Unreachable
        )
    }

    /// Arithmetic or comparison producing a fresh value
    pub fn is_computation(&self) -> bool {
        matches!(
            self,
            Statement::UnaryOp { .. }
                | Statement::BinOp { .. }
                | Statement::FpBinOp { .. }
                | Statement::BitwiseBinary { .. }
                | Statement::ICmp { .. }
                | Statement::FCmp { .. }
        )
    }

    /// Jump targets with their edge labels
    pub fn successors(&self) -> Vec<(String, Option<String>)> {
        match self {
            Statement::Br {
                condition: Some(_),
                if_true,
                if_false,
            } => {
                let mut targets = vec![(if_true.clone(), Some("true".to_string()))];
                if let Some(if_false) = if_false {
                    targets.push((if_false.clone(), Some("false".to_string())));
                }
                targets
            }
            Statement::Br {
                condition: None,
                if_true,
                ..
            } => vec![(if_true.clone(), None)],
            Statement::Switch { default, cases, .. } => {
                std::iter::once((default.clone(), Some("default".to_string())))
                    .chain(
                        cases
                            .iter()
                            .map(|case| (case.label.clone(), Some(format!("= {}", case.value)))),
                    )
                    .collect()
            }
            Statement::IndirectBr { destinations, .. } => {
                destinations.iter().map(|d| (d.clone(), None)).collect()
            }
            Statement::Invoke { normal, unwind, .. } => vec![
                (normal.clone(), None),
                (unwind.clone(), Some("exception".to_string())),
            ],
            Statement::CallBr {
                fallthrough,
                indirect,
                ..
            } => std::iter::once((fallthrough.clone(), None))
                .chain(
                    indirect
                        .iter()
                        .map(|d| (d.clone(), Some("indirect".to_string()))),
                )
                .collect(),
            _ => Vec::new(),
        }
    }
}
