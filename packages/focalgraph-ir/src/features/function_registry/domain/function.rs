//! Function records built from `define` headers

use serde::Serialize;

use crate::features::flow_graph::domain::NodeId;
use crate::features::ir_parsing::domain::{has_attribute, is_pointer_type, CallKind};

/// Formal parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameter {
    pub ty: String,
    pub attributes: Vec<String>,
    /// Named register, `%N` by position when unnamed, `...` for varargs
    pub register: String,
}

impl Parameter {
    pub fn variadic() -> Self {
        Self {
            ty: "...".to_string(),
            attributes: Vec::new(),
            register: "...".to_string(),
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.register == "..."
    }

    pub fn is_sret(&self) -> bool {
        has_attribute(&self.attributes, "sret")
    }

    pub fn is_pointer(&self) -> bool {
        is_pointer_type(&self.ty)
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        has_attribute(&self.attributes, name)
    }
}

/// A call, invoke or callbr recorded while scanning a body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CallSite {
    pub node: NodeId,
    pub kind: CallKind,
    pub callee: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Function {
    pub name: String,
    pub linkage: Option<String>,
    pub preemption: String,
    pub visibility: Option<String>,
    pub dll_storage_class: Option<String>,
    pub calling_convention: String,
    pub return_attributes: Vec<String>,
    pub return_type: String,
    pub parameters: Vec<Parameter>,
    pub unnamed_addr: Option<String>,
    pub address_space: Option<String>,
    /// Keyword and string attributes plus `#N` group references
    pub attributes: Vec<String>,
    pub section: Option<String>,
    pub partition: Option<String>,
    pub comdat: Option<String>,
    pub alignment: Option<String>,
    pub gc: Option<String>,
    pub prefix: Option<String>,
    pub prologue: Option<String>,
    pub personality: Option<String>,
    pub metadata: Vec<(String, String)>,
    pub call_sites: Vec<CallSite>,
}

impl Function {
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            linkage: None,
            preemption: "dso_preemptable".to_string(),
            visibility: None,
            dll_storage_class: None,
            calling_convention: "ccc".to_string(),
            return_attributes: Vec::new(),
            return_type: return_type.into(),
            parameters: Vec::new(),
            unnamed_addr: None,
            address_space: None,
            attributes: Vec::new(),
            section: None,
            partition: None,
            comdat: None,
            alignment: None,
            gc: None,
            prefix: None,
            prologue: None,
            personality: None,
            metadata: Vec::new(),
            call_sites: Vec::new(),
        }
    }

    pub fn parameter(&self, register: &str) -> Option<(usize, &Parameter)> {
        self.parameters
            .iter()
            .enumerate()
            .find(|(_, p)| p.register == register)
    }

    pub fn is_startup(&self) -> bool {
        self.section.as_deref() == Some(".text.startup")
    }
}
