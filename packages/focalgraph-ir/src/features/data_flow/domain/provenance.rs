//! Register provenance for one function body
//!
//! Each SSA register has at most one definition. Stores are kept apart
//! because one stack slot can be written many times. The `users` index
//! answers the question the classifier actually asks: "where does this
//! value flow next?"

use rustc_hash::FxHashMap;
use serde::Serialize;

use crate::features::flow_graph::domain::NodeId;
use crate::features::ir_parsing::domain::is_register;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Address that received this value (users index only)
    StoredFrom(String),
    /// `load` (or the old value of an atomic update) from `address`
    LoadedFrom { address: String, is_pointer: bool },
    /// Cast of another value
    Converted(String),
    /// `getelementptr` into `base`
    ReferencedFrom(String),
    /// Selected, merged or repacked values (`phi`, `select`, aggregates)
    Assigned(Vec<String>),
    /// Result of arithmetic or a comparison over the operands
    Computed(Vec<String>),
    /// Return value of the call at this node
    CallResult(NodeId),
}

impl Provenance {
    /// Registers this provenance reads from
    pub fn sources(&self) -> Vec<&str> {
        match self {
            Provenance::StoredFrom(value)
            | Provenance::Converted(value)
            | Provenance::ReferencedFrom(value) => vec![value.as_str()],
            Provenance::LoadedFrom { address, .. } => vec![address.as_str()],
            Provenance::Assigned(values) | Provenance::Computed(values) => {
                values.iter().map(String::as_str).collect()
            }
            Provenance::CallResult(_) => Vec::new(),
        }
    }
}

/// One flow edge out of a value: `register` was derived via `provenance`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Use {
    pub register: String,
    pub provenance: Provenance,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct DataflowTable {
    definitions: FxHashMap<String, Provenance>,
    /// Address → values stored through it, in program order
    stores: FxHashMap<String, Vec<String>>,
    users: FxHashMap<String, Vec<Use>>,
    returns: Vec<String>,
}

impl DataflowTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the definition of `register`. A second definition of the same
    /// register is ignored.
    pub fn record(&mut self, register: &str, provenance: Provenance) {
        if self.definitions.contains_key(register) {
            return;
        }
        for source in provenance.sources() {
            if is_register(source) {
                self.users.entry(source.to_string()).or_default().push(Use {
                    register: register.to_string(),
                    provenance: provenance.clone(),
                });
            }
        }
        self.definitions.insert(register.to_string(), provenance);
    }

    pub fn record_store(&mut self, address: &str, value: &str) {
        self.stores
            .entry(address.to_string())
            .or_default()
            .push(value.to_string());
        if is_register(value) {
            self.users.entry(value.to_string()).or_default().push(Use {
                register: address.to_string(),
                provenance: Provenance::StoredFrom(value.to_string()),
            });
        }
    }

    pub fn record_return(&mut self, value: &str) {
        self.returns.push(value.to_string());
    }

    pub fn definition(&self, register: &str) -> Option<&Provenance> {
        self.definitions.get(register)
    }

    pub fn users(&self, value: &str) -> &[Use] {
        self.users.get(value).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn stored_values(&self, address: &str) -> &[String] {
        self.stores.get(address).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn is_stored_through(&self, address: &str) -> bool {
        self.stores.contains_key(address)
    }

    /// Registers loaded back out of `address`
    pub fn reloads(&self, address: &str) -> Vec<&str> {
        self.users(address)
            .iter()
            .filter(|u| matches!(&u.provenance, Provenance::LoadedFrom { address: a, .. } if a == address))
            .map(|u| u.register.as_str())
            .collect()
    }

    pub fn returns(&self) -> &[String] {
        &self.returns
    }

    pub fn is_returned(&self, value: &str) -> bool {
        self.returns.iter().any(|r| r == value)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty() && self.stores.is_empty()
    }
}
