//! Function registry
//!
//! Every `define` in the module is registered up front; call sites are
//! appended while bodies are scanned. Aliases and attribute groups are kept
//! alongside so lookups can see through them.

use rustc_hash::FxHashMap;

use super::header_parser::{parse_alias, parse_attribute_group, parse_define_header};
use crate::features::function_registry::domain::{CallSite, Function, Parameter};
use crate::features::ir_parsing::domain::{CallKind, ParseResult};

#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: FxHashMap<String, Function>,
    /// Definition order
    order: Vec<String>,
    aliases: FxHashMap<String, String>,
    attribute_groups: FxHashMap<String, Vec<String>>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a `define` header and register the function; returns its name
    pub fn identify_function(&mut self, header: &str) -> ParseResult<String> {
        let function = parse_define_header(header)?;
        let name = function.name.clone();
        if self.functions.insert(name.clone(), function).is_none() {
            self.order.push(name.clone());
        }
        Ok(name)
    }

    pub fn register_alias(&mut self, line: &str) -> ParseResult<(String, String)> {
        let (alias, target) = parse_alias(line)?;
        self.aliases.insert(alias.clone(), target.clone());
        Ok((alias, target))
    }

    pub fn register_attribute_group(&mut self, line: &str) -> ParseResult<String> {
        let (id, attributes) = parse_attribute_group(line)?;
        self.attribute_groups.insert(id.clone(), attributes);
        Ok(id)
    }

    /// Follow alias chains to the aliased definition; stops on cycles
    pub fn resolve_alias<'a>(&'a self, name: &'a str) -> &'a str {
        let mut current = name;
        for _ in 0..=self.aliases.len() {
            match self.aliases.get(current) {
                Some(target) => current = target.as_str(),
                None => return current,
            }
        }
        current
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.aliases.contains_key(name)
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(a, t)| (a.as_str(), t.as_str()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(self.resolve_alias(name))
    }

    pub fn get_function(&self, name: &str) -> Option<&Function> {
        self.functions.get(self.resolve_alias(name))
    }

    pub fn get_function_arguments(&self, name: &str) -> Option<&[Parameter]> {
        self.get_function(name).map(|f| f.parameters.as_slice())
    }

    /// Registered functions in definition order
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.order.iter().filter_map(|name| self.functions.get(name))
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Returns false when `function` was never registered
    pub fn add_call_site(&mut self, function: &str, site: CallSite) -> bool {
        match self.functions.get_mut(function) {
            Some(f) => {
                f.call_sites.push(site);
                true
            }
            None => false,
        }
    }

    pub fn call_sites(&self, function: &str) -> &[CallSite] {
        self.get_function(function)
            .map(|f| f.call_sites.as_slice())
            .unwrap_or_default()
    }

    fn sites_of_kind(&self, function: &str, kind: CallKind) -> Vec<&CallSite> {
        self.call_sites(function)
            .iter()
            .filter(|site| site.kind == kind)
            .collect()
    }

    pub fn get_calls(&self, function: &str) -> Vec<&CallSite> {
        self.sites_of_kind(function, CallKind::Call)
    }

    pub fn get_invokes(&self, function: &str) -> Vec<&CallSite> {
        self.sites_of_kind(function, CallKind::Invoke)
    }

    pub fn get_callbrs(&self, function: &str) -> Vec<&CallSite> {
        self.sites_of_kind(function, CallKind::CallBr)
    }

    /// Function attributes with `#N` group references expanded
    pub fn function_attributes(&self, name: &str) -> Vec<String> {
        let Some(function) = self.get_function(name) else {
            return Vec::new();
        };
        let mut attributes = Vec::new();
        for attribute in &function.attributes {
            match self.attribute_groups.get(attribute) {
                Some(group) => attributes.extend(group.iter().cloned()),
                None if attribute.starts_with('#') => {}
                None => attributes.push(attribute.clone()),
            }
        }
        attributes
    }

    pub fn is_startup_func(&self, name: &str) -> bool {
        self.get_function(name).is_some_and(Function::is_startup)
    }
}
