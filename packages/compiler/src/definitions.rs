//! Definition Registry
//!
//! Holds the text hoisted out of the statement stream: imports, program
//! state, helper functions and globals. Each entry is tagged with its
//! section when it is registered, and the first registration of a key wins.
//!
//! Shared helpers go through [`DefinitionRegistry::provide_function`], which
//! lets several call sites reuse one generated definition.

use indexmap::IndexMap;

use crate::names::{NameCategory, NameRegistry};
use crate::util::normalize_indent;

/// Stands in for the helper's final name inside a helper template.
pub const FUNCTION_NAME_PLACEHOLDER: &str = "{{FUNCTION_NAME}}";

/// Output section a definition is emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefinitionKind {
    /// `use` items and import notes, right after the header.
    Import,
    /// Program state declarations, before the body.
    State,
    /// Helper and user functions, after the body.
    Helper,
    /// Statics and constants, after the trailer.
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub kind: DefinitionKind,
    pub text: String,
}

/// A helper handed out by `provide_function`.
#[derive(Debug, Clone)]
struct ProvidedFunction {
    name: String,
    template: String,
}

#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    entries: IndexMap<String, Definition>,
    /// Registry key to the helper registered under it.
    provided: IndexMap<String, ProvidedFunction>,
}

impl DefinitionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `text` under `key`. Returns false, leaving the registry
    /// untouched, when the key is already present.
    pub fn define(&mut self, key: impl Into<String>, kind: DefinitionKind, text: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.contains_key(&key) {
            return false;
        }
        tracing::trace!(key = %key, ?kind, "definition registered");
        self.entries.insert(
            key,
            Definition {
                kind,
                text: text.into(),
            },
        );
        true
    }

    pub fn get(&self, key: &str) -> Option<&Definition> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.entries.iter().map(|(key, def)| (key.as_str(), def))
    }

    /// Texts of one section, in registration order.
    pub fn bucket(&self, kind: DefinitionKind) -> impl Iterator<Item = &str> {
        self.entries
            .values()
            .filter(move |def| def.kind == kind)
            .map(|def| def.text.as_str())
    }

    /// Register a shared helper and return the name call sites should use.
    ///
    /// `template` refers to the helper's own name as
    /// [`FUNCTION_NAME_PLACEHOLDER`] and is indented with two spaces per
    /// level. A request whose template matches one already registered under
    /// `desired_name` gets that helper back. A different template under the
    /// same name is registered under `desired_name2`, `desired_name3`, and so
    /// on, whichever slot is free or already holds this exact template.
    pub fn provide_function(
        &mut self,
        names: &mut NameRegistry,
        desired_name: &str,
        template: &str,
        indent: &str,
    ) -> String {
        let mut suffix = 1;
        loop {
            let key = if suffix == 1 {
                desired_name.to_string()
            } else {
                format!("{}{}", desired_name, suffix)
            };
            if let Some(existing) = self.provided.get(&key) {
                if existing.template == template {
                    return existing.name.clone();
                }
            } else if !self.entries.contains_key(&key) {
                let name = names.get_distinct_name(&key, NameCategory::Procedure);
                let text = normalize_indent(&template.replace(FUNCTION_NAME_PLACEHOLDER, &name), indent);
                tracing::debug!(desired = desired_name, name = %name, "helper provided");
                self.define(key.clone(), DefinitionKind::Helper, text);
                self.provided.insert(
                    key,
                    ProvidedFunction {
                        name: name.clone(),
                        template: template.to_string(),
                    },
                );
                return name;
            }
            suffix += 1;
        }
    }
}
