//! Modifier Registry for the Stencil Compiler
//!
//! Two layers of alias → transform tables. The shared layer is built once,
//! wrapped in an `Arc` and handed to every compiler that opts in; the local
//! layer belongs to a single compiler and wins on lookup.

use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::ident::is_identifier;

// ═══════════════════════════════════════════════════════════════════════════════
// MODIFIER SPEC
// ═══════════════════════════════════════════════════════════════════════════════

/// How a modifier rewrites the expression it is applied to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModifierSpec {
    /// `prefix + expr + suffix`
    Wrap { prefix: String, suffix: String },
    /// `name( expr )`, or `name['sub']( expr )` when invoked as `alias.sub`
    Call { name: String },
}

impl ModifierSpec {
    pub fn wrap(prefix: &str, suffix: &str) -> Self {
        ModifierSpec::Wrap {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
        }
    }

    pub fn call(name: &str) -> Self {
        ModifierSpec::Call {
            name: name.to_string(),
        }
    }

    /// Read a spec from its configuration shape: a callable name string, or an
    /// array whose first two elements are the prefix and suffix strings.
    /// Anything else is rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(ModifierSpec::call(name)),
            Value::Array(parts) if parts.len() > 1 => match (&parts[0], &parts[1]) {
                (Value::String(prefix), Value::String(suffix)) => {
                    Some(ModifierSpec::wrap(prefix, suffix))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Apply this transform to `expression`. The sub-key only affects
    /// call-style modifiers.
    pub fn apply(&self, expression: &str, sub_key: Option<&str>) -> String {
        match self {
            ModifierSpec::Wrap { prefix, suffix } => {
                format!("{}{}{}", prefix, expression, suffix)
            }
            ModifierSpec::Call { name } => match sub_key {
                Some(sub) => format!("{}['{}']( {} )", name, sub, expression),
                None => format!("{}( {} )", name, expression),
            },
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODIFIER TABLE (one layer)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModifierTable {
    entries: HashMap<String, ModifierSpec>,
}

impl ModifierTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one modifier. Returns false (and stores nothing) when the
    /// alias is not an identifier.
    pub fn insert(&mut self, alias: &str, spec: ModifierSpec) -> bool {
        if !is_identifier(alias) {
            tracing::debug!("Dropping modifier with invalid alias {:?}", alias);
            return false;
        }
        self.entries.insert(alias.to_string(), spec);
        true
    }

    /// Register every well-formed entry of a configuration map. Malformed
    /// entries are dropped silently. Returns the number of entries accepted.
    pub fn extend_from_json(&mut self, map: &Map<String, Value>) -> usize {
        let mut accepted = 0;
        for (alias, value) in map {
            match ModifierSpec::from_json(value) {
                Some(spec) => {
                    if self.insert(alias, spec) {
                        accepted += 1;
                    }
                }
                None => tracing::debug!("Dropping malformed modifier entry {:?}", alias),
            }
        }
        accepted
    }

    pub fn get(&self, alias: &str) -> Option<&ModifierSpec> {
        self.entries.get(alias)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ModifierSpec)> for ModifierTable {
    fn from_iter<I: IntoIterator<Item = (String, ModifierSpec)>>(iter: I) -> Self {
        let mut table = ModifierTable::new();
        for (alias, spec) in iter {
            table.insert(&alias, spec);
        }
        table
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// MODIFIER REGISTRY (local over shared)
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct ModifierRegistry {
    shared: Arc<ModifierTable>,
    local: ModifierTable,
}

impl ModifierRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared(shared: Arc<ModifierTable>) -> Self {
        ModifierRegistry {
            shared,
            local: ModifierTable::new(),
        }
    }

    pub fn set_shared(&mut self, shared: Arc<ModifierTable>) {
        self.shared = shared;
    }

    pub fn shared(&self) -> &ModifierTable {
        &self.shared
    }

    pub fn local(&self) -> &ModifierTable {
        &self.local
    }

    pub fn register(&mut self, alias: &str, spec: ModifierSpec) -> bool {
        self.local.insert(alias, spec)
    }

    pub fn add_modifiers(&mut self, map: &Map<String, Value>) -> usize {
        self.local.extend_from_json(map)
    }

    /// Local layer first, then shared.
    pub fn find(&self, alias: &str) -> Option<&ModifierSpec> {
        self.local.get(alias).or_else(|| self.shared.get(alias))
    }
}
