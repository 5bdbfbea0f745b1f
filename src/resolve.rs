//! Modifier Resolver
//!
//! Folds a modifier chain over an expression, strictly left to right. Each
//! step wraps the result of the previous one, so `|a|b` yields `b(a(expr))`.

use crate::modifiers::ModifierRegistry;

/// One `|alias` or `|alias.sub` invocation inside a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierCall {
    pub alias: String,
    pub sub_key: Option<String>,
}

impl ModifierCall {
    pub fn new(alias: &str) -> Self {
        ModifierCall {
            alias: alias.to_string(),
            sub_key: None,
        }
    }

    pub fn with_sub_key(alias: &str, sub_key: &str) -> Self {
        ModifierCall {
            alias: alias.to_string(),
            sub_key: Some(sub_key.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub expression: String,
    /// Aliases that were not found, in invocation order, one entry per miss.
    pub unresolved: Vec<String>,
}

pub fn resolve_modifiers(
    expression: String,
    calls: &[ModifierCall],
    registry: &ModifierRegistry,
) -> Resolved {
    let mut unresolved = Vec::new();

    let expression = calls.iter().fold(expression, |current, call| {
        match registry.find(&call.alias) {
            Some(spec) => spec.apply(&current, call.sub_key.as_deref()),
            None => {
                tracing::debug!("Unresolved modifier '{}'", call.alias);
                unresolved.push(call.alias.clone());
                current
            }
        }
    });

    Resolved {
        expression,
        unresolved,
    }
}
