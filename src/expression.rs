//! Expression Builder
//!
//! Turns a classified reference into a PHP output statement:
//! root access, sub-access chain, modifier chain, then `echo` wrapping.

use crate::classify::{Access, Reference, ReferenceRoot};
use crate::modifiers::ModifierRegistry;
use crate::resolve::resolve_modifiers;

pub const CODE_OPEN: &str = "<?php ";
pub const CODE_CLOSE: &str = " ?>";

/// Wrap host code in the code-escape markers.
pub fn wrap_code(code: &str) -> String {
    format!("{}{}{}", CODE_OPEN, code, CODE_CLOSE)
}

pub fn root_expression(root: &ReferenceRoot) -> String {
    match root {
        ReferenceRoot::Variable(name) => format!("${}", name),
        ReferenceRoot::StaticConstant { class, name } => format!("{}::{}", class, name),
        ReferenceRoot::StaticProperty { class, name } => format!("{}::${}", class, name),
    }
}

/// `.key` becomes `['key']`; `->field` stays a member access.
pub fn push_accesses(expression: &mut String, accesses: &[Access]) {
    for access in accesses {
        match access {
            Access::Key(key) => {
                expression.push_str("['");
                expression.push_str(key);
                expression.push_str("']");
            }
            Access::Member(field) => {
                expression.push_str("->");
                expression.push_str(field);
            }
        }
    }
}

/// `<?php echo expr; ?>`, with the source directive appended as a comment
/// when `debug_source` is set.
pub fn echo_statement(expression: &str, debug_source: Option<&str>) -> String {
    match debug_source {
        Some(source) => wrap_code(&format!("echo {}; /* {} */", expression, source)),
        None => wrap_code(&format!("echo {};", expression)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltReference {
    pub statement: String,
    pub unresolved: Vec<String>,
}

pub fn build_reference(
    reference: &Reference,
    registry: &ModifierRegistry,
    debug_source: Option<&str>,
) -> BuiltReference {
    let mut expression = root_expression(&reference.root);
    push_accesses(&mut expression, &reference.accesses);

    let resolved = resolve_modifiers(expression, &reference.modifiers, registry);

    BuiltReference {
        statement: echo_statement(&resolved.expression, debug_source),
        unresolved: resolved.unresolved,
    }
}
