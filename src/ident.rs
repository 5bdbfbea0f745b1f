//! Identifier grammar shared by the directive grammars and the modifier registry.
//!
//! Names are ASCII only: letters, digits and underscore.

/// Regex character class for a single name character.
pub const NAME_CLASS: &str = "[a-zA-Z0-9_]";

pub fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// A name as it may appear after a pipe: one or more name characters.
pub fn is_modifier_name(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_name_char)
}

/// A registrable alias: a modifier name that does not start with a digit.
pub fn is_identifier(s: &str) -> bool {
    match s.chars().next() {
        Some(first) if !first.is_ascii_digit() => is_modifier_name(s),
        _ => false,
    }
}
