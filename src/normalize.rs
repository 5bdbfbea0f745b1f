//! Default-modifier normalization.
//!
//! Runs over a reference body before its modifier chain is read. An "empty"
//! pipe is a `|` that is not followed by a name character (`{$x|}`,
//! `{$x||trim}`); each one is replaced by the configured default modifier.

use crate::ident::{is_modifier_name, is_name_char};

/// Accept `|name` or `name` and return the pipe-prefixed form. Anything else
/// is treated as "no default".
pub fn validate_default_modifier(candidate: &str) -> Option<String> {
    let name = candidate.strip_prefix('|').unwrap_or(candidate);
    is_modifier_name(name).then(|| format!("|{}", name))
}

/// Replace every empty pipe in `body` with `default`. Returns `None` when the
/// body has no empty pipe, so callers can tell a no-op from a rewrite.
pub fn substitute_empty_pipes(body: &str, default: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len() + default.len());
    let mut replaced = false;
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        let followed_by_name = chars.peek().copied().map_or(false, is_name_char);
        if c == '|' && !followed_by_name {
            out.push_str(default);
            replaced = true;
        } else {
            out.push(c);
        }
    }

    replaced.then_some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_modifier() {
        assert_eq!(validate_default_modifier("|escape"), Some("|escape".to_string()));
        assert_eq!(validate_default_modifier("escape"), Some("|escape".to_string()));
        assert_eq!(validate_default_modifier("|"), None);
        assert_eq!(validate_default_modifier("|esc ape"), None);
        assert_eq!(validate_default_modifier("|a.b"), None);
        assert_eq!(validate_default_modifier(""), None);
    }

    #[test]
    fn test_trailing_pipe_is_replaced() {
        assert_eq!(
            substitute_empty_pipes("$fruit|", "|escape"),
            Some("$fruit|escape".to_string())
        );
    }

    #[test]
    fn test_only_empty_slots_are_replaced() {
        assert_eq!(
            substitute_empty_pipes("$x||trim|", "|e"),
            Some("$x|e|trim|e".to_string())
        );
        assert_eq!(substitute_empty_pipes("$x|trim", "|e"), None);
    }

    #[test]
    fn test_pipe_before_sub_key_counts_as_empty() {
        assert_eq!(
            substitute_empty_pipes("$x|.page", "|url"),
            Some("$x|url.page".to_string())
        );
    }
}
