#[cfg(test)]
mod tests {
    use crate::modifiers::{ModifierRegistry, ModifierSpec, ModifierTable};
    use crate::resolve::{resolve_modifiers, ModifierCall};
    use serde_json::{json, Map, Value};
    use std::sync::Arc;

    fn as_map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_wrap_and_call_application() {
        let wrap = ModifierSpec::wrap("(", ")");
        assert_eq!(wrap.apply("$x", None), "($x)");
        assert_eq!(wrap.apply("$x", Some("ignored")), "($x)");

        let call = ModifierSpec::call("f");
        assert_eq!(call.apply("$x", None), "f( $x )");
        assert_eq!(call.apply("$x", Some("page")), "f['page']( $x )");
    }

    #[test]
    fn test_registration_drops_malformed_entries() {
        let mut table = ModifierTable::new();
        let accepted = table.extend_from_json(&as_map(json!({
            "escape": ["htmlspecialchars(", ")"],
            "intval": "intval",
            "three": ["<", ">", "ignored"],
            "short": ["only one"],
            "numbers": [1, 2],
            "mixed": ["(", 2],
            "number": 5,
            "object": { "a": "b" },
            "1bad": "f",
            "bad-alias": "f"
        })));

        assert_eq!(accepted, 3);
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("escape"), Some(&ModifierSpec::wrap("htmlspecialchars(", ")")));
        assert_eq!(table.get("intval"), Some(&ModifierSpec::call("intval")));
        assert_eq!(table.get("three"), Some(&ModifierSpec::wrap("<", ">")));
        assert!(table.get("short").is_none());
        assert!(table.get("1bad").is_none());
    }

    #[test]
    fn test_aliases_are_case_sensitive() {
        let mut table = ModifierTable::new();
        table.insert("Upper", ModifierSpec::call("strtoupper"));
        assert!(table.get("upper").is_none());
        assert!(table.get("Upper").is_some());
    }

    #[test]
    fn test_local_layer_shadows_shared() {
        let shared: ModifierTable = vec![
            ("escape".to_string(), ModifierSpec::call("shared_escape")),
            ("trim".to_string(), ModifierSpec::call("trim")),
        ]
        .into_iter()
        .collect();

        let mut registry = ModifierRegistry::with_shared(Arc::new(shared));
        registry.register("escape", ModifierSpec::call("local_escape"));

        assert_eq!(registry.find("escape"), Some(&ModifierSpec::call("local_escape")));
        assert_eq!(registry.find("trim"), Some(&ModifierSpec::call("trim")));
        assert!(registry.find("missing").is_none());
    }

    #[test]
    fn test_registry_layers_are_inspectable() {
        let mut registry = ModifierRegistry::new();
        assert!(registry.shared().is_empty());

        let shared: ModifierTable = vec![("s".to_string(), ModifierSpec::call("s"))]
            .into_iter()
            .collect();
        registry.set_shared(Arc::new(shared));
        registry.register("l", ModifierSpec::call("l"));

        assert!(registry.shared().get("s").is_some());
        assert!(registry.shared().get("l").is_none());
        assert!(registry.local().get("l").is_some());
        assert!(registry.local().get("s").is_none());
    }

    #[test]
    fn test_shared_table_is_shared_between_registries() {
        let shared = Arc::new(
            vec![("e".to_string(), ModifierSpec::call("e"))]
                .into_iter()
                .collect::<ModifierTable>(),
        );
        let mut first = ModifierRegistry::with_shared(Arc::clone(&shared));
        let second = ModifierRegistry::with_shared(Arc::clone(&shared));
        first.register("local", ModifierSpec::call("l"));

        assert!(second.find("e").is_some());
        assert!(second.find("local").is_none());
    }

    #[test]
    fn test_chain_applies_left_to_right() {
        let mut registry = ModifierRegistry::new();
        registry.register("a", ModifierSpec::wrap("(", ")"));
        registry.register("b", ModifierSpec::call("f"));

        let forward = resolve_modifiers(
            "$x".to_string(),
            &[ModifierCall::new("a"), ModifierCall::new("b")],
            &registry,
        );
        assert_eq!(forward.expression, "f( ($x) )");

        let reversed = resolve_modifiers(
            "$x".to_string(),
            &[ModifierCall::new("b"), ModifierCall::new("a")],
            &registry,
        );
        assert_eq!(reversed.expression, "(f( $x ))");
    }

    #[test]
    fn test_unresolved_step_leaves_expression_unchanged() {
        let mut registry = ModifierRegistry::new();
        registry.register("a", ModifierSpec::wrap("[", "]"));

        let resolved = resolve_modifiers(
            "$x".to_string(),
            &[
                ModifierCall::new("nope"),
                ModifierCall::new("a"),
                ModifierCall::new("nope"),
            ],
            &registry,
        );
        assert_eq!(resolved.expression, "[$x]");
        assert_eq!(resolved.unresolved, vec!["nope".to_string(), "nope".to_string()]);
    }
}
