#[cfg(test)]
mod tests {
    use crate::batch::{compile_directory, find_templates};
    use crate::compile::Compiler;
    use crate::modifiers::ModifierSpec;
    use crate::storage::StorageError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_find_templates_recursively() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("partials")).unwrap();
        fs::write(dir.path().join("index.tpl"), "").unwrap();
        fs::write(dir.path().join("partials").join("nav.tpl"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let found = find_templates(dir.path());
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|p| p.extension().unwrap() == "tpl"));
    }

    #[test]
    fn test_compile_directory_mirrors_layout() {
        let src = tempdir().unwrap();
        let out = tempdir().unwrap();
        fs::create_dir_all(src.path().join("partials")).unwrap();
        fs::write(src.path().join("index.tpl"), "<h1>{$title|up}</h1>{bogus}").unwrap();
        fs::write(
            src.path().join("partials").join("nav.tpl"),
            "{foreach $links as $l}{$l.href|nope}{/foreach}",
        )
        .unwrap();

        let mut compiler = Compiler::new();
        compiler.register_modifier("up", ModifierSpec::call("strtoupper"));

        let report = compile_directory(src.path(), out.path(), &compiler).unwrap();
        assert_eq!(report.files.len(), 2);
        assert!(report.failures.is_empty());
        assert_eq!(report.total_skipped(), 1);
        assert_eq!(report.unresolved().get("nope"), Some(&1));
        assert!(!report.is_clean());

        assert_eq!(
            fs::read_to_string(out.path().join("index.php")).unwrap(),
            "<h1><?php echo strtoupper( $title ); ?></h1>"
        );
        assert_eq!(
            fs::read_to_string(out.path().join("partials").join("nav.php")).unwrap(),
            "<?php foreach( $links as $l ): ?><?php echo $l['href']; ?><?php endforeach; ?>"
        );
    }

    #[test]
    fn test_missing_source_directory() {
        let out = tempdir().unwrap();
        let missing = out.path().join("nowhere");
        let result = compile_directory(&missing, out.path(), &Compiler::new());
        assert!(matches!(result, Err(StorageError::MissingDirectory(_))));
    }
}
