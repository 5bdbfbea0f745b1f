#[cfg(test)]
mod tests {
    use crate::compile::Compiler;
    use crate::storage::{load_options, load_template, save_compiled, StorageError};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_template_is_empty() {
        let dir = tempdir().unwrap();
        let template = load_template(&dir.path().join("absent.tpl"));
        assert!(template.is_empty());
        assert_eq!(Compiler::new().compile(&template).code, "");
    }

    #[test]
    fn test_load_compile_save() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("page.tpl");
        fs::write(&source, "<b>{$name}</b>").unwrap();

        let result = Compiler::new().compile(&load_template(&source));
        let target = dir.path().join("out").join("nested").join("page.php");
        save_compiled(&target, &result).unwrap();

        assert_eq!(
            fs::read_to_string(&target).unwrap(),
            "<b><?php echo $name; ?></b>"
        );
    }

    #[test]
    fn test_load_options_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stencil.json");
        fs::write(&path, r#"{ "debug": true, "modifiers": { "up": "strtoupper" } }"#).unwrap();

        let options = load_options(&path).unwrap();
        assert!(options.debug);
        assert_eq!(options.modifiers.len(), 1);
    }

    #[test]
    fn test_load_options_errors() {
        let dir = tempdir().unwrap();
        let missing = load_options(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(StorageError::Read { .. })));

        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        let invalid = load_options(&path);
        assert!(matches!(invalid, Err(StorageError::Options { .. })));
    }
}
