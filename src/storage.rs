//! Storage adapters: reading templates and options, writing compiled output.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::compile::CompileResult;
use crate::options::CompilerOptions;
use crate::tokenize::Template;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },

    #[error("invalid compiler options in {path}: {source}")]
    Options {
        path: String,
        source: serde_json::Error,
    },

    #[error("template directory not found: {0}")]
    MissingDirectory(String),
}

/// Read and tokenize a template file. A missing or unreadable file gives an
/// empty template; check `Template::is_empty` before trusting the result.
pub fn load_template(path: &Path) -> Template {
    match fs::read_to_string(path) {
        Ok(source) => Template::parse(&source),
        Err(e) => {
            tracing::warn!("Cannot read template {}: {}", path.display(), e);
            Template::empty()
        }
    }
}

pub fn load_options(path: &Path) -> Result<CompilerOptions, StorageError> {
    let data = fs::read_to_string(path).map_err(|source| StorageError::Read {
        path: path.display().to_string(),
        source,
    })?;
    CompilerOptions::from_json(&data).map_err(|source| StorageError::Options {
        path: path.display().to_string(),
        source,
    })
}

/// Write the compiled code, creating missing parent directories.
pub fn save_compiled(path: &Path, result: &CompileResult) -> Result<(), StorageError> {
    let write_err = |source| StorageError::Write {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
    }
    fs::write(path, &result.code).map_err(write_err)
}
