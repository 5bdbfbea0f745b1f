//! Batch compilation of a template directory.
//!
//! Recursively finds `.tpl` files, compiles each one as an independent pass
//! over a shared `Compiler`, and writes `.php` files mirroring the source
//! layout under the output directory.

use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::compile::Compiler;
use crate::storage::{save_compiled, StorageError};
use crate::tokenize::Template;

pub const TEMPLATE_EXTENSION: &str = "tpl";
pub const COMPILED_EXTENSION: &str = "php";

// ═══════════════════════════════════════════════════════════════════════════════
// REPORT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileReport {
    pub source: String,
    pub output: String,
    pub skip_count: usize,
    pub unresolved: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub source: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn total_skipped(&self) -> usize {
        self.files.iter().map(|f| f.skip_count).sum()
    }

    /// Unresolved counts merged across every compiled file.
    pub fn unresolved(&self) -> BTreeMap<String, usize> {
        let mut merged = BTreeMap::new();
        for file in &self.files {
            for (alias, count) in &file.unresolved {
                *merged.entry(alias.clone()).or_insert(0) += count;
            }
        }
        merged
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
            && self.files.iter().all(|f| f.skip_count == 0 && f.unresolved.is_empty())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISCOVERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Recursively find all `.tpl` files under `dir`, sorted by path.
pub fn find_templates(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .map_or(false, |ext| ext == TEMPLATE_EXTENSION)
        })
        .collect();
    files.sort();
    files
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILATION
// ═══════════════════════════════════════════════════════════════════════════════

pub fn compile_directory(
    source_dir: &Path,
    output_dir: &Path,
    compiler: &Compiler,
) -> Result<BatchReport, StorageError> {
    if !source_dir.is_dir() {
        return Err(StorageError::MissingDirectory(
            source_dir.display().to_string(),
        ));
    }

    let templates = find_templates(source_dir);
    tracing::debug!(
        "Found {} templates in {}",
        templates.len(),
        source_dir.display()
    );

    let outcomes: Vec<Result<FileReport, BatchFailure>> = templates
        .par_iter()
        .map(|path| compile_file(path, source_dir, output_dir, compiler))
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(file) => report.files.push(file),
            Err(failure) => report.failures.push(failure),
        }
    }

    tracing::info!(
        "Compiled {} templates ({} failed, {} directives skipped)",
        report.files.len(),
        report.failures.len(),
        report.total_skipped()
    );

    Ok(report)
}

fn compile_file(
    path: &Path,
    source_dir: &Path,
    output_dir: &Path,
    compiler: &Compiler,
) -> Result<FileReport, BatchFailure> {
    let failure = |message: String| BatchFailure {
        source: path.display().to_string(),
        message,
    };

    // Read directly rather than through load_template so an unreadable file
    // is reported instead of compiling to an empty output.
    let source = fs::read_to_string(path).map_err(|e| {
        failure(
            StorageError::Read {
                path: path.display().to_string(),
                source: e,
            }
            .to_string(),
        )
    })?;

    let result = compiler.compile(&Template::parse(&source));

    let relative = path.strip_prefix(source_dir).unwrap_or(path);
    let output = output_dir.join(relative).with_extension(COMPILED_EXTENSION);
    save_compiled(&output, &result).map_err(|e| failure(e.to_string()))?;

    if !result.is_clean() {
        tracing::debug!(
            "{}: {} skipped, {} unresolved modifiers",
            path.display(),
            result.skip_count,
            result.unresolved_total()
        );
    }

    Ok(FileReport {
        source: path.display().to_string(),
        output: output.display().to_string(),
        skip_count: result.skip_count,
        unresolved: result.unresolved,
    })
}
