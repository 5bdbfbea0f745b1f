//! Node.js binding, enabled with the `napi` feature.

use napi_derive::napi;
use std::sync::Arc;

use crate::compile::Compiler;
use crate::options::CompilerOptions;

#[derive(Debug, Clone)]
#[napi(object)]
pub struct NativeCompileResult {
    pub code: String,
    pub skip_count: u32,
    pub unresolved_json: String, // JSON-serialized alias -> count map
}

/// Compile template source with options given as JSON (see `CompilerOptions`).
#[napi]
pub fn compile_template_native(
    source: String,
    options_json: Option<String>,
) -> napi::Result<NativeCompileResult> {
    let options = match options_json {
        Some(json) => CompilerOptions::from_json(&json)
            .map_err(|e| napi::Error::from_reason(format!("Invalid compiler options: {}", e)))?,
        None => CompilerOptions::default(),
    };

    let compiler = Compiler::from_options(&options, Arc::new(options.shared_table()));
    let result = compiler.compile_source(&source);

    let unresolved_json = serde_json::to_string(&result.unresolved)
        .map_err(|e| napi::Error::from_reason(e.to_string()))?;

    Ok(NativeCompileResult {
        code: result.code,
        skip_count: u32::try_from(result.skip_count).unwrap_or(u32::MAX),
        unresolved_json,
    })
}
