//! Compiler Driver for the Stencil Compiler
//!
//! One compile pass visits every segment of a template exactly once. Literal
//! segments are copied through; directive segments are classified and
//! replaced by their output. Malformed input never fails the pass: it shows
//! up in the diagnostics of the returned `CompileResult`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::classify::{classify, match_reference, DirectiveKind};
use crate::expression::{build_reference, wrap_code};
use crate::modifiers::{ModifierRegistry, ModifierSpec, ModifierTable};
use crate::normalize::{substitute_empty_pipes, validate_default_modifier};
use crate::options::CompilerOptions;
use crate::tokenize::{Segment, Template};

// ═══════════════════════════════════════════════════════════════════════════════
// RESULT TYPES
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResult {
    pub code: String,
    /// Directives that matched no grammar and were dropped.
    pub skip_count: usize,
    /// Modifier alias → number of invocations that found no definition.
    pub unresolved: BTreeMap<String, usize>,
}

impl CompileResult {
    /// No skipped directives and no unresolved modifiers.
    pub fn is_clean(&self) -> bool {
        self.skip_count == 0 && self.unresolved.is_empty()
    }

    pub fn unresolved_total(&self) -> usize {
        self.unresolved.values().sum()
    }
}

/// What one directive contributes to a pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Rendered {
        text: String,
        unresolved: Vec<String>,
    },
    Skipped,
}

impl Outcome {
    fn text(text: impl Into<String>) -> Self {
        Outcome::Rendered {
            text: text.into(),
            unresolved: Vec::new(),
        }
    }
}

/// Accumulator for a pass in progress.
#[derive(Default)]
struct CompilePass {
    result: CompileResult,
}

impl CompilePass {
    fn push_literal(&mut self, text: &str) {
        self.result.code.push_str(text);
    }

    fn push_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Rendered { text, unresolved } => {
                self.result.code.push_str(&text);
                for alias in unresolved {
                    *self.result.unresolved.entry(alias).or_insert(0) += 1;
                }
            }
            Outcome::Skipped => self.result.skip_count += 1,
        }
    }

    fn finish(self) -> CompileResult {
        self.result
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMPILER
// ═══════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default)]
pub struct Compiler {
    registry: ModifierRegistry,
    default_modifier: Option<String>,
    debug: bool,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_shared_modifiers(shared: Arc<ModifierTable>) -> Self {
        Compiler {
            registry: ModifierRegistry::with_shared(shared),
            ..Self::default()
        }
    }

    pub fn from_options(options: &CompilerOptions, shared: Arc<ModifierTable>) -> Self {
        let mut compiler = Compiler::with_shared_modifiers(shared);
        if let Some(default) = &options.default_modifier {
            compiler.set_default_modifier(default);
        }
        compiler.set_debug(options.debug);
        compiler.add_modifiers(&options.modifiers);
        compiler
    }

    /// Returns false, keeping any previous default, when `candidate` is not a
    /// valid modifier name.
    pub fn set_default_modifier(&mut self, candidate: &str) -> bool {
        match validate_default_modifier(candidate) {
            Some(default) => {
                self.default_modifier = Some(default);
                true
            }
            None => false,
        }
    }

    pub fn default_modifier(&self) -> Option<&str> {
        self.default_modifier.as_deref()
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn set_shared_modifiers(&mut self, shared: Arc<ModifierTable>) {
        self.registry.set_shared(shared);
    }

    pub fn register_modifier(&mut self, alias: &str, spec: ModifierSpec) -> bool {
        self.registry.register(alias, spec)
    }

    pub fn add_modifiers(&mut self, map: &Map<String, Value>) -> usize {
        self.registry.add_modifiers(map)
    }

    pub fn registry(&self) -> &ModifierRegistry {
        &self.registry
    }

    pub fn compile_source(&self, source: &str) -> CompileResult {
        self.compile(&Template::parse(source))
    }

    /// Run one pass over `template`. Diagnostics start from zero on every call.
    pub fn compile(&self, template: &Template) -> CompileResult {
        let mut pass = CompilePass::default();

        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => pass.push_literal(text),
                Segment::Directive(body) => pass.push_outcome(self.compile_directive(body)),
            }
        }

        pass.finish()
    }

    pub fn compile_directive(&self, body: &str) -> Outcome {
        if body.is_empty() {
            return Outcome::text("");
        }

        let directive = classify(body);
        match directive.kind {
            DirectiveKind::Comment => Outcome::text(""),
            DirectiveKind::LiteralBlock(raw) => Outcome::text(raw),
            DirectiveKind::Fixed(token) => Outcome::text(match token.code() {
                Some(code) => wrap_code(code),
                None => token.delimiter().map(String::from).unwrap_or_default(),
            }),
            DirectiveKind::Reference(reference) => {
                let (body, reference) = match self.apply_default_modifier(body) {
                    None => (body.to_string(), reference),
                    Some(rewritten) => match match_reference(&rewritten) {
                        Some(DirectiveKind::Reference(reclassified)) => (rewritten, reclassified),
                        _ => {
                            tracing::debug!("Dropping directive {{{}}} after default modifier", body);
                            return Outcome::Skipped;
                        }
                    },
                };
                let debug_source = self.debug.then_some(body.as_str());
                let built = build_reference(&reference, &self.registry, debug_source);
                Outcome::Rendered {
                    text: built.statement,
                    unresolved: built.unresolved,
                }
            }
            DirectiveKind::BlockOpener { keyword, expr } => {
                Outcome::text(wrap_code(&format!("{}( {} ):", keyword.as_str(), expr)))
            }
            DirectiveKind::Unrecognized => {
                tracing::debug!("Skipping unrecognized directive {{{}}}", body);
                Outcome::Skipped
            }
        }
    }

    fn apply_default_modifier(&self, body: &str) -> Option<String> {
        let default = self.default_modifier.as_deref()?;
        substitute_empty_pipes(body, default)
    }
}
