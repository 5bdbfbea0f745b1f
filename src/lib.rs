//! # Stencil Compiler
//!
//! Ahead-of-time compiler from brace-delimited templates to PHP source.
//!
//! ```text
//! <p>Do you like {$fruit|}?</p>
//! ```
//!
//! with the default modifier `|escape` bound to `htmlspecialchars(`, `)` compiles to
//!
//! ```text
//! <p>Do you like <?php echo htmlspecialchars($fruit); ?>?</p>
//! ```
//!
//! ## Pipeline Invariants
//!
//! 1. **Segments**: tokenizing yields `[literal, body, literal, .., literal]`.
//!    Directive bodies sit only at odd positions and are never reordered.
//!
//! 2. **Classification Priority**: a body is classified in this exact order:
//!    1. Comment (`{* .. *}`)
//!    2. Literal block (`{literal}..{/literal}`)
//!    3. Fixed token (`ld`, `rd`, `/if`, `/foreach`, `else` ..)
//!    4. Reference (`$var..`, `&Class..`)
//!    5. Block opener (`if`, `elseif`, `foreach`, `each`)
//!    6. Unrecognized → dropped, counted in `skip_count`
//!
//! 3. **Modifier Order**: modifiers apply left to right; `{$x|a|b}` emits `b(a($x))`.
//!
//! 4. **Lookup Order**: the compiler's own modifiers shadow the shared table.
//!
//! 5. **No Hard Failures**: template content never produces an error. Problems
//!    surface as `skip_count` and the `unresolved` alias counts of a `CompileResult`.
//!
//! 6. **Opaque Expressions**: block opener expressions are copied verbatim and
//!    never parsed; block pairing is not checked.

pub mod batch;
pub mod classify;
pub mod compile;
pub mod expression;
pub mod ident;
pub mod modifiers;
pub mod normalize;
pub mod options;
pub mod resolve;
pub mod storage;
pub mod tokenize;

#[cfg(feature = "napi")]
mod native;

#[cfg(test)]
mod batch_tests;
#[cfg(test)]
mod modifier_tests;
#[cfg(test)]
mod storage_tests;

#[cfg(feature = "napi")]
pub use native::{compile_template_native, NativeCompileResult};

pub use batch::{compile_directory, BatchReport};
pub use classify::{classify, Directive, DirectiveKind};
pub use compile::{CompileResult, Compiler, Outcome};
pub use modifiers::{ModifierRegistry, ModifierSpec, ModifierTable};
pub use options::CompilerOptions;
pub use storage::{load_options, load_template, save_compiled, StorageError};
pub use tokenize::{Segment, Template};
