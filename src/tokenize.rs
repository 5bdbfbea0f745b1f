//! Tokenizer for the Stencil Compiler
//!
//! Splits template source into alternating literal and directive segments.
//! Directive bodies are the text between `{` and `}`; comments (`{* .. *}`)
//! and verbatim blocks (`{literal}..{/literal}`) are captured whole even when
//! they contain a closing brace.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Alternatives are tried in order: bare `*`, comment, literal block, plain body.
    static ref DIRECTIVE_RE: Regex =
        Regex::new(r"(?s)\{(\*|\*.*?\*|literal\}.*?\{/literal|[^}]*)\}").unwrap();
}

/// One unit of a tokenized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    Directive(&'a str),
}

/// A tokenized template. Even positions hold literal text, odd positions hold
/// directive bodies; literal text may be empty at either end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Template {
    parts: Vec<String>,
}

impl Template {
    pub fn parse(source: &str) -> Self {
        Template {
            parts: tokenize(source),
        }
    }

    /// The degenerate template produced for a missing or unreadable source.
    pub fn empty() -> Self {
        Self::default()
    }

    /// True only for a template with zero segments. Tokenizing an empty
    /// string still yields one (empty) literal segment.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn directive_count(&self) -> usize {
        self.parts.len() / 2
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment<'_>> {
        self.parts.iter().enumerate().map(|(index, part)| {
            if index % 2 == 1 {
                Segment::Directive(part.as_str())
            } else {
                Segment::Literal(part.as_str())
            }
        })
    }
}

/// Split `source` into `[literal, body, literal, body, .., literal]`.
pub fn tokenize(source: &str) -> Vec<String> {
    let mut parts = Vec::new();
    let mut last = 0;

    for caps in DIRECTIVE_RE.captures_iter(source) {
        let (Some(whole), Some(body)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        parts.push(source[last..whole.start()].to_string());
        parts.push(body.as_str().to_string());
        last = whole.end();
    }
    parts.push(source[last..].to_string());

    parts
}
