//! Directive Classifier for the Stencil Compiler
//!
//! A directive body is classified by trying a fixed, ordered list of grammars.
//! The first grammar that matches decides the kind; a body that could satisfy
//! two grammars always resolves to the earlier one.
//!
//! 1. Comment        `{* .. *}`, `{*}`
//! 2. Literal block  `{literal}..{/literal}`
//! 3. Fixed token    `{ld}`, `{rd}`, `{/if}`, `{/foreach}`, `{else}` ..
//! 4. Reference      `{$var.key->prop|mod|mod.sub}`, `{&Class:CONST}`, `{&Class.prop}`
//! 5. Block opener   `{if ..}`, `{elseif ..}`, `{foreach ..}`, `{each ..}`
//! 6. Unrecognized

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::ident::NAME_CLASS;
use crate::resolve::ModifierCall;

// ═══════════════════════════════════════════════════════════════════════════════
// GRAMMARS
// ═══════════════════════════════════════════════════════════════════════════════

lazy_static! {
    static ref COMMENT_RE: Regex = Regex::new(r"(?s)^\*(?:.*\*)?\n?$").unwrap();

    static ref LITERAL_RE: Regex = Regex::new(r"(?s)^literal\}(?P<raw>.*)\{/literal$").unwrap();

    static ref VARIABLE_RE: Regex = Regex::new(&format!(
        r"^\$(?P<name>{n}+){sub}{mods}\n?$",
        n = NAME_CLASS,
        sub = sub_pattern(),
        mods = modifier_pattern()
    ))
    .unwrap();

    static ref STATIC_RE: Regex = Regex::new(&format!(
        r"^&(?P<class>{n}+)(?P<dot>:|\.)(?P<member>{n}+){sub}{mods}\n?$",
        n = NAME_CLASS,
        sub = sub_pattern(),
        mods = modifier_pattern()
    ))
    .unwrap();

    static ref ACCESS_RE: Regex =
        Regex::new(&format!(r"(?P<op>\.|->)(?P<key>{}+)", NAME_CLASS)).unwrap();

    static ref BLOCK_RE: Regex =
        Regex::new(r"(?s)^(?P<keyword>if|elseif|foreach|each)\s+(?P<expr>.*)$").unwrap();
}

fn sub_pattern() -> String {
    format!(r"(?P<sub>(?:(?:\.|->){}+)*)", NAME_CLASS)
}

fn modifier_pattern() -> String {
    format!(r"(?P<mods>(?:\|{n}*(?:\.{n}*)?)*)", n = NAME_CLASS)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DIRECTIVE TYPES
// ═══════════════════════════════════════════════════════════════════════════════

/// Closed table of bodies that map to a fixed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedToken {
    LeftDelimiter,
    RightDelimiter,
    EndIf,
    EndForeach,
    Else,
}

impl FixedToken {
    pub fn lookup(body: &str) -> Option<Self> {
        match body {
            "ld" | "ldelim" => Some(FixedToken::LeftDelimiter),
            "rd" | "rdelim" => Some(FixedToken::RightDelimiter),
            "/if" => Some(FixedToken::EndIf),
            "/foreach" | "/each" => Some(FixedToken::EndForeach),
            "else" => Some(FixedToken::Else),
            _ => None,
        }
    }

    /// Host code for this token, or `None` when it maps to a raw delimiter
    /// character that must not be wrapped.
    pub fn code(self) -> Option<&'static str> {
        match self {
            FixedToken::LeftDelimiter | FixedToken::RightDelimiter => None,
            FixedToken::EndIf => Some("endif;"),
            FixedToken::EndForeach => Some("endforeach;"),
            FixedToken::Else => Some("else:"),
        }
    }

    pub fn delimiter(self) -> Option<char> {
        match self {
            FixedToken::LeftDelimiter => Some('{'),
            FixedToken::RightDelimiter => Some('}'),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKeyword {
    If,
    ElseIf,
    Foreach,
}

impl BlockKeyword {
    fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "if" => Some(BlockKeyword::If),
            "elseif" => Some(BlockKeyword::ElseIf),
            "foreach" | "each" => Some(BlockKeyword::Foreach),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BlockKeyword::If => "if",
            BlockKeyword::ElseIf => "elseif",
            BlockKeyword::Foreach => "foreach",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceRoot {
    /// `$name`
    Variable(String),
    /// `&Class:NAME`
    StaticConstant { class: String, name: String },
    /// `&Class.name`
    StaticProperty { class: String, name: String },
}

/// One step of a sub-access chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// `.key`, rendered as an index access
    Key(String),
    /// `->field`, kept as a member access
    Member(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub root: ReferenceRoot,
    pub accesses: Vec<Access>,
    pub modifiers: Vec<ModifierCall>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    Comment,
    LiteralBlock(String),
    Fixed(FixedToken),
    Reference(Reference),
    BlockOpener { keyword: BlockKeyword, expr: String },
    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    /// Body text the kind was read from.
    pub raw: String,
    pub kind: DirectiveKind,
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLASSIFICATION
// ═══════════════════════════════════════════════════════════════════════════════

type Matcher = fn(&str) -> Option<DirectiveKind>;

const MATCHERS: &[Matcher] = &[
    match_comment,
    match_literal_block,
    match_fixed_token,
    match_reference,
    match_block_opener,
];

pub fn classify(body: &str) -> Directive {
    let kind = MATCHERS
        .iter()
        .find_map(|matcher| matcher(body))
        .unwrap_or(DirectiveKind::Unrecognized);

    Directive {
        raw: body.to_string(),
        kind,
    }
}

pub fn match_comment(body: &str) -> Option<DirectiveKind> {
    COMMENT_RE.is_match(body).then_some(DirectiveKind::Comment)
}

pub fn match_literal_block(body: &str) -> Option<DirectiveKind> {
    let caps = LITERAL_RE.captures(body)?;
    Some(DirectiveKind::LiteralBlock(caps["raw"].to_string()))
}

pub fn match_fixed_token(body: &str) -> Option<DirectiveKind> {
    FixedToken::lookup(body).map(DirectiveKind::Fixed)
}

pub fn match_reference(body: &str) -> Option<DirectiveKind> {
    if let Some(caps) = VARIABLE_RE.captures(body) {
        let root = ReferenceRoot::Variable(caps["name"].to_string());
        return Some(DirectiveKind::Reference(reference_from(root, &caps)));
    }

    let caps = STATIC_RE.captures(body)?;
    let class = caps["class"].to_string();
    let name = caps["member"].to_string();
    let root = if &caps["dot"] == ":" {
        ReferenceRoot::StaticConstant { class, name }
    } else {
        ReferenceRoot::StaticProperty { class, name }
    };
    Some(DirectiveKind::Reference(reference_from(root, &caps)))
}

pub fn match_block_opener(body: &str) -> Option<DirectiveKind> {
    let caps = BLOCK_RE.captures(body)?;
    let keyword = BlockKeyword::parse(&caps["keyword"])?;
    Some(DirectiveKind::BlockOpener {
        keyword,
        expr: caps["expr"].to_string(),
    })
}

fn reference_from(root: ReferenceRoot, caps: &Captures) -> Reference {
    let sub = caps.name("sub").map_or("", |m| m.as_str());
    let mods = caps.name("mods").map_or("", |m| m.as_str());

    Reference {
        root,
        accesses: parse_accesses(sub),
        modifiers: parse_modifier_calls(mods),
    }
}

fn parse_accesses(sub: &str) -> Vec<Access> {
    ACCESS_RE
        .captures_iter(sub)
        .map(|caps| {
            let key = caps["key"].to_string();
            if &caps["op"] == "." {
                Access::Key(key)
            } else {
                Access::Member(key)
            }
        })
        .collect()
}

/// `|a|b.sub||` → `[a, b.sub]`. Slots with no alias are empty and skipped;
/// `|a.` keeps an empty sub-key.
fn parse_modifier_calls(mods: &str) -> Vec<ModifierCall> {
    mods.split('|')
        .filter_map(|slot| {
            let (alias, sub_key) = match slot.split_once('.') {
                Some((alias, sub)) => (alias, Some(sub)),
                None => (slot, None),
            };
            if alias.is_empty() {
                return None;
            }
            Some(ModifierCall {
                alias: alias.to_string(),
                sub_key: sub_key.map(str::to_string),
            })
        })
        .collect()
}
