//! Grammar symbols
//!
//! A symbol in a production body is one of three things: a literal terminal that must appear
//! in the input, a reference to a nonterminal that expands through its own rule, or the
//! empty-string marker.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The textbook spelling of the empty-string marker
pub const EPSILON: &str = "λ";

/// A single symbol of a production body
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    /// Literal text matched as a prefix of the remaining input
    Terminal(String),
    /// Reference to another rule of the grammar
    Nonterminal(String),
    /// The empty string (λ)
    Epsilon,
}

impl Symbol {
    pub fn terminal(text: impl Into<String>) -> Self {
        Symbol::Terminal(text.into())
    }

    pub fn nonterminal(name: impl Into<String>) -> Self {
        Symbol::Nonterminal(name.into())
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    pub fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }

    /// A terminal with no text, which the grammar builder refuses
    pub fn is_empty_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(text) if text.is_empty())
    }

    /// Name of the referenced rule, if this is a nonterminal
    pub fn as_nonterminal(&self) -> Option<&str> {
        match self {
            Symbol::Nonterminal(name) => Some(name),
            _ => None,
        }
    }
}

/// Symbols print in textbook notation: single uppercase letters bare, longer nonterminal
/// names in angle brackets, multi-character terminals quoted with `\"`, `\\` and `\n` escaped.
impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Terminal(text) if is_bare_terminal(text) => write!(f, "{text}"),
            Symbol::Terminal(text) => write!(f, "\"{}\"", escape_quoted(text)),
            Symbol::Nonterminal(name) if is_single_letter_name(name) => write!(f, "{name}"),
            Symbol::Nonterminal(name) => write!(f, "<{name}>"),
            Symbol::Epsilon => write!(f, "{EPSILON}"),
        }
    }
}

/// One-character terminals print bare unless the notation reader would take them for
/// something else.
fn is_bare_terminal(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => {
            !c.is_whitespace() && !c.is_ascii_uppercase() && !"|<>\"#λε→".contains(c)
        }
        _ => false,
    }
}

fn escape_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn is_single_letter_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_ascii_uppercase())
}
