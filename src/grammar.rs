//! Grammar model
//!
//! A grammar maps each nonterminal name to an ordered list of productions (alternatives).
//! Each production is an ordered sequence of [`Symbol`]s. Grammars are built once through
//! [`GrammarBuilder`], which checks that every referenced nonterminal has a rule, and are
//! read-only afterwards.
//!
//! Sources:
//!
//! - [`builtin`]: the classroom grammar `S → aS | bA | cB | λ`
//! - [`notation`]: textbook notation, one rule per line
//! - [`loader`]: YAML / JSON documents and file dispatch by extension

pub mod builtin;
pub mod loader;
pub mod model;
pub mod notation;
pub mod symbol;

pub use loader::{load_file, GrammarDocument, RuleDocument};
pub use model::{Grammar, GrammarBuilder, Production};
pub use notation::parse_notation;
pub use symbol::Symbol;

use std::fmt;
use std::ops::Range;

/// Errors raised while building or loading a grammar.
///
/// These are configuration errors: the grammar is malformed. They are never produced while
/// matching input against an already-built grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    /// A production body references a nonterminal that has no rule
    UnknownNonterminal { name: String, referenced_by: String },
    /// The same nonterminal was declared twice through the builder
    DuplicateRule(String),
    /// The grammar has no rules at all
    EmptyGrammar,
    /// The declared start symbol has no rule
    UnknownStartSymbol(String),
    /// A production of the named rule contains a terminal with no text
    EmptyTerminal(String),
    /// Textbook notation could not be tokenized or parsed
    Notation { message: String, span: Range<usize> },
    /// A YAML or JSON grammar document could not be deserialized
    Document(String),
    /// A grammar file could not be read
    Io { path: String, message: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UnknownNonterminal {
                name,
                referenced_by,
            } => write!(
                f,
                "Unknown nonterminal '{name}' referenced by a production of '{referenced_by}'"
            ),
            GrammarError::DuplicateRule(name) => write!(f, "Rule '{name}' is declared twice"),
            GrammarError::EmptyGrammar => write!(f, "Grammar has no rules"),
            GrammarError::UnknownStartSymbol(name) => {
                write!(f, "Start symbol '{name}' has no rule")
            }
            GrammarError::EmptyTerminal(name) => write!(
                f,
                "Rule '{name}' has an empty terminal; write λ for the empty alternative"
            ),
            GrammarError::Notation { message, span } => {
                write!(f, "Notation error at {}..{}: {}", span.start, span.end, message)
            }
            GrammarError::Document(msg) => write!(f, "Invalid grammar document: {msg}"),
            GrammarError::Io { path, message } => {
                write!(f, "Could not read grammar file '{path}': {message}")
            }
        }
    }
}

impl std::error::Error for GrammarError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_error_display() {
        let err = GrammarError::UnknownNonterminal {
            name: "C".to_string(),
            referenced_by: "S".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "Unknown nonterminal 'C' referenced by a production of 'S'"
        );

        let err = GrammarError::Notation {
            message: "unexpected '|'".to_string(),
            span: 4..5,
        };
        assert_eq!(format!("{err}"), "Notation error at 4..5: unexpected '|'");

        assert_eq!(format!("{}", GrammarError::EmptyGrammar), "Grammar has no rules");
        assert_eq!(
            format!("{}", GrammarError::EmptyTerminal("S".to_string())),
            "Rule 'S' has an empty terminal; write λ for the empty alternative"
        );
    }
}
