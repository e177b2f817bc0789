//! Acceptance driver
//!
//! A string is in the language of a start symbol when the engine derives it from that symbol
//! and nothing is left over. Rejection is a normal answer, reported as a value.

use super::engine::{DeriveOptions, Deriver};
use super::DeriveError;
use crate::grammar::Grammar;
use crate::tree::ParseTree;
use std::fmt;

/// Answer of [`accept`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acceptance {
    /// The whole input was derived; the tree is rooted at the start symbol
    Accepted(ParseTree),
    /// The input is not in the language
    Rejected(Rejection),
}

/// Why an input was rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// No alternative of the start symbol matched
    NoDerivation,
    /// A derivation matched a proper prefix; `remainder` was left unconsumed
    UnconsumedInput { remainder: String },
}

impl Acceptance {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Acceptance::Accepted(_))
    }

    pub fn tree(&self) -> Option<&ParseTree> {
        match self {
            Acceptance::Accepted(tree) => Some(tree),
            Acceptance::Rejected(_) => None,
        }
    }

    pub fn into_tree(self) -> Option<ParseTree> {
        match self {
            Acceptance::Accepted(tree) => Some(tree),
            Acceptance::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Acceptance::Accepted(_) => None,
            Acceptance::Rejected(rejection) => Some(rejection),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::NoDerivation => write!(f, "no derivation"),
            Rejection::UnconsumedInput { remainder } => {
                write!(f, "unconsumed input '{remainder}'")
            }
        }
    }
}

impl<'g> Deriver<'g> {
    /// Accept `input` iff it is derivable from `start` with nothing left over
    pub fn accept(&self, start: &str, input: &str) -> Result<Acceptance, DeriveError> {
        let acceptance = match self.derive(start, input)? {
            Some(matched) if matched.remainder.is_empty() => Acceptance::Accepted(matched.tree),
            Some(matched) => Acceptance::Rejected(Rejection::UnconsumedInput {
                remainder: matched.remainder.to_string(),
            }),
            None => Acceptance::Rejected(Rejection::NoDerivation),
        };
        Ok(acceptance)
    }
}

/// Accept with default options
pub fn accept(grammar: &Grammar, start: &str, input: &str) -> Result<Acceptance, DeriveError> {
    Deriver::new(grammar).accept(start, input)
}

/// Accept from the grammar's own start symbol
pub fn accept_with(
    grammar: &Grammar,
    input: &str,
    options: DeriveOptions,
) -> Result<Acceptance, DeriveError> {
    Deriver::with_options(grammar, options).accept(grammar.start_symbol(), input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::builtin::classroom;
    use crate::grammar::parse_notation;

    #[test]
    fn test_accepts_full_derivation() {
        let grammar = classroom();
        let acceptance = accept(&grammar, "S", "ccb").unwrap();
        assert!(acceptance.is_accepted());
        assert_eq!(acceptance.tree().unwrap().to_string(), "S(c, B(c, B(b)))");
    }

    #[test]
    fn test_rejects_unconsumed_input() {
        let grammar = classroom();
        let acceptance = accept(&grammar, "S", "abc").unwrap();
        assert_eq!(
            acceptance,
            Acceptance::Rejected(Rejection::UnconsumedInput {
                remainder: "bc".to_string()
            })
        );
        assert!(acceptance.tree().is_none());
    }

    #[test]
    fn test_rejects_when_nothing_matches() {
        let grammar = parse_notation("S → aS | b\n").unwrap();
        let acceptance = accept(&grammar, "S", "c").unwrap();
        assert_eq!(acceptance.rejection(), Some(&Rejection::NoDerivation));
    }

    #[test]
    fn test_unknown_start_symbol_is_an_error_not_a_rejection() {
        let grammar = classroom();
        assert_eq!(
            accept(&grammar, "Q", "ab"),
            Err(DeriveError::UnknownNonterminal("Q".to_string()))
        );
    }

    #[test]
    fn test_accept_with_uses_grammar_start() {
        let grammar = classroom().with_start("B").unwrap();
        let acceptance = accept_with(&grammar, "ccb", DeriveOptions::default()).unwrap();
        assert_eq!(acceptance.into_tree().unwrap().to_string(), "B(c, B(c, B(b)))");
    }

    #[test]
    fn test_rejection_display() {
        assert_eq!(Rejection::NoDerivation.to_string(), "no derivation");
        assert_eq!(
            Rejection::UnconsumedInput {
                remainder: "c".to_string()
            }
            .to_string(),
            "unconsumed input 'c'"
        );
    }
}
