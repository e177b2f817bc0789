//! Derivation
//!
//! Two layers:
//!
//! - [`engine`]: `derive(nonterminal, input)` tries the alternatives of a nonterminal in
//!   declared order and returns the first one whose symbols all match, together with the
//!   unconsumed remainder. No match is a normal outcome (`Ok(None)`), not an error.
//! - [`acceptance`]: `accept(start, input)` runs the engine on the whole input and accepts
//!   only when the remainder is empty.
//!
//! Neither layer mutates shared state: the grammar is borrowed read-only and every recursive
//! call owns its own slice of the input, so calls are re-entrant and safe to run on independent
//! inputs from several threads.

pub mod acceptance;
pub mod engine;

pub use acceptance::{accept, accept_with, Acceptance, Rejection};
pub use engine::{derive, DeriveOptions, Deriver, Match};

use crate::grammar::model::UnknownNonterminal;
use std::fmt;

/// Failures of a derivation call
///
/// Not matching is never an error; these only report a call that could not be answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeriveError {
    /// Asked to derive from a nonterminal the grammar does not declare
    UnknownNonterminal(String),
    /// A nonterminal can reach itself without consuming input, so the derivation never ends
    NonConsumingCycle(String),
    /// Nonterminals in non-final position nested deeper than the configured limit
    DepthLimitExceeded { limit: usize },
}

impl fmt::Display for DeriveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeriveError::UnknownNonterminal(name) => write!(f, "Unknown nonterminal '{name}'"),
            DeriveError::NonConsumingCycle(name) => {
                write!(f, "Nonterminal '{name}' expands to itself without consuming input")
            }
            DeriveError::DepthLimitExceeded { limit } => {
                write!(f, "Derivation exceeded the recursion limit of {limit}")
            }
        }
    }
}

impl std::error::Error for DeriveError {}

impl From<UnknownNonterminal> for DeriveError {
    fn from(err: UnknownNonterminal) -> Self {
        DeriveError::UnknownNonterminal(err.0)
    }
}
