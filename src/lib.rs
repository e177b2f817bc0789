//! # rlgrammar
//!
//! Derivation engine for right-linear grammars.
//!
//! Given a grammar such as
//!
//!     S → aS | bA | cB | λ
//!     A → aA | b
//!     B → cB | b
//!
//! and an input string, the engine decides whether the string can be derived from a start
//! symbol and, when it can, builds the derivation (parse) tree.
//!
//! Layout
//!
//! The data flows leaves first:
//!   src/
//!   ├── grammar      Symbols, productions, the immutable Grammar and its sources (notation, YAML, JSON)
//!   ├── derivation   The recursive matcher (engine) and the acceptance driver
//!   ├── tree         The parse tree handed back to callers
//!   ├── formats      Renderers: diagonal ASCII tree, treeviz, JSON
//!   ├── config       Layered configuration (embedded defaults + user files)
//!   └── driver       The "for each input: accepted / rejected" loop used by the binary
//!
//! For testing helpers, see the [testing module](crate::testing).

pub mod config;
pub mod derivation;
pub mod driver;
pub mod formats;
pub mod grammar;
pub mod testing;
pub mod tree;

pub use derivation::{accept, derive, Acceptance, DeriveError, DeriveOptions, Deriver, Rejection};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Production, Symbol};
pub use tree::{NodeKind, ParseTree};
