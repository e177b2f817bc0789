//! The classroom grammar
//!
//!     S → aS | bA | cB | λ
//!     A → aA | b
//!     B → cB | b
//!
//! Its language is `a*(ba*b | c+b)?`.

use super::model::Grammar;
use super::symbol::Symbol;

/// Source of the classroom grammar in textbook notation
pub const CLASSROOM_NOTATION: &str = "S → aS | bA | cB | λ\nA → aA | b\nB → cB | b\n";

/// Build the classroom grammar
pub fn classroom() -> Grammar {
    let t = Symbol::terminal;
    let n = Symbol::nonterminal;

    match Grammar::builder()
        .rule(
            "S",
            vec![
                vec![t("a"), n("S")],
                vec![t("b"), n("A")],
                vec![t("c"), n("B")],
                vec![Symbol::Epsilon],
            ],
        )
        .rule("A", vec![vec![t("a"), n("A")], vec![t("b")]])
        .rule("B", vec![vec![t("c"), n("B")], vec![t("b")]])
        .build()
    {
        Ok(grammar) => grammar,
        Err(e) => unreachable!("classroom grammar is well formed: {e}"),
    }
}
