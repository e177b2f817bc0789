//! Recursive derivation engine
//!
//! For a nonterminal and the remaining input, each alternative is walked left to right:
//!
//! - a terminal must be a literal prefix of the remaining input, and becomes a leaf
//! - a nonterminal is derived from the remaining input, and its subtree is adopted
//! - an alternative that is just `λ` matches without consuming anything
//!
//! The first alternative whose symbols all match wins. A nonterminal derivation either
//! succeeds with one remainder or fails outright; it is never retried with a different split.
//! Failed alternatives leave nothing behind, their partial children are dropped.
//!
//! A nonterminal that ends its alternative (`S → aS`) is not a Rust call: the expanding
//! nonterminal is parked on a frame stack with the children matched so far, and the spine of
//! the tree is assembled once the innermost nonterminal completes. Right-linear grammars only
//! ever recurse this way, so inputs of any length derive in constant stack.
//!
//! Two guards stop derivations that would never finish:
//! - a nonterminal reached again on the same input without consuming anything in between
//!   (`S → Sa`, `S → A`, `A → S`) is a [`DeriveError::NonConsumingCycle`]
//! - nonterminals in non-final position (`S → aSb`) still recurse, up to
//!   [`DeriveOptions::max_depth`] levels

use super::DeriveError;
use crate::grammar::symbol::EPSILON;
use crate::grammar::{Grammar, Production, Symbol};
use crate::tree::ParseTree;

/// Default nesting limit for nonterminals in non-final position
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Knobs of the derivation engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeriveOptions {
    /// Deepest nesting of nonterminals in non-final position before giving up. A nonterminal
    /// ending its alternative does not count.
    pub max_depth: usize,
    /// Label of the leaf recorded for an applied `λ` alternative
    pub epsilon_label: String,
}

impl Default for DeriveOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            epsilon_label: EPSILON.to_string(),
        }
    }
}

/// A successful derivation: the subtree and what is left of the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match<'i> {
    pub tree: ParseTree,
    pub remainder: &'i str,
}

/// Outcome of an alternative whose symbols matched
enum Step<'a, 'i> {
    /// Every symbol matched
    Complete(Vec<ParseTree>, &'i str),
    /// Everything up to a final nonterminal matched; `next` continues at `remainder`
    Tail {
        children: Vec<ParseTree>,
        next: &'a str,
        remainder: &'i str,
    },
}

/// A nonterminal waiting for the nonterminal that ends its chosen alternative
struct Frame<'a, 'i> {
    nonterminal: &'a str,
    input: &'i str,
    /// Index of the next alternative to try
    alternative: usize,
    children: Vec<ParseTree>,
    /// Expansions since the input last got shorter
    idle: usize,
}

impl<'a, 'i> Frame<'a, 'i> {
    fn new(nonterminal: &'a str, input: &'i str, idle: usize) -> Self {
        Self {
            nonterminal,
            input,
            alternative: 0,
            children: Vec::new(),
            idle,
        }
    }
}

/// Derivation engine bound to a grammar
#[derive(Debug, Clone)]
pub struct Deriver<'g> {
    grammar: &'g Grammar,
    options: DeriveOptions,
}

impl<'g> Deriver<'g> {
    pub fn new(grammar: &'g Grammar) -> Self {
        Self::with_options(grammar, DeriveOptions::default())
    }

    pub fn with_options(grammar: &'g Grammar, options: DeriveOptions) -> Self {
        Self { grammar, options }
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn options(&self) -> &DeriveOptions {
        &self.options
    }

    /// Derive a prefix of `input` from `nonterminal`
    ///
    /// Returns `Ok(None)` when no alternative matches.
    pub fn derive<'i>(
        &self,
        nonterminal: &str,
        input: &'i str,
    ) -> Result<Option<Match<'i>>, DeriveError> {
        self.derive_at(nonterminal, input, 0, 0)
    }

    fn derive_at<'a, 'i>(
        &'a self,
        nonterminal: &'a str,
        input: &'i str,
        depth: usize,
        idle: usize,
    ) -> Result<Option<Match<'i>>, DeriveError> {
        if depth >= self.options.max_depth {
            return Err(DeriveError::DepthLimitExceeded {
                limit: self.options.max_depth,
            });
        }

        let mut frames = vec![Frame::new(nonterminal, input, idle)];

        while let Some(frame) = frames.last_mut() {
            let productions = self.grammar.productions_for(frame.nonterminal)?;

            let mut step = None;
            while step.is_none() && frame.alternative < productions.len() {
                let production = &productions[frame.alternative];
                frame.alternative += 1;
                step = self.match_production(production, frame.input, depth, frame.idle)?;
            }

            match step {
                Some(Step::Complete(children, remainder)) => {
                    let mut tree = ParseTree::nonterminal(frame.nonterminal, children);
                    frames.pop();
                    while let Some(parent) = frames.pop() {
                        let mut children = parent.children;
                        children.push(tree);
                        tree = ParseTree::nonterminal(parent.nonterminal, children);
                    }
                    return Ok(Some(Match { tree, remainder }));
                }
                Some(Step::Tail {
                    children,
                    next,
                    remainder,
                }) => {
                    let idle = self.idle_after(frame.input, remainder, frame.idle, next)?;
                    frame.children = children;
                    frames.push(Frame::new(next, remainder, idle));
                }
                // Out of alternatives: the parent's pending alternative fails with it
                None => {
                    frames.pop();
                }
            }
        }

        Ok(None)
    }

    fn match_production<'a, 'i>(
        &'a self,
        production: &'a Production,
        input: &'i str,
        depth: usize,
        idle: usize,
    ) -> Result<Option<Step<'a, 'i>>, DeriveError> {
        let symbols = production.symbols();
        let Some(last) = symbols.iter().rposition(|symbol| !symbol.is_epsilon()) else {
            let leaf = ParseTree::epsilon(self.options.epsilon_label.as_str());
            return Ok(Some(Step::Complete(vec![leaf], input)));
        };

        let tail = symbols[last].as_nonterminal();
        let leading = match tail {
            Some(_) => &symbols[..last],
            None => symbols,
        };

        let mut children = Vec::with_capacity(symbols.len());
        let mut remainder = input;

        for symbol in leading {
            match symbol {
                // λ next to other symbols matches nothing and records nothing
                Symbol::Epsilon => {}
                Symbol::Terminal(text) => match remainder.strip_prefix(text.as_str()) {
                    Some(rest) => {
                        children.push(ParseTree::terminal(text.as_str()));
                        remainder = rest;
                    }
                    None => return Ok(None),
                },
                Symbol::Nonterminal(name) => {
                    let idle = self.idle_after(input, remainder, idle, name)?;
                    match self.derive_at(name, remainder, depth + 1, idle)? {
                        Some(matched) => {
                            children.push(matched.tree);
                            remainder = matched.remainder;
                        }
                        None => return Ok(None),
                    }
                }
            }
        }

        Ok(Some(match tail {
            Some(next) => Step::Tail {
                children,
                next,
                remainder,
            },
            None => Step::Complete(children, remainder),
        }))
    }

    /// Idle count of `next` entered at `remainder` by a nonterminal entered at `from`
    ///
    /// More idle expansions than the grammar has rules means some nonterminal was reached
    /// twice on the same input, and the derivation would repeat itself forever.
    fn idle_after(
        &self,
        from: &str,
        remainder: &str,
        idle: usize,
        next: &str,
    ) -> Result<usize, DeriveError> {
        if remainder.len() < from.len() {
            return Ok(0);
        }
        let idle = idle + 1;
        if idle >= self.grammar.rule_count() {
            return Err(DeriveError::NonConsumingCycle(next.to_string()));
        }
        Ok(idle)
    }
}

/// Derive with default options
pub fn derive<'i>(
    grammar: &Grammar,
    nonterminal: &str,
    input: &'i str,
) -> Result<Option<Match<'i>>, DeriveError> {
    Deriver::new(grammar).derive(nonterminal, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::builtin::classroom;
    use crate::grammar::parse_notation;
    use crate::testing::assert_tree;

    #[test]
    fn test_derive_returns_remainder() {
        let grammar = classroom();
        let matched = derive(&grammar, "S", "abc").unwrap().unwrap();

        // S → aS, inner S: bA fails on "c", cB fails, λ matches
        assert_eq!(matched.remainder, "bc");
        assert_eq!(matched.tree.to_string(), "S(a, S(λ))");
    }

    #[test]
    fn test_derive_full_match() {
        let grammar = classroom();
        let matched = derive(&grammar, "S", "acb").unwrap().unwrap();
        assert_eq!(matched.remainder, "");

        assert_tree(&matched.tree)
            .label("S")
            .child_count(2)
            .child(0, |a| {
                a.terminal("a");
            })
            .child(1, |s| {
                s.label("S").child(1, |b| {
                    b.label("B").child_count(1).child(0, |leaf| {
                        leaf.terminal("b");
                    });
                });
            });
    }

    #[test]
    fn test_derive_no_match_is_not_an_error() {
        let grammar = classroom();
        assert_eq!(derive(&grammar, "A", "c").unwrap(), None);
        assert_eq!(derive(&grammar, "B", "").unwrap(), None);
    }

    #[test]
    fn test_derive_empty_input_uses_epsilon_leaf() {
        let grammar = classroom();
        let matched = derive(&grammar, "S", "").unwrap().unwrap();
        assert_eq!(matched.remainder, "");
        assert_tree(&matched.tree)
            .label("S")
            .child_count(1)
            .child(0, |leaf| {
                leaf.epsilon();
            });
    }

    #[test]
    fn test_first_alternative_wins() {
        // Both alternatives match "a"; the declared-first one is used
        let grammar = parse_notation("S → a | aS\n").unwrap();
        let matched = derive(&grammar, "S", "aa").unwrap().unwrap();
        assert_eq!(matched.tree.to_string(), "S(a)");
        assert_eq!(matched.remainder, "a");
    }

    #[test]
    fn test_committed_inner_match_is_not_retried() {
        // A commits to its first alternative "a"; "aab" would need A → aa
        let grammar = parse_notation("S → Ab\nA → a | aa\n").unwrap();
        assert!(derive(&grammar, "S", "ab").unwrap().is_some());
        assert_eq!(derive(&grammar, "S", "aab").unwrap(), None);
    }

    #[test]
    fn test_rule_without_alternatives_never_matches() {
        let grammar = Grammar::builder()
            .rule("S", vec![vec![Symbol::terminal("a"), Symbol::nonterminal("D")]])
            .rule("D", Vec::<Production>::new())
            .build()
            .unwrap();
        assert_eq!(derive(&grammar, "D", "").unwrap(), None);
        assert_eq!(derive(&grammar, "S", "a").unwrap(), None);
    }

    #[test]
    fn test_epsilon_inside_alternative_is_skipped() {
        let grammar = parse_notation("S → aλS | b\n").unwrap();
        let matched = derive(&grammar, "S", "ab").unwrap().unwrap();
        assert_eq!(matched.tree.to_string(), "S(a, S(b))");
    }

    #[test]
    fn test_empty_alternative_behaves_like_epsilon() {
        let grammar = Grammar::builder()
            .rule("S", vec![Vec::<Symbol>::new()])
            .build()
            .unwrap();
        let matched = derive(&grammar, "S", "x").unwrap().unwrap();
        assert_eq!(matched.tree.to_string(), "S(λ)");
        assert_eq!(matched.remainder, "x");
    }

    #[test]
    fn test_multi_character_terminals() {
        let grammar = parse_notation(r#"<Stmt> → "if"<Stmt> | "go""#).unwrap();
        let matched = derive(&grammar, "Stmt", "ififgo").unwrap().unwrap();
        assert_eq!(matched.remainder, "");
        assert_eq!(matched.tree.yield_text(), "ififgo");
    }

    #[test]
    fn test_unknown_nonterminal_is_an_error() {
        let grammar = classroom();
        assert_eq!(
            derive(&grammar, "Z", "a"),
            Err(DeriveError::UnknownNonterminal("Z".to_string()))
        );
    }

    #[test]
    fn test_left_recursion_is_a_cycle() {
        let grammar = parse_notation("S → Sa | a\n").unwrap();
        assert_eq!(
            derive(&grammar, "S", "aaa"),
            Err(DeriveError::NonConsumingCycle("S".to_string()))
        );
    }

    #[test]
    fn test_indirect_cycle_through_final_nonterminals() {
        let grammar = parse_notation("S → A | a\nA → S\n").unwrap();
        assert_eq!(
            derive(&grammar, "S", "x"),
            Err(DeriveError::NonConsumingCycle("S".to_string()))
        );
    }

    #[test]
    fn test_chain_without_repeats_is_not_a_cycle() {
        let grammar = parse_notation("S → A\nA → B\nB → b\n").unwrap();
        let matched = derive(&grammar, "S", "b").unwrap().unwrap();
        assert_eq!(matched.tree.to_string(), "S(A(B(b)))");
    }

    #[test]
    fn test_depth_limit_bounds_inner_nesting() {
        let grammar = parse_notation("S → aSb | c\n").unwrap();
        let options = DeriveOptions {
            max_depth: 5,
            ..DeriveOptions::default()
        };
        let deriver = Deriver::with_options(&grammar, options);

        let matched = deriver.derive("S", "aaacbbb").unwrap().unwrap();
        assert_eq!(matched.remainder, "");
        assert_eq!(
            deriver.derive("S", "aaaaaaacbbbbbbb"),
            Err(DeriveError::DepthLimitExceeded { limit: 5 })
        );
    }

    #[test]
    fn test_final_nonterminals_do_not_count_toward_depth() {
        let grammar = classroom();
        let options = DeriveOptions {
            max_depth: 1,
            ..DeriveOptions::default()
        };
        let input = format!("{}b{}b", "a".repeat(50), "a".repeat(50));
        let matched = Deriver::with_options(&grammar, options)
            .derive("S", &input)
            .unwrap()
            .unwrap();
        assert_eq!(matched.remainder, "");
    }

    #[test]
    fn test_long_input_derives_without_deep_stack() {
        let grammar = classroom();
        let input = "a".repeat(100_000);
        let matched = derive(&grammar, "S", &input).unwrap().unwrap();
        assert_eq!(matched.remainder, "");
        assert_eq!(matched.tree.height(), 100_002);
        assert_eq!(matched.tree.yield_text(), input);
    }

    #[test]
    fn test_custom_epsilon_label() {
        let grammar = classroom();
        let options = DeriveOptions {
            epsilon_label: "ε".to_string(),
            ..DeriveOptions::default()
        };
        let matched = Deriver::with_options(&grammar, options)
            .derive("S", "")
            .unwrap()
            .unwrap();
        assert_eq!(matched.tree.to_string(), "S(ε)");
    }

    #[test]
    fn test_derive_is_deterministic() {
        let grammar = classroom();
        let first = derive(&grammar, "S", "aacccb").unwrap();
        let second = derive(&grammar, "S", "aacccb").unwrap();
        assert_eq!(first, second);
    }
}
