//! Productions, grammars and the grammar builder
//!
//! The [`Grammar`] is immutable once built. All well-formedness checks happen in
//! [`GrammarBuilder::build`]; after that, lookups by nonterminal name can only fail when a
//! caller asks for a name the grammar never declared (for instance an unknown start symbol).

use super::symbol::Symbol;
use super::GrammarError;
use std::collections::HashMap;
use std::fmt;

/// One alternative of a rule: an ordered sequence of symbols
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Production {
    symbols: Vec<Symbol>,
}

impl Production {
    pub fn new(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// The `λ` alternative
    pub fn epsilon() -> Self {
        Self::new(vec![Symbol::Epsilon])
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// True when the alternative is exactly the empty-string marker
    pub fn is_epsilon(&self) -> bool {
        matches!(self.symbols.as_slice(), [Symbol::Epsilon])
    }

    /// Nonterminals referenced by this alternative, in order
    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().filter_map(Symbol::as_nonterminal)
    }
}

impl From<Vec<Symbol>> for Production {
    fn from(symbols: Vec<Symbol>) -> Self {
        Self::new(symbols)
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.symbols.is_empty() {
            return write!(f, "{}", Symbol::Epsilon);
        }
        for symbol in &self.symbols {
            write!(f, "{symbol}")?;
        }
        Ok(())
    }
}

/// Lookup of a nonterminal the grammar does not declare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownNonterminal(pub String);

impl fmt::Display for UnknownNonterminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unknown nonterminal '{}'", self.0)
    }
}

impl std::error::Error for UnknownNonterminal {}

/// An immutable right-linear grammar
///
/// Rules keep their declaration order, which is also the order used for display. The
/// alternatives of each rule keep theirs, which is the order the derivation engine tries them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    start: String,
    rules: HashMap<String, Vec<Production>>,
    order: Vec<String>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// The default start symbol (the first declared rule unless set explicitly)
    pub fn start_symbol(&self) -> &str {
        &self.start
    }

    /// Alternatives of `nonterminal`, in declared order
    pub fn productions_for(&self, nonterminal: &str) -> Result<&[Production], UnknownNonterminal> {
        self.rules
            .get(nonterminal)
            .map(Vec::as_slice)
            .ok_or_else(|| UnknownNonterminal(nonterminal.to_string()))
    }

    pub fn contains(&self, nonterminal: &str) -> bool {
        self.rules.contains_key(nonterminal)
    }

    /// Declared nonterminals, in declaration order
    pub fn nonterminals(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn rule_count(&self) -> usize {
        self.order.len()
    }

    /// Same rules, different default start symbol
    pub fn with_start(mut self, start: &str) -> Result<Self, GrammarError> {
        if !self.contains(start) {
            return Err(GrammarError::UnknownStartSymbol(start.to_string()));
        }
        self.start = start.to_string();
        Ok(self)
    }
}

/// Prints the grammar back in textbook notation, one rule per line
impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, name) in self.order.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{} →", Symbol::Nonterminal(name.clone()))?;
            let alternatives = &self.rules[name];
            for (alt_index, production) in alternatives.iter().enumerate() {
                if alt_index > 0 {
                    write!(f, " |")?;
                }
                write!(f, " {production}")?;
            }
        }
        Ok(())
    }
}

/// Collects rules and validates them into a [`Grammar`]
#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    start: Option<String>,
    rules: Vec<(String, Vec<Production>)>,
    duplicates: Vec<String>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the start symbol explicitly (defaults to the first declared rule)
    pub fn start(mut self, name: impl Into<String>) -> Self {
        self.start = Some(name.into());
        self
    }

    /// Declare a rule with all its alternatives
    ///
    /// Declaring the same nonterminal twice is reported by [`build`](Self::build). Use
    /// [`alternative`](Self::alternative) to extend a rule instead.
    pub fn rule<I, P>(mut self, name: impl Into<String>, alternatives: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Production>,
    {
        let name = name.into();
        if self.position(&name).is_some() {
            self.duplicates.push(name.clone());
        }
        self.rules
            .push((name, alternatives.into_iter().map(Into::into).collect()));
        self
    }

    /// Append one alternative to a rule, declaring the rule if needed
    pub fn alternative(mut self, name: impl Into<String>, production: impl Into<Production>) -> Self {
        self.push_alternative(name.into(), production.into());
        self
    }

    pub(crate) fn push_alternative(&mut self, name: String, production: Production) {
        match self.position(&name) {
            Some(index) => self.rules[index].1.push(production),
            None => self.rules.push((name, vec![production])),
        }
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.rules.iter().position(|(rule, _)| rule == name)
    }

    /// Validate and freeze the grammar
    ///
    /// Fails when a rule is declared twice, when there are no rules, when the start symbol has
    /// no rule, when a production contains an empty terminal, or when a production references a
    /// nonterminal without a rule. A rule with no alternatives is valid: it simply never matches.
    /// Empty alternatives are written `λ`; an empty terminal would match without consuming.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        if let Some(name) = self.duplicates.into_iter().next() {
            return Err(GrammarError::DuplicateRule(name));
        }

        let start = match (self.start, self.rules.first()) {
            (_, None) => return Err(GrammarError::EmptyGrammar),
            (Some(start), _) => start,
            (None, Some((first, _))) => first.clone(),
        };

        let order: Vec<String> = self.rules.iter().map(|(name, _)| name.clone()).collect();
        let rules: HashMap<String, Vec<Production>> = self.rules.into_iter().collect();

        if !rules.contains_key(&start) {
            return Err(GrammarError::UnknownStartSymbol(start));
        }

        for name in &order {
            for production in &rules[name] {
                if production.symbols().iter().any(Symbol::is_empty_terminal) {
                    return Err(GrammarError::EmptyTerminal(name.clone()));
                }
                if let Some(missing) = production.references().find(|r| !rules.contains_key(*r)) {
                    return Err(GrammarError::UnknownNonterminal {
                        name: missing.to_string(),
                        referenced_by: name.clone(),
                    });
                }
            }
        }

        Ok(Grammar {
            start,
            rules,
            order,
        })
    }
}
