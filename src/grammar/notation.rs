//! Textbook grammar notation
//!
//! Reads grammars written the way they appear on the board:
//!
//!     S → aS | bA | cB | λ
//!     A → aA | b
//!     B → cB | b
//!
//! Grammar of the notation itself:
//!
//!     <grammar>     = <newline>* (<rule> (<newline>+ | <end>))*
//!     <rule>        = <nonterminal> <arrow> <alternative> ("|" <alternative>)*
//!     <alternative> = <symbol>+
//!     <symbol>      = <nonterminal> | <terminal> | "λ" | "ε"
//!
//! Where:
//!   - `<arrow>` is `→`, `->` or `::=`
//!   - `<nonterminal>` is a single uppercase ASCII letter or a `<Name>` in angle brackets
//!   - `<terminal>` is any other single non-space character, or `"text"` for longer literals;
//!     quoted text is never empty and may use `\"`, `\\` and `\n`
//!   - `#` starts a comment that runs to the end of the line
//!
//! A head that appears on several lines collects all their alternatives. The first head is the
//! default start symbol.
//!
//! Tokenization is done by logos, the token stream is parsed with chumsky.

use super::model::{Grammar, GrammarBuilder, Production};
use super::symbol::Symbol;
use super::GrammarError;
use chumsky::{prelude::*, Stream};
use logos::Logos;
use std::fmt;
use std::ops::Range;

/// Tokens of the textbook notation
#[derive(Logos, Debug, Clone, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r]+|#[^\n]*")]
pub enum Token {
    #[token("→")]
    #[token("->")]
    #[token("::=")]
    Arrow,

    #[token("|")]
    Bar,

    #[token("λ")]
    #[token("ε")]
    Epsilon,

    #[token("\n")]
    Newline,

    // Single uppercase letter or <Name>
    #[regex(r"[A-Z]", |lex| lex.slice().to_string())]
    #[regex(r"<[A-Za-z_][A-Za-z0-9_']*>", |lex| {
        let slice = lex.slice();
        slice[1..slice.len() - 1].to_string()
    })]
    Nonterminal(String),

    // Non-empty quoted literal or any other single character
    #[regex(r#""([^"\\\n]|\\[\\"n])+""#, |lex| {
        let slice = lex.slice();
        unescape_quoted(&slice[1..slice.len() - 1])
    })]
    #[regex(r##"[^\sA-Z|<>"#λε→]"##, |lex| lex.slice().to_string())]
    Terminal(String),
}

/// Undo the `\"`, `\\` and `\n` escapes of a quoted literal; the lexer admits no others
fn unescape_quoted(body: &str) -> String {
    let mut text = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some(escaped) => text.push(escaped),
            None => text.push('\\'),
        }
    }
    text
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Arrow => write!(f, "→"),
            Token::Bar => write!(f, "|"),
            Token::Epsilon => write!(f, "λ"),
            Token::Newline => write!(f, "end of line"),
            Token::Nonterminal(name) => write!(f, "nonterminal {name}"),
            Token::Terminal(text) => write!(f, "terminal '{text}'"),
        }
    }
}

type TokenLocation = (Token, Range<usize>);
type ParserError = Simple<Token>;

/// A rule as written on one line, before merging into a grammar
type RuleLine = (String, Vec<Production>);

/// Tokenize notation source, keeping byte ranges
pub fn tokenize(source: &str) -> Result<Vec<TokenLocation>, GrammarError> {
    let mut lexer = Token::lexer(source);
    let mut tokens = Vec::new();

    while let Some(result) = lexer.next() {
        match result {
            Ok(token) => tokens.push((token, lexer.span())),
            Err(()) => {
                return Err(GrammarError::Notation {
                    message: format!("unrecognized input '{}'", lexer.slice()),
                    span: lexer.span(),
                })
            }
        }
    }

    Ok(tokens)
}

fn alternative_parser() -> impl Parser<Token, Production, Error = ParserError> {
    let symbol = select! {
        Token::Nonterminal(name) => Symbol::Nonterminal(name),
        Token::Terminal(text) => Symbol::Terminal(text),
        Token::Epsilon => Symbol::Epsilon,
    };

    symbol.repeated().at_least(1).map(Production::new)
}

fn rules_parser() -> impl Parser<Token, Vec<RuleLine>, Error = ParserError> {
    let head = select! { Token::Nonterminal(name) => name };

    let alternatives = alternative_parser()
        .separated_by(just(Token::Bar))
        .at_least(1);

    let line_end = just(Token::Newline)
        .repeated()
        .at_least(1)
        .ignored()
        .or(end());

    let rule = head
        .then_ignore(just(Token::Arrow))
        .then(alternatives)
        .then_ignore(line_end);

    just(Token::Newline)
        .repeated()
        .ignore_then(rule.repeated())
        .then_ignore(end())
}

/// Parse textbook notation into a validated [`Grammar`]
pub fn parse_notation(source: &str) -> Result<Grammar, GrammarError> {
    parse_notation_into(source, GrammarBuilder::new())?.build()
}

/// Parse textbook notation, appending its rules to an existing builder
pub fn parse_notation_into(
    source: &str,
    mut builder: GrammarBuilder,
) -> Result<GrammarBuilder, GrammarError> {
    let tokens = tokenize(source)?;
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(eoi, tokens.into_iter());

    let lines = rules_parser().parse(stream).map_err(|errors| {
        let first = errors.into_iter().next();
        match first {
            Some(error) => notation_error(&error),
            None => GrammarError::Notation {
                message: "could not parse grammar".to_string(),
                span: 0..0,
            },
        }
    })?;

    for (head, productions) in lines {
        for production in productions {
            builder.push_alternative(head.clone(), production);
        }
    }
    Ok(builder)
}

/// Parse a single alternative such as `aS` or `"if"<Cond>`
pub fn parse_alternative(source: &str) -> Result<Production, GrammarError> {
    let tokens = tokenize(source)?;
    let eoi = source.len()..source.len();
    let stream = Stream::from_iter(eoi, tokens.into_iter());

    alternative_parser()
        .then_ignore(end())
        .parse(stream)
        .map_err(|errors| match errors.first() {
            Some(error) => notation_error(error),
            None => GrammarError::Notation {
                message: "could not parse alternative".to_string(),
                span: 0..0,
            },
        })
}

fn notation_error(error: &ParserError) -> GrammarError {
    let message = match error.found() {
        Some(token) => format!("unexpected {token}"),
        None => "unexpected end of input".to_string(),
    };
    GrammarError::Notation {
        message,
        span: error.span(),
    }
}
