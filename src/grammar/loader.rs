//! Grammar documents and file loading
//!
//! Besides textbook notation, grammars can be stored as YAML or JSON documents:
//!
//!     start: S
//!     rules:
//!       - name: S
//!         alternatives:
//!           - [{terminal: a}, {nonterminal: S}]
//!           - "bA"
//!           - [epsilon]
//!
//! An alternative is either a list of tagged symbols or a string in textbook notation.
//! [`load_file`] picks the reader from the file extension: `.yaml`/`.yml`, `.json`, and
//! textbook notation for anything else.

use super::model::{Grammar, GrammarBuilder, Production};
use super::notation::{parse_alternative, parse_notation};
use super::symbol::Symbol;
use super::GrammarError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Serializable form of a grammar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrammarDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    pub rules: Vec<RuleDocument>,
}

/// One rule of a [`GrammarDocument`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleDocument {
    pub name: String,
    #[serde(default)]
    pub alternatives: Vec<AlternativeDocument>,
}

/// An alternative, written either as tagged symbols or in textbook notation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AlternativeDocument {
    Symbols(Vec<Symbol>),
    Notation(String),
}

impl AlternativeDocument {
    fn into_production(self) -> Result<Production, GrammarError> {
        match self {
            AlternativeDocument::Symbols(symbols) => Ok(Production::new(symbols)),
            AlternativeDocument::Notation(source) => parse_alternative(&source),
        }
    }
}

impl GrammarDocument {
    pub fn from_yaml_str(source: &str) -> Result<Self, GrammarError> {
        serde_yaml::from_str(source).map_err(|e| GrammarError::Document(e.to_string()))
    }

    pub fn from_json_str(source: &str) -> Result<Self, GrammarError> {
        serde_json::from_str(source).map_err(|e| GrammarError::Document(e.to_string()))
    }

    pub fn to_yaml_string(&self) -> Result<String, GrammarError> {
        serde_yaml::to_string(self).map_err(|e| GrammarError::Document(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, GrammarError> {
        serde_json::to_string_pretty(self).map_err(|e| GrammarError::Document(e.to_string()))
    }

    /// Document listing every rule of `grammar` with tagged symbols
    pub fn from_grammar(grammar: &Grammar) -> Self {
        let rules = grammar
            .nonterminals()
            .map(|name| RuleDocument {
                name: name.to_string(),
                alternatives: grammar
                    .productions_for(name)
                    .unwrap_or_default()
                    .iter()
                    .map(|production| AlternativeDocument::Symbols(production.symbols().to_vec()))
                    .collect(),
            })
            .collect();

        GrammarDocument {
            start: Some(grammar.start_symbol().to_string()),
            rules,
        }
    }

    /// Validate the document into a [`Grammar`]
    pub fn into_grammar(self) -> Result<Grammar, GrammarError> {
        let mut builder = GrammarBuilder::new();
        if let Some(start) = self.start {
            builder = builder.start(start);
        }
        for rule in self.rules {
            let productions = rule
                .alternatives
                .into_iter()
                .map(AlternativeDocument::into_production)
                .collect::<Result<Vec<_>, _>>()?;
            builder = builder.rule(rule.name, productions);
        }
        builder.build()
    }
}

/// Supported grammar file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarFormat {
    Notation,
    Yaml,
    Json,
}

impl GrammarFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => GrammarFormat::Yaml,
            Some("json") => GrammarFormat::Json,
            _ => GrammarFormat::Notation,
        }
    }
}

/// Parse grammar source in the given format
pub fn parse_source(source: &str, format: GrammarFormat) -> Result<Grammar, GrammarError> {
    match format {
        GrammarFormat::Notation => parse_notation(source),
        GrammarFormat::Yaml => GrammarDocument::from_yaml_str(source)?.into_grammar(),
        GrammarFormat::Json => GrammarDocument::from_json_str(source)?.into_grammar(),
    }
}

/// Read and validate a grammar file
pub fn load_file(path: impl AsRef<Path>) -> Result<Grammar, GrammarError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|e| GrammarError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    parse_source(&source, GrammarFormat::from_path(path))
}
