//! Registry of parse tree renderings
//!
//! A formatter turns one finished [`ParseTree`] into text. Formatters see only the tree: the
//! grammar and the input are gone by then, so a rendering can rely on nothing but node labels,
//! node kinds and child order. Epsilon leaves are real nodes and every formatter shows them.
//!
//! The driver looks formats up by the name given in `render.format` or `--format`; an unknown
//! name is a [`FormatError::FormatNotFound`] raised before any input is derived. The shared
//! [`default_registry`] holds `diagonal` (the classroom drawing and the default), `treeviz` and
//! `json`.

use crate::tree::ParseTree;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;

/// Error that can occur during formatting
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// Format not found in registry
    FormatNotFound(String),
    /// Error during serialization
    SerializationError(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::FormatNotFound(name) => write!(f, "Format '{name}' not found"),
            FormatError::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
        }
    }
}

impl std::error::Error for FormatError {}

/// Trait for parse tree formatters
///
/// Implementors turn a tree into a string representation.
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "diagonal", "treeviz")
    fn name(&self) -> &str;

    /// Serialize a tree to this format
    fn serialize(&self, tree: &ParseTree) -> Result<String, FormatError>;

    /// One line for `list-formats`
    fn description(&self) -> &str {
        ""
    }
}

/// Tree formatters keyed by the name users pass to `--format`
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    /// Register a formatter under its own name, replacing any formatter already there
    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    /// Get a formatter by name
    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    /// Get a formatter by name, or a `FormatNotFound` error
    pub fn require(&self, name: &str) -> Result<&dyn Formatter, FormatError> {
        self.get(name)
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Render `tree` with the named format
    pub fn serialize(&self, tree: &ParseTree, format: &str) -> Result<String, FormatError> {
        self.require(format)?.serialize(tree)
    }

    /// List all available format names (sorted)
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// The built-in renderings: `diagonal`, `treeviz`, `json`
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(super::DiagonalFormatter);
        registry.register(super::TreevizFormatter);
        registry.register(super::JsonFormatter);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

static DEFAULT_REGISTRY: Lazy<FormatRegistry> = Lazy::new(FormatRegistry::with_defaults);

/// Shared registry holding the built-in formats
pub fn default_registry() -> &'static FormatRegistry {
    &DEFAULT_REGISTRY
}
