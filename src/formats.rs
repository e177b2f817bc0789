//! Output formats for parse trees
//!
//! - diagonal: multi-line ASCII drawing with `/`, `|` and `\` connectors
//! - treeviz: one node per line, nesting shown by indentation
//! - json: the tree as pretty-printed JSON
//!
//! Each format implements [`Formatter`] and is looked up by name through a [`FormatRegistry`].

pub mod diagonal;
pub mod json;
pub mod registry;
pub mod treeviz;

pub use diagonal::{render, DiagonalFormatter};
pub use json::JsonFormatter;
pub use registry::{default_registry, FormatError, FormatRegistry, Formatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
