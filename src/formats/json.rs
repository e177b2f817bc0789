//! JSON output for parse trees

use super::registry::{FormatError, Formatter};
use crate::tree::ParseTree;

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, tree: &ParseTree) -> Result<String, FormatError> {
        let mut json = serde_json::to_string_pretty(tree)
            .map_err(|e| FormatError::SerializationError(e.to_string()))?;
        json.push('\n');
        Ok(json)
    }

    fn description(&self) -> &str {
        "Pretty-printed JSON (label, kind, children)"
    }
}
