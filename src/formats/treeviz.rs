//! Treeviz formatter for parse trees
//!
//! Treeviz is a one line per node representation, which makes large trees quick to scan. Nesting
//! is encoded with box-drawing connectors, two columns per level:
//!
//!     ◇ S
//!     ├─ ◦ a
//!     └─ ◇ S
//!       ├─ ◦ c
//!       └─ ◇ B
//!         └─ ◦ b
//!
//! Icons
//!     Nonterminal: ◇
//!     Terminal: ◦
//!     Epsilon: ∅

use super::registry::{FormatError, Formatter};
use crate::tree::{NodeKind, ParseTree};

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

/// Get the icon for a node kind
fn get_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Nonterminal => "◇",
        NodeKind::Terminal => "◦",
        NodeKind::Epsilon => "∅",
    }
}

fn format_node(node: &ParseTree, prefix: &str, child_index: usize, child_count: usize) -> String {
    let mut output = String::new();

    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(node.kind()),
        truncate(node.label(), 30)
    ));

    if !node.is_leaf() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        let child_count = node.children().len();

        for (i, child) in node.children().iter().enumerate() {
            output.push_str(&format_node(child, &child_prefix, i, child_count));
        }
    }

    output
}

pub fn to_treeviz_str(tree: &ParseTree) -> String {
    let mut output = format!("{} {}\n", get_icon(tree.kind()), truncate(tree.label(), 30));

    let child_count = tree.children().len();
    for (i, child) in tree.children().iter().enumerate() {
        output.push_str(&format_node(child, "", i, child_count));
    }

    output
}

/// Formatter implementation for treeviz format
pub struct TreevizFormatter;

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, tree: &ParseTree) -> Result<String, FormatError> {
        Ok(to_treeviz_str(tree))
    }

    fn description(&self) -> &str {
        "One node per line with box-drawing connectors and Unicode icons"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_long_labels() {
        assert_eq!(truncate("short", 30), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }

    #[test]
    fn test_siblings_keep_vertical_rule() {
        let tree = ParseTree::nonterminal(
            "S",
            vec![
                ParseTree::nonterminal("A", vec![ParseTree::terminal("a")]),
                ParseTree::epsilon("λ"),
            ],
        );
        assert_eq!(to_treeviz_str(&tree), "◇ S\n├─ ◇ A\n│ └─ ◦ a\n└─ ∅ λ\n");
    }
}
