//! Diagonal tree drawing
//!
//! Draws a parse tree top-down with each label centered over its children:
//!
//!      S
//!     /  \
//!     a  S
//!       / \
//!       c B
//!         |
//!         b
//!
//! Layout, bottom-up:
//!   - a leaf is its label; its middle column is half its width
//!   - an internal node places its children side by side, one blank column apart, and pads
//!     every child to the tallest one with blank lines
//!   - the label is centered between the middles of the first and last child; if it does not
//!     fit on the left, the children move right
//!   - below the label, each child gets a connector over its middle: `/` left of the label,
//!     `\` right of it, `|` straight below
//!
//! Nodes may have any number of children.

use super::registry::{FormatError, Formatter};
use crate::tree::ParseTree;
use std::cmp::Ordering;

/// Blank columns between sibling subtrees
const GAP: usize = 1;

/// A rendered subtree: lines padded to `width`, label centered at `middle`
struct Block {
    lines: Vec<String>,
    width: usize,
    middle: usize,
}

fn text_width(text: &str) -> usize {
    text.chars().count()
}

fn pad_to(mut line: String, width: usize) -> String {
    let current = text_width(&line);
    if current < width {
        line.push_str(&" ".repeat(width - current));
    }
    line
}

fn layout(node: &ParseTree) -> Block {
    let label = node.label();
    let label_width = text_width(label);

    if node.is_leaf() {
        return Block {
            lines: vec![label.to_string()],
            width: label_width,
            middle: label_width / 2,
        };
    }

    let blocks: Vec<Block> = node.children().iter().map(layout).collect();

    let mut offsets = Vec::with_capacity(blocks.len());
    let mut cursor = 0;
    for block in &blocks {
        offsets.push(cursor);
        cursor += block.width + GAP;
    }
    let children_width = cursor - GAP;

    let first_middle = offsets[0] + blocks[0].middle;
    let last_middle = offsets[blocks.len() - 1] + blocks[blocks.len() - 1].middle;
    let center = (first_middle + last_middle) / 2;

    let shift = (label_width / 2).saturating_sub(center);
    let center = center + shift;
    let label_start = center - label_width / 2;
    // a child with an empty label still needs a column for its connector
    let width = (children_width + shift)
        .max(label_start + label_width)
        .max(shift + last_middle + 1);

    let height = blocks.iter().map(|block| block.lines.len()).max().unwrap_or(0);
    let mut lines = Vec::with_capacity(height + 2);

    lines.push(pad_to(format!("{}{}", " ".repeat(label_start), label), width));

    let mut connectors = vec![' '; width];
    for (offset, block) in offsets.iter().zip(&blocks) {
        let column = shift + offset + block.middle;
        connectors[column] = match column.cmp(&center) {
            Ordering::Less => '/',
            Ordering::Equal => '|',
            Ordering::Greater => '\\',
        };
    }
    lines.push(connectors.into_iter().collect());

    for row in 0..height {
        let mut line = " ".repeat(shift);
        for (index, block) in blocks.iter().enumerate() {
            if index > 0 {
                line.push_str(&" ".repeat(GAP));
            }
            match block.lines.get(row) {
                Some(text) => line.push_str(text),
                None => line.push_str(&" ".repeat(block.width)),
            }
        }
        lines.push(pad_to(line, width));
    }

    Block {
        lines,
        width,
        middle: center,
    }
}

/// Render a tree as lines of text, right-trimmed
pub fn render(tree: &ParseTree) -> Vec<String> {
    layout(tree)
        .lines
        .into_iter()
        .map(|line| line.trim_end().to_string())
        .collect()
}

/// Render a tree as a single string, one line per row
pub fn to_diagonal_str(tree: &ParseTree) -> String {
    let mut output = render(tree).join("\n");
    output.push('\n');
    output
}

/// Formatter implementation for the diagonal drawing
pub struct DiagonalFormatter;

impl Formatter for DiagonalFormatter {
    fn name(&self) -> &str {
        "diagonal"
    }

    fn serialize(&self, tree: &ParseTree) -> Result<String, FormatError> {
        Ok(to_diagonal_str(tree))
    }

    fn description(&self) -> &str {
        "ASCII drawing with diagonal connectors, labels centered over children"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(label: &str) -> ParseTree {
        ParseTree::terminal(label)
    }

    fn node(label: &str, children: Vec<ParseTree>) -> ParseTree {
        ParseTree::nonterminal(label, children)
    }

    #[test]
    fn test_leaf_is_its_label() {
        assert_eq!(render(&leaf("a")), vec!["a"]);
    }

    #[test]
    fn test_single_child_uses_vertical_connector() {
        let tree = node("S", vec![ParseTree::epsilon("λ")]);
        assert_eq!(render(&tree), vec!["S", "|", "λ"]);
    }

    #[test]
    fn test_two_children() {
        let tree = node("S", vec![leaf("a"), leaf("b")]);
        assert_eq!(render(&tree), vec![" S", "/ \\", "a b"]);
    }

    #[test]
    fn test_three_children_center_child_is_vertical() {
        let tree = node("S", vec![leaf("a"), leaf("B"), leaf("c")]);
        assert_eq!(render(&tree), vec!["  S", "/ | \\", "a B c"]);
    }

    #[test]
    fn test_wide_label_shifts_children() {
        let tree = node("Expr", vec![leaf("a"), leaf("b")]);
        assert_eq!(render(&tree), vec!["Expr", " / \\", " a b"]);
    }

    #[test]
    fn test_shorter_subtree_is_padded() {
        let tree = node(
            "S",
            vec![leaf("a"), node("S", vec![leaf("c"), node("B", vec![leaf("b")])])],
        );
        assert_eq!(
            render(&tree),
            vec![" S", "/  \\", "a  S", "  / \\", "  c B", "    |", "    b"]
        );
    }

    #[test]
    fn test_empty_label_child_keeps_its_connector() {
        let tree = node("S", vec![leaf("a"), leaf("")]);
        assert_eq!(render(&tree), vec![" S", "/ \\", "a"]);

        let tree = node("S", vec![leaf("")]);
        assert_eq!(render(&tree), vec!["S", "|", ""]);
    }

    #[test]
    fn test_formatter_ends_with_newline() {
        let output = DiagonalFormatter.serialize(&leaf("a")).unwrap();
        assert_eq!(output, "a\n");
    }
}
