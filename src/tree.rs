//! Parse trees
//!
//! A parse tree records which productions were applied to derive a string. Every node owns
//! its children; trees are built fresh for each successful derivation and have no identity
//! beyond the value handed to the caller.
//!
//! Node kinds:
//!   - Nonterminal: an applied rule; its children are the matched symbols of the alternative,
//!     left to right
//!   - Terminal: a leaf holding the literal text it matched
//!   - Epsilon: a leaf standing for an applied `λ` alternative; it matched no input
//!
//! Traversal is depth-first with children in left-to-right order ([`ParseTree::iter`]). The
//! terminal leaves in that order spell out the derived string ([`ParseTree::yield_text`]).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Nonterminal,
    Terminal,
    Epsilon,
}

/// A node of a parse tree, and the subtree below it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseTree {
    label: String,
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ParseTree>,
}

impl ParseTree {
    /// Internal node for an applied rule
    pub fn nonterminal(label: impl Into<String>, children: Vec<ParseTree>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Nonterminal,
            children,
        }
    }

    /// Leaf for matched literal text
    pub fn terminal(text: impl Into<String>) -> Self {
        Self {
            label: text.into(),
            kind: NodeKind::Terminal,
            children: Vec::new(),
        }
    }

    /// Leaf for an applied empty alternative, shown with `label` (normally `λ`)
    pub fn epsilon(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: NodeKind::Epsilon,
            children: Vec::new(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn children(&self) -> &[ParseTree] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first, pre-order traversal (a node before its children, children left to right)
    pub fn iter(&self) -> DepthFirst<'_> {
        DepthFirst { stack: vec![self] }
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> impl Iterator<Item = &ParseTree> {
        self.iter().filter(|node| node.is_leaf())
    }

    /// The derived string: terminal labels concatenated left to right
    pub fn yield_text(&self) -> String {
        self.leaves()
            .filter(|leaf| leaf.kind == NodeKind::Terminal)
            .map(|leaf| leaf.label.as_str())
            .collect()
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        let mut height = 0;
        self.walk(&mut |_, depth| height = height.max(depth + 1));
        height
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Visit every node depth-first together with its depth (the root is at depth 0)
    pub fn walk<F>(&self, visit: &mut F)
    where
        F: FnMut(&ParseTree, usize),
    {
        let mut stack = vec![(self, 0)];
        while let Some((node, depth)) = stack.pop() {
            visit(node, depth);
            stack.extend(node.children.iter().rev().map(|child| (child, depth + 1)));
        }
    }
}

/// Right-linear derivations produce trees as deep as their input is long; dropping them
/// node by node keeps the stack flat.
impl Drop for ParseTree {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Bracketed form, e.g. `S(a, S(c, B(b)))`
impl fmt::Display for ParseTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)?;
        if self.children.is_empty() {
            return Ok(());
        }
        write!(f, "(")?;
        for (index, child) in self.children.iter().enumerate() {
            if index > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{child}")?;
        }
        write!(f, ")")
    }
}

/// Iterator returned by [`ParseTree::iter`]
pub struct DepthFirst<'a> {
    stack: Vec<&'a ParseTree>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a ParseTree;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a ParseTree {
    type Item = &'a ParseTree;
    type IntoIter = DepthFirst<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
