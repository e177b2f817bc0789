//! Testing utilities
//!
//! Fluent assertions for parse trees. Tests that walk `children()[1].children()[0]` by hand
//! break as soon as a tree shape changes and tend to check only counts. The fluent API keeps
//! each check next to the node it describes and reports the path of the failing node.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use rlgrammar::testing::assert_tree;
//!
//!     let tree = accept(&grammar, "S", "acb")?.into_tree().unwrap();
//!
//!     assert_tree(&tree)
//!         .label("S")
//!         .child_count(2)
//!         .child(0, |a| { a.terminal("a"); })
//!         .child(1, |s| {
//!             s.label("S").child(1, |b| { b.label("B"); });
//!         })
//!         .yields("acb");
//!     ```

use crate::tree::{NodeKind, ParseTree};

/// Start a fluent assertion on `tree`
pub fn assert_tree(tree: &ParseTree) -> TreeAssertion<'_> {
    TreeAssertion {
        node: tree,
        path: tree.label().to_string(),
    }
}

/// Assertion context for one node
pub struct TreeAssertion<'a> {
    node: &'a ParseTree,
    path: String,
}

impl<'a> TreeAssertion<'a> {
    pub fn node(&self) -> &'a ParseTree {
        self.node
    }

    pub fn label(self, expected: &str) -> Self {
        assert_eq!(
            self.node.label(),
            expected,
            "{}: expected label '{}', found '{}'",
            self.path,
            expected,
            self.node.label()
        );
        self
    }

    pub fn kind(self, expected: NodeKind) -> Self {
        assert_eq!(
            self.node.kind(),
            expected,
            "{}: expected a {:?} node, found {:?}",
            self.path,
            expected,
            self.node.kind()
        );
        self
    }

    /// A terminal leaf with the given text
    pub fn terminal(self, text: &str) -> Self {
        self.kind(NodeKind::Terminal).label(text).leaf()
    }

    /// An epsilon leaf
    pub fn epsilon(self) -> Self {
        self.kind(NodeKind::Epsilon).leaf()
    }

    pub fn leaf(self) -> Self {
        assert!(
            self.node.is_leaf(),
            "{}: expected a leaf, found {} children",
            self.path,
            self.node.children().len()
        );
        self
    }

    pub fn child_count(self, expected: usize) -> Self {
        assert_eq!(
            self.node.children().len(),
            expected,
            "{}: expected {} children, found {}",
            self.path,
            expected,
            self.node.children().len()
        );
        self
    }

    /// Run assertions on the child at `index`
    pub fn child<F>(self, index: usize, check: F) -> Self
    where
        F: FnOnce(TreeAssertion<'a>),
    {
        let child = self.node.children().get(index).unwrap_or_else(|| {
            panic!(
                "{}: no child at index {} (has {})",
                self.path,
                index,
                self.node.children().len()
            )
        });
        check(TreeAssertion {
            node: child,
            path: format!("{}[{}]:{}", self.path, index, child.label()),
        });
        self
    }

    /// Labels of the children, in order
    pub fn child_labels(self, expected: &[&str]) -> Self {
        let labels: Vec<&str> = self.node.children().iter().map(ParseTree::label).collect();
        assert_eq!(labels, expected, "{}: child labels differ", self.path);
        self
    }

    /// The terminal leaves spell out `expected`
    pub fn yields(self, expected: &str) -> Self {
        assert_eq!(
            self.node.yield_text(),
            expected,
            "{}: yield differs",
            self.path
        );
        self
    }

    /// Bracketed form, e.g. `S(a, S(c, B(b)))`
    pub fn shape(self, expected: &str) -> Self {
        assert_eq!(self.node.to_string(), expected, "{}: shape differs", self.path);
        self
    }
}
