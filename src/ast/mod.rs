//! # Tailless AST
//!
//! An owned tree: every node exclusively owns its ordered children, and only
//! the root has no parent. The tree is built once, mutated in place by the
//! resolver, expander and pruner passes, then rendered.
//!
//! | Kind        | Carries                                  | Derived by           |
//! |-------------|------------------------------------------|----------------------|
//! | Root        | -                                        | -                    |
//! | Variable    | `@name: value;` text                     | -                    |
//! | Selector    | as-written selector list                 | merged (expander)    |
//! | Declaration | declaration text                         | resolved text        |
//! | MixinCall   | call text                                | spliced away         |
//! | AtRule      | header text                              | parent selector list |
//! | Import      | import line                              | -                    |

use serde::Serialize;

use crate::errors::ErrorReporting;

pub mod builder;

pub use builder::build_tree;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum NodeKind {
    Root,
    Variable {
        text: String,
    },
    Selector {
        selectors: Vec<String>,
        /// Fully-qualified selectors; only valid after selector expansion.
        merged: Vec<String>,
    },
    Declaration {
        text: String,
    },
    MixinCall {
        text: String,
    },
    AtRule {
        header: String,
        /// Selector list the at-rule was nested under; only valid after expansion.
        parent_selectors: Vec<String>,
    },
    Import {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    pub kind: NodeKind,
    /// 1-based source line; zero for the root.
    pub line: usize,
    pub children: Vec<Node>,
    pub hidden: bool,
}

impl Node {
    fn leaf(kind: NodeKind, line: usize) -> Self {
        Self {
            kind,
            line,
            children: Vec::new(),
            hidden: false,
        }
    }

    pub fn root() -> Self {
        Self::leaf(NodeKind::Root, 0)
    }

    pub fn variable(text: impl Into<String>, line: usize) -> Self {
        Self::leaf(NodeKind::Variable { text: text.into() }, line)
    }

    pub fn selector(selectors: Vec<String>, line: usize) -> Self {
        Self::leaf(
            NodeKind::Selector {
                selectors,
                merged: Vec::new(),
            },
            line,
        )
    }

    pub fn declaration(text: impl Into<String>, line: usize) -> Self {
        Self::leaf(NodeKind::Declaration { text: text.into() }, line)
    }

    pub fn mixin_call(text: impl Into<String>, line: usize) -> Self {
        Self::leaf(NodeKind::MixinCall { text: text.into() }, line)
    }

    pub fn at_rule(header: impl Into<String>, line: usize) -> Self {
        Self::leaf(
            NodeKind::AtRule {
                header: header.into(),
                parent_selectors: Vec::new(),
            },
            line,
        )
    }

    pub fn import(text: impl Into<String>, line: usize) -> Self {
        Self::leaf(NodeKind::Import { text: text.into() }, line)
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Structural clone used when splicing a mixin body. Derived fields
    /// (merged selectors, recorded parents, hidden flag) start fresh.
    pub fn deep_copy(&self) -> Node {
        let kind = match &self.kind {
            NodeKind::Root => NodeKind::Root,
            NodeKind::Variable { text } => NodeKind::Variable { text: text.clone() },
            NodeKind::Selector { selectors, .. } => NodeKind::Selector {
                selectors: selectors.clone(),
                merged: Vec::new(),
            },
            NodeKind::Declaration { text } => NodeKind::Declaration { text: text.clone() },
            NodeKind::MixinCall { text } => NodeKind::MixinCall { text: text.clone() },
            NodeKind::AtRule { header, .. } => NodeKind::AtRule {
                header: header.clone(),
                parent_selectors: Vec::new(),
            },
            NodeKind::Import { text } => NodeKind::Import { text: text.clone() },
        };

        Node {
            kind,
            line: self.line,
            children: self.children.iter().map(Node::deep_copy).collect(),
            hidden: false,
        }
    }

    pub fn is_declaration(&self) -> bool {
        matches!(self.kind, NodeKind::Declaration { .. })
    }

    /// Name of a mixin definition: a selector block whose list is exactly
    /// one entry ending in `()`.
    pub fn mixin_signature(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Selector { selectors, .. } if selectors.len() == 1 => {
                selectors[0].strip_suffix("()").map(str::trim)
            }
            _ => None,
        }
    }

    /// Name invoked by a mixin call: `.btn();` and `.p-4;` both name their class.
    pub fn mixin_call_name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::MixinCall { text } => {
                let text = text.trim_end_matches(';').trim_end();
                Some(text.strip_suffix("()").unwrap_or(text).trim())
            }
            _ => None,
        }
    }

    /// Total number of nodes in this subtree, including itself.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(Node::count).sum::<usize>()
    }
}

impl ErrorReporting for Node {
    fn source_line(&self) -> usize {
        self.line
    }
}
