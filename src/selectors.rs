//! Selector expansion.
//!
//! Computes every Selector node's fully-qualified selector list by combining
//! its own selectors with the list inherited from its ancestors. At-rules are
//! transparent: they remember the list they were nested under and hand it to
//! their children unchanged.

use crate::ast::{Node, NodeKind};

pub fn expand_selectors(root: &mut Node) {
    expand_node(root, &[String::new()]);
}

fn expand_node(node: &mut Node, parents: &[String]) {
    let inherited = match &mut node.kind {
        NodeKind::Selector { selectors, merged } => {
            *merged = merge_selectors(parents, selectors);
            Some(merged.clone())
        }
        NodeKind::AtRule {
            parent_selectors, ..
        } => {
            *parent_selectors = parents.to_vec();
            None
        }
        _ => None,
    };

    let parents = inherited.as_deref().unwrap_or(parents);
    for child in &mut node.children {
        expand_node(child, parents);
    }
}

/// Child-major cross product of `children` with `parents`.
///
/// `&` is replaced by the parent selector; otherwise a non-empty parent is
/// joined with a descendant combinator. Mixin signatures are skipped.
pub fn merge_selectors(parents: &[String], children: &[String]) -> Vec<String> {
    children
        .iter()
        .filter(|child| !child.ends_with("()"))
        .flat_map(|child| parents.iter().map(move |parent| combine(parent, child)))
        .collect()
}

fn combine(parent: &str, child: &str) -> String {
    if child.contains('&') {
        child.replace('&', parent)
    } else if !parent.is_empty() {
        format!("{parent} {child}")
    } else {
        child.to_string()
    }
}
