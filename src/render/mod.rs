//! CSS output.
//!
//! Rendering is a pre-order walk over an expanded and pruned tree. A block's
//! declarations are always grouped ahead of its nested blocks:
//!
//! ```text
//! .a,
//! .b {
//!   color: red;
//! }
//! .a .c {
//!   margin: 0;
//! }
//! ```

use std::fmt::{self, Write};

use crate::ast::{Node, NodeKind};

pub mod prune;

pub use prune::prune;

const INDENT: &str = "  ";

pub fn render(root: &Node) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_node(&mut out, root);
    out
}

pub fn render_node(out: &mut impl Write, node: &Node) -> fmt::Result {
    if node.hidden {
        return Ok(());
    }

    match &node.kind {
        NodeKind::Root => {
            render_declarations(out, node)?;
            render_nested(out, node)
        }
        NodeKind::Selector { merged, .. } => {
            // Mixin templates expand to nothing.
            if merged.is_empty() {
                return Ok(());
            }
            render_block(out, merged, node)?;
            render_nested(out, node)
        }
        NodeKind::AtRule {
            header,
            parent_selectors,
        } => {
            writeln!(out, "{header} {{")?;
            if is_root_list(parent_selectors) {
                render_declarations(out, node)?;
            } else {
                render_block(out, parent_selectors, node)?;
            }
            render_nested(out, node)?;
            writeln!(out, "}}")
        }
        NodeKind::Declaration { text } => writeln!(out, "{INDENT}{text}"),
        NodeKind::Import { text } => writeln!(out, "{text}"),
        NodeKind::Variable { .. } | NodeKind::MixinCall { .. } => Ok(()),
    }
}

/// Emits `selectors { declarations }` when `node` has any declarations.
fn render_block(out: &mut impl Write, selectors: &[String], node: &Node) -> fmt::Result {
    if !node.children.iter().any(Node::is_declaration) {
        return Ok(());
    }
    writeln!(out, "{} {{", selectors.join(",\n"))?;
    render_declarations(out, node)?;
    writeln!(out, "}}")
}

fn render_declarations(out: &mut impl Write, node: &Node) -> fmt::Result {
    for child in node.children.iter().filter(|c| c.is_declaration()) {
        render_node(out, child)?;
    }
    Ok(())
}

fn render_nested(out: &mut impl Write, node: &Node) -> fmt::Result {
    for child in node.children.iter().filter(|c| !c.is_declaration()) {
        render_node(out, child)?;
    }
    Ok(())
}

fn is_root_list(selectors: &[String]) -> bool {
    selectors.iter().all(String::is_empty)
}
