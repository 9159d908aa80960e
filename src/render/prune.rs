//! Marks subtrees that produce no output.

use crate::ast::{Node, NodeKind};

/// Post-order pass setting `hidden` on every node that renders nothing.
/// Returns whether `node` itself ended up hidden.
pub fn prune(node: &mut Node) -> bool {
    node.hidden = match node.kind {
        NodeKind::Declaration { .. } | NodeKind::Import { .. } => false,
        NodeKind::Variable { .. } | NodeKind::MixinCall { .. } => true,
        NodeKind::Root | NodeKind::Selector { .. } | NodeKind::AtRule { .. } => {
            // Every child must be visited, so no short-circuiting `all`.
            node.children
                .iter_mut()
                .fold(true, |all_hidden, child| prune(child) && all_hidden)
        }
    };
    node.hidden
}
