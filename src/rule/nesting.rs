//! Nesting Filter
//!
//! Decides whether a declaration belongs to the class body being checked.
//! Only three shapes qualify:
//! - a statement of the class body itself
//! - a member of a `with_options` grouping call
//! - a node inside a block that is itself one of several statements of
//!   either of the above (`validate do ... end`, `l.after_save { ... }`)
//!
//! Anything deeper (nested classes and modules, conditionals, method bodies)
//! belongs to another scope and is ignored.

use crate::syntax::tree::{NodeKind, NodeRef};

/// The one call recognised as grouping declarations that share options
pub const GROUPING_HELPER: &str = "with_options";

/// True when `node` must not be checked against the class body's order
pub fn is_ignored(node: NodeRef<'_>) -> bool {
    !(nested_directly_in_class(node) || nested_in_grouping_helper(node))
}

/// The node's parent is a `with_options` call, directly or through a
/// statement sequence or a member block
pub fn nested_in_grouping_helper(node: NodeRef<'_>) -> bool {
    nested_in(node, is_grouping_call)
}

fn nested_directly_in_class(node: NodeRef<'_>) -> bool {
    nested_in(node, |n| n.kind() == NodeKind::Class)
}

fn nested_in(node: NodeRef<'_>, is_container: fn(NodeRef<'_>) -> bool) -> bool {
    let Some(parent) = node.parent() else {
        return false;
    };

    if is_container(parent) {
        return true;
    }

    match parent.kind() {
        NodeKind::Begin => parent.parent().is_some_and(is_container),
        NodeKind::Block | NodeKind::Lambda => parent
            .parent()
            .filter(|sequence| sequence.kind() == NodeKind::Begin)
            .and_then(|sequence| sequence.parent())
            .is_some_and(is_container),
        _ => false,
    }
}

fn is_grouping_call(node: NodeRef<'_>) -> bool {
    node.call_name() == Some(GROUPING_HELPER)
}
