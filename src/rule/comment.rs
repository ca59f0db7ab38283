//! Comment Resolver
//!
//! Finds the comment line documenting a declaration.

use crate::rule::nesting::nested_in_grouping_helper;
use crate::syntax::comments::CommentIndex;
use crate::syntax::tree::NodeRef;

/// Text of the comment immediately preceding `node`.
///
/// Lookup order:
/// 1. the last comment attached to the node itself
/// 2. any comment on the line right above the node; a call followed by a
///    block gets its comment attached to the block, so the attachment alone
///    misses `# Validations` above `validate { ... }`
/// 3. for members of a `with_options` group, the comment preceding the group
pub fn preceding_comment<'c>(node: NodeRef<'_>, comments: &'c CommentIndex) -> Option<&'c str> {
    if let Some(comment) = comments.attached(node.id()).last() {
        return Some(&comment.text);
    }

    let line_above = node
        .first_line()
        .checked_sub(1)
        .and_then(|line| comments.on_line(line));
    if let Some(comment) = line_above {
        return Some(&comment.text);
    }

    if nested_in_grouping_helper(node) {
        return preceding_comment(node.parent()?, comments);
    }

    None
}
