//! Node Classifier
//!
//! Maps a declaration node to the [`Category`] it belongs to. Node kind is
//! decided first; call-like nodes are then matched on their method name in a
//! fixed precedence.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::rule::category::Category;
use crate::syntax::tree::{NodeKind, NodeRef};

pub const CONSTRUCTOR_NAME: &str = "initialize";
pub const PRIVATE_MARKER: &str = "private";

static CALLBACK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(after|before|around)_(initialize|find|touch|save|validation|create|update|destroy|commit|rollback)$",
    )
    .expect("callback pattern is valid")
});

/// Category of `node`, or `None` when it is not a model element
pub fn classify(node: NodeRef<'_>, misc_names: &HashSet<String>) -> Option<Category> {
    match node.kind() {
        NodeKind::Casgn => Some(Category::Constant),
        NodeKind::Module => Some(Category::Module),
        NodeKind::Def if node.name() == Some(CONSTRUCTOR_NAME) => Some(Category::Constructor),
        NodeKind::Def => Some(Category::InstanceMethod),
        NodeKind::Defs => Some(Category::ClassMethod),
        NodeKind::Send => classify_call(node.call_name()?, misc_names),
        _ => None,
    }
}

fn classify_call(name: &str, misc_names: &HashSet<String>) -> Option<Category> {
    match name {
        n if n.starts_with("validate") => Some(Category::Validation),
        "has_one" | "has_many" | "has_and_belongs_to_many" | "belongs_to" => {
            Some(Category::Association)
        }
        n if CALLBACK.is_match(n) => Some(Category::Callback),
        "scope" | "default_scope" => Some(Category::Scope),
        "include" => Some(Category::Include),
        "enum" => Some(Category::Enum),
        n if n.starts_with("attr_") => Some(Category::Attribute),
        n if misc_names.contains(n) => Some(Category::Misc),
        _ => None,
    }
}

/// A bare `private` call opening the unchecked tail of a class body
pub fn is_private_marker(node: NodeRef<'_>) -> bool {
    node.kind() == NodeKind::Send
        && !node.has_receiver()
        && !node.has_arguments()
        && node.call_name() == Some(PRIVATE_MARKER)
}
