//! Declaration View
//!
//! Thin borrowing wrapper pairing a syntax node with the rule configuration,
//! so the engine can ask model-level questions of it.

use crate::rule::category::Category;
use crate::rule::classify::{classify, is_private_marker};
use crate::rule::comment::preceding_comment;
use crate::rule::nesting::is_ignored;
use crate::rule::settings::RuleConfig;
use crate::syntax::comments::CommentIndex;
use crate::syntax::tree::{NodeRef, Span};

#[derive(Clone, Copy)]
pub struct Declaration<'a> {
    node: NodeRef<'a>,
    config: &'a RuleConfig,
}

impl<'a> Declaration<'a> {
    pub fn new(node: NodeRef<'a>, config: &'a RuleConfig) -> Self {
        Self { node, config }
    }

    pub fn node(&self) -> NodeRef<'a> {
        self.node
    }

    pub fn span(&self) -> Span {
        self.node.span()
    }

    pub fn category(&self) -> Option<Category> {
        classify(self.node, self.config.misc_method_names())
    }

    pub fn is_private_marker(&self) -> bool {
        is_private_marker(self.node)
    }

    pub fn ignored_due_to_nesting(&self) -> bool {
        is_ignored(self.node)
    }

    pub fn preceding_comment<'c>(&self, comments: &'c CommentIndex) -> Option<&'c str> {
        preceding_comment(self.node, comments)
    }
}
