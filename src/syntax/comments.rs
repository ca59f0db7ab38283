//! Comment Attachment
//!
//! Keeps the flat list of comments of a file and maps each comment to the
//! node it documents. Association walks the tree in document order: a comment
//! ending before a node starts is a leading comment of that node, a comment
//! left inside a node after its children (or on its last line) trails it.
//! Statement sequences never take leading comments, so a header above the
//! first statement of a body lands on the statement itself.
//!
//! Like other Ruby tooling, a call followed by a block has its leading comment
//! attached to the block node rather than to the call it wraps.

use std::collections::HashMap;

use serde::Serialize;

use crate::syntax::tree::{NodeId, NodeKind, NodeRef, Span, SyntaxTree};

/// A single `#` comment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub span: Span,
}

impl Comment {
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    pub fn line(&self) -> usize {
        self.span.start.line
    }
}

/// Flat comment list plus the node-to-comments association
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    comments: Vec<Comment>,
    attached: HashMap<NodeId, Vec<usize>>,
}

impl CommentIndex {
    /// Associate `comments` with the nodes of `tree`
    pub fn associate(tree: &SyntaxTree, mut comments: Vec<Comment>) -> Self {
        comments.sort_by_key(|c| c.span.start_byte);

        let mut associator = Associator {
            comments: &comments,
            cursor: 0,
            attached: HashMap::new(),
        };
        if let Some(root) = tree.root() {
            associator.visit(root);
        }
        let attached = associator.attached;

        Self { comments, attached }
    }

    /// Every comment of the file, in source order
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Comments attached to `node`, in source order
    pub fn attached(&self, node: NodeId) -> impl Iterator<Item = &Comment> + '_ {
        self.attached
            .get(&node)
            .into_iter()
            .flatten()
            .map(|&idx| &self.comments[idx])
    }

    /// First comment starting on `line`
    pub fn on_line(&self, line: usize) -> Option<&Comment> {
        self.comments.iter().find(|c| c.line() == line)
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

struct Associator<'c> {
    comments: &'c [Comment],
    cursor: usize,
    attached: HashMap<NodeId, Vec<usize>>,
}

impl Associator<'_> {
    fn visit(&mut self, node: NodeRef<'_>) {
        let span = node.span();

        if node.kind() != NodeKind::Begin {
            while self
                .current()
                .is_some_and(|c| c.span.end_byte <= span.start_byte)
            {
                self.attach(node.id());
            }
        }

        for child in node.children() {
            self.visit(child);
        }

        while self
            .current()
            .is_some_and(|c| c.span.start_byte < span.end_byte)
        {
            self.attach(node.id());
        }
        while self
            .current()
            .is_some_and(|c| c.span.start.line == span.end.line)
        {
            self.attach(node.id());
        }
    }

    fn current(&self) -> Option<&Comment> {
        self.comments.get(self.cursor)
    }

    fn attach(&mut self, node: NodeId) {
        self.attached.entry(node).or_default().push(self.cursor);
        self.cursor += 1;
    }
}
