//! Arena Syntax Tree
//!
//! Minimal, read-only tree of the declarations in one Ruby file.
//! Nodes live in a flat arena and refer to each other by index; parent links
//! are plain indices, never ownership. No rule logic here - pure structure.

use serde::Serialize;

/// Index of a node inside its [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Shape of a node, following the classic Ruby AST vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// `class Foo < Bar ... end`
    Class,
    /// `module Foo ... end`
    Module,
    /// Implicit sequence of two or more statements
    Begin,
    /// Method call, with or without receiver
    Send,
    /// Method call with an attached `{ }` / `do end` block
    Block,
    /// `-> { }` literal
    Lambda,
    /// Constant assignment, `FOO = 1`
    Casgn,
    /// Instance method definition
    Def,
    /// Singleton method definition, `def self.foo`
    Defs,
    /// Anything the rule does not reason about
    Other,
}

impl NodeKind {
    /// Kinds the host dispatches to the rule, one callback per node
    pub fn is_declaration(self) -> bool {
        matches!(
            self,
            NodeKind::Send | NodeKind::Casgn | NodeKind::Module | NodeKind::Def | NodeKind::Defs
        )
    }
}

/// A 1-based line and 0-based column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Point {
    pub line: usize,
    pub column: usize,
}

impl Point {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Source range of a node or comment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start_byte: usize,
    pub end_byte: usize,
    pub start: Point,
    pub end: Point,
}

impl Span {
    pub fn new(start_byte: usize, end_byte: usize, start: Point, end: Point) -> Self {
        Self {
            start_byte,
            end_byte,
            start,
            end,
        }
    }
}

/// A single node in the arena
#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxNode {
    pub kind: NodeKind,
    /// Method name for sends, blocks and defs; constant name for casgn/module/class
    pub name: Option<String>,
    pub has_receiver: bool,
    pub has_arguments: bool,
    pub span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        Self {
            kind,
            name: None,
            has_receiver: false,
            has_arguments: false,
            span,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_receiver(mut self, has_receiver: bool) -> Self {
        self.has_receiver = has_receiver;
        self
    }

    pub fn with_arguments(mut self, has_arguments: bool) -> Self {
        self.has_arguments = has_arguments;
        self
    }
}

/// Arena holding every node of one parsed file plus its source text
#[derive(Debug, Clone, Default)]
pub struct SyntaxTree {
    source: String,
    nodes: Vec<SyntaxNode>,
    root: Option<NodeId>,
}

impl SyntaxTree {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            nodes: Vec::new(),
            root: None,
        }
    }

    /// Append a node under `parent`, or as the root when `parent` is `None`.
    ///
    /// Children keep insertion order, so callers push them in source order.
    pub fn push(&mut self, parent: Option<NodeId>, mut node: SyntaxNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        node.parent = parent;
        node.children.clear();
        self.nodes.push(node);

        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => {
                if self.root.is_none() {
                    self.root = Some(id);
                }
            }
        }

        id
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.root.map(|id| self.node(id))
    }

    pub fn node(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// All nodes in document order (pre-order, children left to right)
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.root.into_iter().collect(),
        }
    }
}

/// Pre-order iterator over a [`SyntaxTree`]
pub struct Preorder<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Preorder<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = &self.tree.nodes[id.0];
        self.stack.extend(node.children.iter().rev().copied());
        Some(self.tree.node(id))
    }
}

/// Borrowed handle to one node; cheap to copy, navigates but never mutates
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t SyntaxNode {
        let tree: &'t SyntaxTree = self.tree;
        &tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> NodeKind {
        self.data().kind
    }

    pub fn name(&self) -> Option<&'t str> {
        self.data().name.as_deref()
    }

    /// Name of the invoked method, for call-like nodes only.
    ///
    /// A block node answers with the name of the call it wraps.
    pub fn call_name(&self) -> Option<&'t str> {
        match self.kind() {
            NodeKind::Send | NodeKind::Block => self.name(),
            _ => None,
        }
    }

    pub fn has_receiver(&self) -> bool {
        self.data().has_receiver
    }

    pub fn has_arguments(&self) -> bool {
        self.data().has_arguments
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    pub fn span(&self) -> Span {
        self.data().span
    }

    pub fn first_line(&self) -> usize {
        self.data().span.start.line
    }

    /// Source text covered by this node
    pub fn source(&self) -> &'t str {
        let span = self.data().span;
        let tree: &'t SyntaxTree = self.tree;
        tree.source
            .get(span.start_byte..span.end_byte)
            .unwrap_or("")
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl std::fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind())
            .field("name", &self.name())
            .finish()
    }
}
