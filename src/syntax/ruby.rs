//! Ruby Front End
//!
//! Parses Ruby with tree-sitter and lowers the concrete tree into the arena.
//! The lowering keeps the node shapes the model rules reason about:
//! - a body with one statement is that statement, two or more become `Begin`
//! - a call with a block becomes `Block`, wrapping the `Send` it decorates
//! - a bare identifier in statement position is a receiver-less `Send`
//! - comments are pulled out into a flat list

use tree_sitter::{Node as TsNode, Parser};

use crate::syntax::comments::{Comment, CommentIndex};
use crate::syntax::tree::{NodeId, NodeKind, Point, Span, SyntaxNode, SyntaxTree};
use crate::syntax::{ParseError, ParsedSource};

/// Fields that precede a body and are never statements of it
const HEADER_FIELDS: &[&str] = &["name", "superclass", "parameters", "object", "value"];

pub struct RubyParser {
    parser: Parser,
}

impl RubyParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    /// Parse `source` into a syntax tree plus its comment index.
    ///
    /// Syntax errors are recovered by tree-sitter; the rule still runs over
    /// whatever structure survived.
    pub fn parse(&mut self, source: &str) -> Result<ParsedSource, ParseError> {
        self.parser
            .set_language(&tree_sitter_ruby::LANGUAGE.into())
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let ts_tree = self
            .parser
            .parse(source, None)
            .ok_or(ParseError::ParseFailed)?;
        let root = ts_tree.root_node();

        if root.has_error() {
            log::debug!("source has syntax errors, checking the recovered tree");
        }

        let mut lowering = Lowering {
            bytes: source.as_bytes(),
            tree: SyntaxTree::new(source),
        };
        lowering.body(None, statement_nodes(root));

        let mut comments = Vec::new();
        collect_comments(root, source.as_bytes(), &mut comments);

        let tree = lowering.tree;
        let comments = CommentIndex::associate(&tree, comments);

        Ok(ParsedSource { tree, comments })
    }
}

impl Default for RubyParser {
    fn default() -> Self {
        Self::new()
    }
}

struct Lowering<'s> {
    bytes: &'s [u8],
    tree: SyntaxTree,
}

impl Lowering<'_> {
    fn text(&self, node: TsNode<'_>) -> String {
        node.utf8_text(self.bytes).unwrap_or("").to_string()
    }

    /// Lower a statement list: nothing, the lone statement, or a `Begin`
    fn body(&mut self, parent: Option<NodeId>, statements: Vec<TsNode<'_>>) {
        match statements.as_slice() {
            [] => {}
            [single] => self.statement(parent, *single),
            [first, .., last] => {
                let span = Span::new(
                    first.start_byte(),
                    last.end_byte(),
                    point(first.start_position()),
                    point(last.end_position()),
                );
                let begin = self
                    .tree
                    .push(parent, SyntaxNode::new(NodeKind::Begin, span));
                for statement in statements {
                    self.statement(Some(begin), statement);
                }
            }
        }
    }

    fn statement(&mut self, parent: Option<NodeId>, node: TsNode<'_>) {
        if node.kind() == "identifier" {
            let send = SyntaxNode::new(NodeKind::Send, span_of(node)).named(self.text(node));
            self.tree.push(parent, send);
        } else {
            self.lower(parent, node);
        }
    }

    fn lower(&mut self, parent: Option<NodeId>, node: TsNode<'_>) {
        match node.kind() {
            "class" => self.definition(parent, node, NodeKind::Class),
            "module" => self.definition(parent, node, NodeKind::Module),
            "method" => self.definition(parent, node, NodeKind::Def),
            "singleton_method" => self.definition(parent, node, NodeKind::Defs),
            "assignment" => self.assignment(parent, node),
            "call" => self.call(parent, node),
            "lambda" => self.lambda(parent, node),
            _ => {
                let id = self
                    .tree
                    .push(parent, SyntaxNode::new(NodeKind::Other, span_of(node)));
                self.children(id, node);
            }
        }
    }

    fn children(&mut self, id: NodeId, node: TsNode<'_>) {
        for child in statement_nodes(node) {
            self.lower(Some(id), child);
        }
    }

    fn definition(&mut self, parent: Option<NodeId>, node: TsNode<'_>, kind: NodeKind) {
        let mut data = SyntaxNode::new(kind, span_of(node));
        if let Some(name) = node.child_by_field_name("name") {
            data = data.named(self.text(name));
        }
        let id = self.tree.push(parent, data);

        for field in HEADER_FIELDS {
            if let Some(header) = node.child_by_field_name(field) {
                self.lower(Some(id), header);
            }
        }
        self.body(Some(id), body_nodes(node));
    }

    fn assignment(&mut self, parent: Option<NodeId>, node: TsNode<'_>) {
        let left = node.child_by_field_name("left");
        let constant = left.filter(|l| matches!(l.kind(), "constant" | "scope_resolution"));

        let Some(constant) = constant else {
            let id = self
                .tree
                .push(parent, SyntaxNode::new(NodeKind::Other, span_of(node)));
            self.children(id, node);
            return;
        };

        let casgn = SyntaxNode::new(NodeKind::Casgn, span_of(node)).named(self.text(constant));
        let id = self.tree.push(parent, casgn);
        if let Some(right) = node.child_by_field_name("right") {
            self.lower(Some(id), right);
        }
    }

    fn call(&mut self, parent: Option<NodeId>, node: TsNode<'_>) {
        let method = node.child_by_field_name("method");
        let receiver = node.child_by_field_name("receiver");
        let arguments = node.child_by_field_name("arguments");
        let block = node.child_by_field_name("block");

        let name = method.map(|m| self.text(m));
        let has_arguments = arguments.is_some_and(|a| a.named_child_count() > 0);

        let mut send_span = span_of(node);
        if block.is_some() {
            if let Some(end) = arguments.or(method) {
                send_span.end_byte = end.end_byte();
                send_span.end = point(end.end_position());
            }
        }

        let mut send = SyntaxNode::new(NodeKind::Send, send_span)
            .with_receiver(receiver.is_some())
            .with_arguments(has_arguments);
        if let Some(name) = &name {
            send = send.named(name.clone());
        }

        let block_id = block.map(|_| {
            let mut wrapper = SyntaxNode::new(NodeKind::Block, span_of(node))
                .with_receiver(receiver.is_some())
                .with_arguments(has_arguments);
            if let Some(name) = &name {
                wrapper = wrapper.named(name.clone());
            }
            self.tree.push(parent, wrapper)
        });

        let send_id = self.tree.push(block_id.or(parent), send);
        if let Some(receiver) = receiver {
            self.lower(Some(send_id), receiver);
        }
        if let Some(arguments) = arguments {
            self.children(send_id, arguments);
        }

        if let (Some(block_id), Some(block)) = (block_id, block) {
            if let Some(parameters) = block.child_by_field_name("parameters") {
                self.lower(Some(block_id), parameters);
            }
            self.body(Some(block_id), body_nodes(block));
        }
    }

    fn lambda(&mut self, parent: Option<NodeId>, node: TsNode<'_>) {
        let id = self
            .tree
            .push(parent, SyntaxNode::new(NodeKind::Lambda, span_of(node)));

        if let Some(parameters) = node.child_by_field_name("parameters") {
            self.lower(Some(id), parameters);
        }
        if let Some(block) = node.child_by_field_name("body") {
            self.body(Some(id), body_nodes(block));
        }
    }
}

/// Named children that can stand as statements (comments excluded)
fn statement_nodes(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|child| !matches!(child.kind(), "comment" | "empty_statement"))
        .collect()
}

/// Statements of a class, module, method or block body
fn body_nodes(node: TsNode<'_>) -> Vec<TsNode<'_>> {
    if let Some(body) = node.child_by_field_name("body") {
        return match body.kind() {
            "body_statement" | "block_body" => statement_nodes(body),
            _ => vec![body],
        };
    }

    let header: Vec<TsNode<'_>> = HEADER_FIELDS
        .iter()
        .filter_map(|field| node.child_by_field_name(field))
        .collect();
    statement_nodes(node)
        .into_iter()
        .filter(|child| !header.contains(child))
        .collect()
}

fn collect_comments(node: TsNode<'_>, bytes: &[u8], out: &mut Vec<Comment>) {
    if node.kind() == "comment" {
        let text = node.utf8_text(bytes).unwrap_or("");
        out.push(Comment::new(text.trim_end(), span_of(node)));
        return;
    }

    let mut cursor = node.walk();
    let children: Vec<TsNode<'_>> = node.children(&mut cursor).collect();
    for child in children {
        collect_comments(child, bytes, out);
    }
}

fn point(position: tree_sitter::Point) -> Point {
    Point::new(position.row + 1, position.column)
}

fn span_of(node: TsNode<'_>) -> Span {
    Span::new(
        node.start_byte(),
        node.end_byte(),
        point(node.start_position()),
        point(node.end_position()),
    )
}
