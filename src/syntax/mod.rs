//! Ruby Syntax
//!
//! Parsing of Ruby model files into a navigable, read-only tree plus the
//! comments that document it. Focused solely on structure - no rule logic.

pub mod comments;
pub mod ruby;
pub mod tree;

pub use comments::{Comment, CommentIndex};
pub use ruby::RubyParser;
pub use tree::{NodeId, NodeKind, NodeRef, Point, Span, SyntaxNode, SyntaxTree};

/// A parsed file: its syntax tree and comment index
#[derive(Debug, Clone)]
pub struct ParsedSource {
    pub tree: SyntaxTree,
    pub comments: CommentIndex,
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

/// Parse Ruby source with a one-off parser
pub fn parse_source(source: &str) -> Result<ParsedSource, ParseError> {
    RubyParser::new().parse(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_source() {
        let parsed = parse_source("").expect("parse");
        assert!(parsed.tree.root().is_none());
        assert!(parsed.comments.is_empty());
    }

    #[test]
    fn test_parse_model() {
        let parsed = parse_source(
            "class User < ApplicationRecord\n  # Relationships\n  has_many :posts\nend\n",
        )
        .expect("parse");

        let root = parsed.tree.root().expect("root");
        assert_eq!(root.kind(), NodeKind::Class);
        assert_eq!(root.name(), Some("User"));
        assert_eq!(parsed.comments.comments().len(), 1);
    }
}
