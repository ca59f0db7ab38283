use tower_lsp::lsp_types::{Position, Range};

use crate::rule::Offense;
use crate::syntax::tree::{Point, Span};

/// State for each open document
#[derive(Debug)]
pub struct DocumentState {
    pub content: String,
    /// Offenses of the last successful check
    pub offenses: Vec<Offense>,
}

impl DocumentState {
    /// LSP range of a span, with UTF-16 columns
    pub fn range(&self, span: Span) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }

    fn position(&self, point: Point) -> Position {
        let line_idx = point.line.saturating_sub(1);
        let line = self.content.lines().nth(line_idx).unwrap_or("");
        let prefix = line.get(..point.column).unwrap_or(line);
        Position::new(line_idx as u32, prefix.encode_utf16().count() as u32)
    }
}
