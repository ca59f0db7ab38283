//! Validator Engine
//!
//! Single-pass, stateful check of one file. Declarations arrive in document
//! order; the first occurrence of each category is checked for its section
//! comment, and the accumulated first-occurrence order is compared against
//! the required order after every node.
//!
//! Two suppression policies apply: nothing after a bare `private` is looked
//! at, and only the first order violation of a file is reported.

use serde::Serialize;

use crate::rule::category::Category;
use crate::rule::settings::RuleConfig;
use crate::rule::view::Declaration;
use crate::syntax::comments::CommentIndex;
use crate::syntax::tree::{NodeRef, Span, SyntaxTree};
use crate::syntax::{ParseError, ParsedSource, parse_source};

/// What a reported offense is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OffenseKind {
    /// Missing or wrong section comment
    Comment,
    /// Category out of the required order
    Order,
}

impl OffenseKind {
    pub fn as_str(self) -> &'static str {
        match self {
            OffenseKind::Comment => "comment",
            OffenseKind::Order => "order",
        }
    }
}

/// A rule violation at a node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Offense {
    pub span: Span,
    pub kind: OffenseKind,
    pub message: String,
}

impl Offense {
    pub fn line(&self) -> usize {
        self.span.start.line
    }
}

/// Per-file state; a fresh one is needed for every file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatorState {
    /// Categories of the required order, in first-occurrence order
    pub categories_seen: Vec<Category>,
    /// Categories whose section comment has been checked
    pub comment_checked: Vec<Category>,
    pub order_violation_reported: bool,
    pub private_reached: bool,
}

/// The model structure rule applied to one file
pub struct ModelStructure<'c> {
    config: &'c RuleConfig,
    state: ValidatorState,
    offenses: Vec<Offense>,
}

impl<'c> ModelStructure<'c> {
    pub fn new(config: &'c RuleConfig) -> Self {
        Self {
            config,
            state: ValidatorState::default(),
            offenses: Vec::new(),
        }
    }

    /// Handle one declaration node, in document order
    pub fn process(&mut self, node: NodeRef<'_>, comments: &CommentIndex) {
        if self.state.private_reached {
            return;
        }

        let config = self.config;
        let declaration = Declaration::new(node, config);

        if declaration.is_private_marker() {
            log::debug!("private section starts at line {}", node.first_line());
            self.state.private_reached = true;
            return;
        }

        let Some(category) = declaration.category() else {
            return;
        };
        if declaration.ignored_due_to_nesting() {
            return;
        }

        if !self.state.comment_checked.contains(&category) {
            self.state.comment_checked.push(category);
            self.detect_comment_violation(&declaration, category, comments);
        }

        self.seen(category);
        self.detect_order_violation(&declaration);
    }

    pub fn state(&self) -> &ValidatorState {
        &self.state
    }

    pub fn offenses(&self) -> &[Offense] {
        &self.offenses
    }

    pub fn into_offenses(self) -> Vec<Offense> {
        self.offenses
    }

    fn seen(&mut self, category: Category) {
        if self.config.order_index(category).is_none() {
            return;
        }
        if !self.state.categories_seen.contains(&category) {
            self.state.categories_seen.push(category);
        }
    }

    fn detect_comment_violation(
        &mut self,
        declaration: &Declaration<'_>,
        category: Category,
        comments: &CommentIndex,
    ) {
        let Some(expected) = self.config.required_comment(category) else {
            return;
        };

        let found = declaration.preceding_comment(comments);
        if found.is_some_and(|text| text.trim() == expected) {
            return;
        }

        log::debug!(
            "{category} at line {} is preceded by {found:?}, expected {expected:?}",
            declaration.node().first_line()
        );
        self.offenses.push(Offense {
            span: declaration.span(),
            kind: OffenseKind::Comment,
            message: format!("Expected preceding comment: \"{expected}\""),
        });
    }

    fn detect_order_violation(&mut self, declaration: &Declaration<'_>) {
        if self.state.order_violation_reported {
            return;
        }

        let observed = &self.state.categories_seen;
        let mut required = observed.clone();
        required.sort_by_key(|&category| self.config.order_index(category));
        if &required == observed {
            return;
        }

        log::debug!(
            "order violation at line {}",
            declaration.node().first_line()
        );
        self.state.order_violation_reported = true;
        let message = format!(
            "Model elements must appear in order:{}\nObserved order:{}",
            bullet_list(self.config.required_order()),
            bullet_list(observed)
        );
        self.offenses.push(Offense {
            span: declaration.span(),
            kind: OffenseKind::Order,
            message,
        });
    }
}

fn bullet_list(categories: &[Category]) -> String {
    let items: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();
    format!("\n* {}\n", items.join("\n* "))
}

/// Run the rule over every declaration of `tree`, in document order
pub fn check_tree(tree: &SyntaxTree, comments: &CommentIndex, config: &RuleConfig) -> Vec<Offense> {
    let mut rule = ModelStructure::new(config);
    for node in tree.preorder().filter(|n| n.kind().is_declaration()) {
        rule.process(node, comments);
    }
    rule.into_offenses()
}

pub fn check_parsed(parsed: &ParsedSource, config: &RuleConfig) -> Vec<Offense> {
    check_tree(&parsed.tree, &parsed.comments, config)
}

/// Parse and check Ruby source
pub fn check_source(source: &str, config: &RuleConfig) -> Result<Vec<Offense>, ParseError> {
    let parsed = parse_source(source)?;
    Ok(check_parsed(&parsed, config))
}
