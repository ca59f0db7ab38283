//! Model Structure Lint
//!
//! Checks that Rails model classes declare their elements (associations,
//! validations, scopes, callbacks and so on) in a configured order, each
//! section introduced by its expected comment.
//!
//! This library provides:
//! - Ruby parsing into a compact syntax tree with attached comments
//! - The model structure rule itself
//! - Configuration loading, workspace checking and reporting
//! - An LSP server publishing offenses as diagnostics

pub mod config;
pub mod lsp;
pub mod report;
pub mod rule;
pub mod syntax;
pub mod workspace;

pub use config::Config;
pub use rule::{Category, Offense, OffenseKind, RuleConfig, check_source};
pub use syntax::parse_source;
