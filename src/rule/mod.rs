//! Model Structure Rule
//!
//! Classification and validation of model class declarations, separated from
//! parsing and reporting concerns.

pub mod category;
pub mod classify;
pub mod comment;
pub mod engine;
pub mod nesting;
pub mod settings;
pub mod view;

pub use category::Category;
pub use engine::{
    ModelStructure, Offense, OffenseKind, ValidatorState, check_parsed, check_source, check_tree,
};
pub use settings::{ConfigError, RuleConfig, RuleSettings};
