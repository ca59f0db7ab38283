//! LSP Protocol Implementation
//!
//! Publishes model structure offenses as diagnostics for open Ruby documents.

pub mod backend;
pub mod document;
pub mod handlers;
pub mod server;

pub use backend::Backend;
