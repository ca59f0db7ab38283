use tower_lsp::lsp_types::*;

use crate::lsp::backend::Backend;
use crate::lsp::document::DocumentState;
use crate::rule::{Offense, check_source};

pub const DIAGNOSTIC_SOURCE: &str = "model-structure";

/// Trait for handling diagnostics
#[tower_lsp::async_trait]
pub trait HandleDiagnostics {
    fn create_document_state(&self, content: String) -> DocumentState;
    async fn publish_diagnostics(&self, uri: Url);
    fn create_lsp_diagnostic(&self, doc_state: &DocumentState, offense: &Offense) -> Diagnostic;
}

#[tower_lsp::async_trait]
impl HandleDiagnostics for Backend {
    /// Check the content with a fresh rule instance
    fn create_document_state(&self, content: String) -> DocumentState {
        let offenses = match check_source(&content, &self.rule_config) {
            Ok(offenses) => offenses,
            Err(e) => {
                log::warn!("Could not check document: {}", e);
                Vec::new()
            }
        };

        DocumentState { content, offenses }
    }

    /// Publish diagnostics for a document
    async fn publish_diagnostics(&self, uri: Url) {
        let docs = self.documents.lock().await;
        let doc_state = match docs.get(&uri) {
            Some(state) => state,
            None => return,
        };

        let diagnostics = doc_state
            .offenses
            .iter()
            .map(|offense| self.create_lsp_diagnostic(doc_state, offense))
            .collect();
        drop(docs);

        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    fn create_lsp_diagnostic(&self, doc_state: &DocumentState, offense: &Offense) -> Diagnostic {
        Diagnostic::new(
            doc_state.range(offense.span),
            Some(DiagnosticSeverity::WARNING),
            Some(NumberOrString::String(offense.kind.as_str().to_string())),
            Some(DIAGNOSTIC_SOURCE.to_string()),
            offense.message.clone(),
            None,
            None,
        )
    }
}
