//! Per-document lint sessions.

use tracing::{debug, warn};

use super::diagnostic::PublishDiagnosticsParams;
use crate::ast::Stage;
use crate::lint::{Linter, RuleRegistry};
use crate::location::DocumentStore;

/// Lints open documents, each against its own text.
///
/// A newer version of a document replaces the text before the next lint, so
/// diagnostics always locate against the version they were produced for.
#[derive(Debug)]
pub struct LintSession<'r> {
    registry: &'r RuleRegistry,
    documents: DocumentStore,
}

impl<'r> LintSession<'r> {
    pub fn new(registry: &'r RuleRegistry) -> Self {
        Self {
            registry,
            documents: DocumentStore::new(),
        }
    }

    /// Start tracking a document.
    pub fn open(&mut self, uri: &str, text: &str) {
        self.documents.update(uri, text);
    }

    /// Replace the text of a document, opening it if needed.
    pub fn change(&mut self, uri: &str, text: &str) {
        self.documents.update(uri, text);
    }

    /// Stop tracking a document. Returns whether it was open.
    pub fn close(&mut self, uri: &str) -> bool {
        self.documents.close(uri)
    }

    pub fn is_open(&self, uri: &str) -> bool {
        self.documents.contains(uri)
    }

    /// Lint the stages parsed from an open document.
    ///
    /// Returns `None` for a document that was never opened.
    pub fn lint(&self, uri: &str, stages: &[Stage]) -> Option<PublishDiagnosticsParams> {
        let Some(resolver) = self.documents.get(uri) else {
            warn!("Lint requested for unopened document {}", uri);
            return None;
        };
        let results = Linter::new(self.registry).run(stages, resolver);
        let params = PublishDiagnosticsParams::new(uri, &results);
        debug!("{} diagnostics for {}", params.diagnostics.len(), uri);
        Some(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Instruction, SourceRange, WorkdirCommand};

    fn stage_with_workdir(path: &str, line: usize) -> Stage {
        Stage::new("alpine:3.20").with_command(Instruction::Workdir(WorkdirCommand {
            path: path.to_string(),
            original: format!("WORKDIR {}", path),
            location: vec![SourceRange::line(line)],
        }))
    }

    #[test]
    fn unopened_document_is_not_linted() {
        let session = LintSession::new(RuleRegistry::builtin());

        assert!(session.lint("file:///a", &[stage_with_workdir("app", 2)]).is_none());
    }

    #[test]
    fn documents_resolve_against_their_own_text() {
        let mut session = LintSession::new(RuleRegistry::builtin());
        session.open("file:///a", "FROM alpine:3.20\nWORKDIR app");
        session.open("file:///b", "FROM alpine:3.20\n\n\nWORKDIR   app");

        let a = session.lint("file:///a", &[stage_with_workdir("app", 2)]).unwrap();
        let b = session.lint("file:///b", &[stage_with_workdir("app", 4)]).unwrap();

        assert_eq!(a.diagnostics[0].range.start.line, 1);
        assert_eq!(a.diagnostics[0].range.start.character, 8);
        assert_eq!(b.diagnostics[0].range.start.line, 3);
        assert_eq!(b.diagnostics[0].range.start.character, 10);
    }

    #[test]
    fn change_replaces_text() {
        let mut session = LintSession::new(RuleRegistry::builtin());
        session.open("file:///a", "FROM alpine:3.20\nWORKDIR app");
        session.change("file:///a", "FROM alpine:3.20\nWORKDIR  app");

        let params = session.lint("file:///a", &[stage_with_workdir("app", 2)]).unwrap();
        assert_eq!(params.diagnostics[0].range.start.character, 9);
    }

    #[test]
    fn close_forgets_document() {
        let mut session = LintSession::new(RuleRegistry::builtin());
        session.open("file:///a", "FROM alpine");

        assert!(session.close("file:///a"));
        assert!(!session.is_open("file:///a"));
        assert!(!session.close("file:///a"));
    }
}
