//! Per-document resolver cache for long-lived sessions.

use std::collections::HashMap;

use super::resolver::LocationResolver;

/// One [`LocationResolver`] per open document, keyed by URI.
///
/// Editing one document never disturbs the resolver of another, so several
/// documents can be linted in any interleaving.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: HashMap<String, LocationResolver>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load or replace a document's text.
    pub fn update(&mut self, uri: impl Into<String>, text: &str) {
        let uri = uri.into();
        tracing::debug!("Loading document {}", uri);
        self.documents
            .entry(uri)
            .or_insert_with(LocationResolver::new)
            .update(text);
    }

    /// Drop a document. Returns whether it was open.
    pub fn close(&mut self, uri: &str) -> bool {
        self.documents.remove(uri).is_some()
    }

    /// Resolver for an open document.
    pub fn get(&self, uri: &str) -> Option<&LocationResolver> {
        self.documents.get(uri)
    }

    pub fn contains(&self, uri: &str) -> bool {
        self.documents.contains_key(uri)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
