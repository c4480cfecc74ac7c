//! The `DocumentStore` external collaborator contract (§6).
//!
//! Document storage, file watching, and workspace enumeration live outside
//! this core; the lazy resolver only ever needs to read bytes for a URI it
//! has mapped a name to, and occasionally learn that a buffer changed.

/// Abstract read/write access to source documents, implemented by the host
/// (an in-memory LSP document store, a filesystem shim for tests, etc.).
pub trait DocumentStore {
    /// Read the current content of a document, if the host has it.
    fn read(&self, uri: &str) -> Option<String>;

    /// Install or replace a document's content (e.g. on `didOpen`/`didChange`).
    fn set(&mut self, uri: &str, content: String);

    /// Drop a document (e.g. on `didClose` or file deletion).
    fn clear_file(&mut self, uri: &str);
}

/// An in-memory `DocumentStore` used in tests and for standalone tooling
/// that doesn't run behind an LSP session.
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentStore {
    documents: std::collections::HashMap<String, String>,
}

impl InMemoryDocumentStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn read(&self, uri: &str) -> Option<String> {
        self.documents.get(uri).cloned()
    }

    fn set(&mut self, uri: &str, content: String) {
        self.documents.insert(uri.to_string(), content);
    }

    fn clear_file(&mut self, uri: &str) {
        self.documents.remove(uri);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_store_roundtrips_documents() {
        let mut store = InMemoryDocumentStore::new();
        store.set("A.cls", "public class A {}".to_string());
        assert_eq!(store.read("A.cls").as_deref(), Some("public class A {}"));
        store.clear_file("A.cls");
        assert_eq!(store.read("A.cls"), None);
    }
}
