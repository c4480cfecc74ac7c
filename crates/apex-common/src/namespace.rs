//! Namespace records for qualified type names (`System.PageReference`,
//! `fflib_Application.SelectorFactory`).

use std::sync::Arc;

use once_cell::sync::Lazy;

/// A namespace prefix on a qualified type name.
///
/// Apex ships one built-in namespace (`System`); everything else is a
/// managed-package or user-defined namespace discovered from source.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Namespace {
    pub name: String,
    pub version: Option<String>,
}

impl Namespace {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
        }
    }

    #[must_use]
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(version.into()),
        }
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        self.name.eq_ignore_ascii_case("System")
    }
}

/// Single shared instance for the built-in `System` namespace.
///
/// Every type descriptor that resolves a `System.*` prefix points at this
/// instance rather than allocating a fresh `Namespace` per occurrence.
pub static SYSTEM_NAMESPACE: Lazy<Arc<Namespace>> =
    Lazy::new(|| Arc::new(Namespace::new("System")));

/// Resolve a namespace prefix to the shared `System` instance when it
/// matches case-insensitively, or allocate a fresh namespace otherwise.
#[must_use]
pub fn resolve_namespace(prefix: &str) -> Arc<Namespace> {
    if prefix.eq_ignore_ascii_case("System") {
        SYSTEM_NAMESPACE.clone()
    } else {
        Arc::new(Namespace::new(prefix))
    }
}
