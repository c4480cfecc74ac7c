//! `SymbolKey`: `(prefix, name, path)`, unique enough for O(1) lookup but
//! not globally unique within a file — overloads share a key and are
//! disambiguated by the caller, not by the key itself.

use crate::symbol::SymbolKind;

/// `(kind, name, enclosing-type path)`, used to key `lookupByKey`.
///
/// `path` is the outer-to-inner list of enclosing type names, not including
/// the symbol's own name. Two overloaded methods in the same class have
/// equal keys; `SymbolId` is what actually disambiguates them.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SymbolKey {
    pub prefix: SymbolKind,
    pub name: String,
    pub path: Vec<String>,
}

impl SymbolKey {
    #[must_use]
    pub fn new(prefix: SymbolKind, name: impl Into<String>, path: Vec<String>) -> Self {
        Self {
            prefix,
            name: name.into(),
            path,
        }
    }
}
