//! Identifiers for symbols and scopes.
//!
//! `SymbolId` is a monotonically increasing integer, unique within one
//! file's `SymbolTable`. That's enough for everything the binder and a
//! single compilation need; it is only when a host needs an identifier that
//! stays stable across process restarts (e.g. a persisted cache key) that a
//! `StableId` (a ULID) is worth minting instead.

use std::fmt;

/// Identifies a symbol uniquely within one file's `SymbolTable`.
///
/// Monotonically increasing per file; ids from different files are not
/// comparable (two files both have a `SymbolId(0)` for their file scope).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(u32);

impl SymbolId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SymbolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifies a lexical scope. A scope's identity *is* the `SymbolId` of its
/// owning `BlockScope` symbol, so scope lookups and symbol lookups share one
/// id space instead of needing a separate translation table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub SymbolId);

impl ScopeId {
    #[must_use]
    pub const fn symbol_id(self) -> SymbolId {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope{}", self.0)
    }
}

/// A cross-process-stable identifier, used only when a host caches symbols
/// outside the lifetime of one `SymbolTable` (e.g. on disk) and needs an id
/// that doesn't collide across compiler runs the way a per-file `SymbolId`
/// would.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StableId(ulid::Ulid);

impl StableId {
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new())
    }
}

impl fmt::Display for StableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_ids_are_unique() {
        let a = StableId::generate();
        let b = StableId::generate();
        assert_ne!(a, b);
    }

    #[test]
    fn scope_id_shares_the_symbol_id_space() {
        let sym = SymbolId::new(7);
        let scope = ScopeId(sym);
        assert_eq!(scope.symbol_id(), sym);
    }
}
