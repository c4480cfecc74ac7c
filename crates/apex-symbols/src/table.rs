//! The per-file hierarchical symbol table: a scope tree with insertion-order
//! name multimaps, plus the flat symbol arena and reference list the
//! listener populates in a single pass.

use apex_common::Location;
use indexmap::IndexMap;
use rustc_hash::FxHashMap;

use crate::ids::{ScopeId, SymbolId};
use crate::key::SymbolKey;
use crate::modifiers::Modifiers;
use crate::reference::Reference;
use crate::symbol::{ScopeType, Symbol, SymbolDetail, SymbolKind};

/// One lexical scope: an insertion-ordered `name -> symbols` multimap (a
/// multimap because constructor overloads share the class name and sibling
/// blocks may each declare a variable of the same name), plus the ordered
/// list of child scopes.
#[derive(Debug)]
pub struct Scope {
    pub id: ScopeId,
    pub scope_type: ScopeType,
    pub parent: Option<ScopeId>,
    pub children: Vec<ScopeId>,
    names: IndexMap<String, Vec<SymbolId>>,
}

impl Scope {
    fn new(id: ScopeId, scope_type: ScopeType, parent: Option<ScopeId>) -> Self {
        Self {
            id,
            scope_type,
            parent,
            children: Vec::new(),
            names: IndexMap::new(),
        }
    }

    #[must_use]
    pub fn names_in_scope(&self, name: &str) -> &[SymbolId] {
        self.names
            .get(&name.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// A structural violation discovered by `validate()` — a scope-stack or
/// parent-link inconsistency, never a semantic (R1-R16) finding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructuralError(pub String);

/// A single file's symbol table: one file scope at the root, populated by
/// exactly one listener pass, then handed to the caller read-only.
#[derive(Debug)]
pub struct SymbolTable {
    file_path: String,
    symbols: Vec<Symbol>,
    scopes: FxHashMap<ScopeId, Scope>,
    scope_stack: Vec<ScopeId>,
    references: Vec<Reference>,
    key_index: FxHashMap<SymbolKey, Vec<SymbolId>>,
    next_id: u32,
    file_scope_id: ScopeId,
}

impl SymbolTable {
    /// A fresh table holding only its file scope.
    #[must_use]
    pub fn new(file_path: impl Into<String>) -> Self {
        let file_scope_symbol_id = SymbolId::new(0);
        let file_scope_id = ScopeId(file_scope_symbol_id);
        let file_scope_symbol = Symbol {
            id: file_scope_symbol_id,
            kind: SymbolKind::BlockScope,
            name: "file".to_string(),
            location: Location::dummy(),
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            parent_id: None,
            key: SymbolKey::new(SymbolKind::BlockScope, "file", Vec::new()),
            detail: SymbolDetail::Block {
                scope_type: ScopeType::File,
            },
        };

        let mut scopes = FxHashMap::default();
        scopes.insert(file_scope_id, Scope::new(file_scope_id, ScopeType::File, None));

        Self {
            file_path: file_path.into(),
            symbols: vec![file_scope_symbol],
            scopes,
            scope_stack: vec![file_scope_id],
            references: Vec::new(),
            key_index: FxHashMap::default(),
            next_id: 1,
            file_scope_id,
        }
    }

    #[must_use]
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    #[must_use]
    pub fn file_scope_id(&self) -> ScopeId {
        self.file_scope_id
    }

    #[must_use]
    pub fn current_scope_id(&self) -> ScopeId {
        *self
            .scope_stack
            .last()
            .expect("scope stack is never empty: the file scope is never popped")
    }

    #[must_use]
    pub fn current_scope(&self) -> &Scope {
        &self.scopes[&self.current_scope_id()]
    }

    #[must_use]
    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(&id)
    }

    fn alloc_id(&mut self) -> SymbolId {
        let id = SymbolId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Push a new `BlockScope` symbol as a child of the current scope and
    /// make it current. Its `parentId` is the *symbol* id of the scope being
    /// entered (the class/method/trigger/block), per the enclosing-block
    /// discipline members are later attached under.
    pub fn enter_scope(
        &mut self,
        name: impl Into<String>,
        scope_type: ScopeType,
        location: Location,
        owner_symbol_id: SymbolId,
    ) -> ScopeId {
        let parent_scope_id = self.current_scope_id();
        let id = self.alloc_id();
        let scope_id = ScopeId(id);

        let symbol = Symbol {
            id,
            kind: SymbolKind::BlockScope,
            name: name.into(),
            location,
            modifiers: Modifiers::default(),
            annotations: Vec::new(),
            parent_id: Some(owner_symbol_id),
            key: SymbolKey::new(SymbolKind::BlockScope, "block", Vec::new()),
            detail: SymbolDetail::Block { scope_type },
        };
        self.symbols.push(symbol);

        self.scopes
            .insert(scope_id, Scope::new(scope_id, scope_type, Some(parent_scope_id)));
        self.scopes
            .get_mut(&parent_scope_id)
            .expect("parent scope exists")
            .children
            .push(scope_id);
        self.scope_stack.push(scope_id);
        scope_id
    }

    /// Pop to the parent scope. Panics if called with only the file scope on
    /// the stack — a listener bug, never a user-triggerable condition.
    pub fn exit_scope(&mut self) {
        assert!(
            self.scope_stack.len() > 1,
            "exit_scope called with the file scope as current"
        );
        self.scope_stack.pop();
    }

    /// Allocate an id, build the symbol with it, and register the result
    /// into the current scope's name-multimap and the key index.
    ///
    /// `build` receives the freshly allocated id so the caller can set
    /// `Symbol.id` and any self-referential fields (`parentId` is already
    /// known ahead of time from `current_scope_id()`, so it's usually set by
    /// the caller before calling this).
    pub fn add_symbol(&mut self, build: impl FnOnce(SymbolId) -> Symbol) -> SymbolId {
        let id = self.alloc_id();
        let symbol = build(id);
        let name_lower = symbol.name.to_lowercase();
        let key = symbol.key.clone();

        self.symbols.push(symbol);
        self.key_index.entry(key).or_default().push(id);

        let current = self.current_scope_id();
        self.scopes
            .get_mut(&current)
            .expect("current scope exists")
            .names
            .entry(name_lower)
            .or_default()
            .push(id);

        id
    }

    #[must_use]
    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.as_u32() as usize)
    }

    /// Mutable access to an already-registered symbol, used to append to a
    /// callable's `parameters` list or an enum's `values` list as later
    /// sibling declarations (`FormalParameter`, `EnumConstants`) fire after
    /// the owning declaration has already been added.
    #[must_use]
    pub fn symbol_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.as_u32() as usize)
    }

    /// Names declared directly in the current scope, not walking outward —
    /// what R13/R14/R15 scan for same-scope duplicates.
    #[must_use]
    pub fn names_in_current_scope(&self, name: &str) -> &[SymbolId] {
        self.current_scope().names_in_scope(name)
    }

    /// Walk from the current scope outward, returning the first-registered
    /// symbol with `name` encountered in the nearest scope that declares it.
    /// Overload sets must be read with `lookup_all` instead.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.lookup_all(name).into_iter().next()
    }

    /// Like `lookup`, but returns every symbol sharing `name` in the nearest
    /// scope that declares it (the full overload set), not just the first.
    #[must_use]
    pub fn lookup_all(&self, name: &str) -> Vec<&Symbol> {
        let name_lower = name.to_lowercase();
        let mut scope_id = Some(self.current_scope_id());
        while let Some(id) = scope_id {
            let scope = &self.scopes[&id];
            if let Some(ids) = scope.names.get(&name_lower) {
                return ids.iter().filter_map(|sid| self.get(*sid)).collect();
            }
            scope_id = scope.parent;
        }
        Vec::new()
    }

    /// O(1) lookup by `(prefix, name, path)`; overload disambiguation among
    /// the returned candidates is left to the caller.
    #[must_use]
    pub fn lookup_by_key(&self, key: &SymbolKey) -> Vec<&Symbol> {
        self.key_index
            .get(key)
            .map(|ids| ids.iter().filter_map(|id| self.get(*id)).collect())
            .unwrap_or_default()
    }

    /// All symbols in registration order: since `SymbolId`s are allocated
    /// depth-first as the listener walks the tree, this slice already
    /// satisfies "parents precede children, siblings in declaration order"
    /// without any extra traversal.
    #[must_use]
    pub fn get_all_symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn add_reference(&mut self, reference: Reference) {
        self.references.push(reference);
    }

    #[must_use]
    pub fn get_all_references(&self) -> &[Reference] {
        &self.references
    }

    /// Check I1/I2 against the table's current state. Never called mid-walk;
    /// a caller runs this once a compilation finishes to catch binder bugs,
    /// not user errors (those are R1-R16 diagnostics, not structural ones).
    #[must_use]
    pub fn validate(&self) -> Vec<StructuralError> {
        let mut errors = Vec::new();

        for symbol in &self.symbols {
            let Some(parent_id) = symbol.parent_id else {
                if symbol.kind != SymbolKind::BlockScope || symbol.id != SymbolId::new(0) {
                    errors.push(StructuralError(format!(
                        "symbol {} ({:?}) has no parentId but is not the file scope",
                        symbol.id, symbol.kind
                    )));
                }
                continue;
            };

            match self.get(parent_id) {
                // A block scope's parentId is the type/callable declaration
                // it belongs to (enter_scope), not another BlockScope.
                Some(_) if symbol.kind == SymbolKind::BlockScope => {}
                Some(parent) if parent.kind == SymbolKind::BlockScope => {}
                Some(parent) => errors.push(StructuralError(format!(
                    "symbol {} has parentId {} which is not a BlockScope symbol (kind {:?})",
                    symbol.id, parent_id, parent.kind
                ))),
                None => errors.push(StructuralError(format!(
                    "symbol {} has dangling parentId {}",
                    symbol.id, parent_id
                ))),
            }
        }

        errors
    }
}

#[cfg(test)]
#[path = "../tests/table.rs"]
mod tests;
