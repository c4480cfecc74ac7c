//! The symbol model and per-file hierarchical symbol table.
//!
//! This crate has no dependency on a concrete parser: it is populated by
//! whatever listener walks a parse tree (see `apex-binder`) and consumed by
//! the cross-file resolution layer (see `apex-registry`).

pub mod annotation;
pub mod ids;
pub mod key;
pub mod modifiers;
pub mod reference;
pub mod symbol;
pub mod table;

pub use annotation::{Annotation, AnnotationParam};
pub use ids::{ScopeId, StableId, SymbolId};
pub use key::SymbolKey;
pub use modifiers::{ModifierFlags, Modifiers, Visibility};
pub use reference::{Reference, ReferenceContext};
pub use symbol::{ScopeType, Symbol, SymbolDetail, SymbolKind};
pub use table::{Scope, StructuralError, SymbolTable};
