//! The symbol model: one `Symbol` struct carrying the fields every kind
//! shares, plus a `SymbolDetail` enum for the fields that only some kinds
//! have. This is the "common prefix record, not inheritance" shape the
//! design notes call for: polymorphism over "has modifiers"/"has
//! annotations" is just reading a field, never a vtable dispatch.

use apex_common::{Location, TypeDescriptor};

use crate::annotation::Annotation;
use crate::ids::SymbolId;
use crate::key::SymbolKey;
use crate::modifiers::Modifiers;

/// The closed set of symbol kinds the binder ever produces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    Class,
    Interface,
    Enum,
    EnumValue,
    Trigger,
    Method,
    Constructor,
    Field,
    Property,
    Parameter,
    Variable,
    BlockScope,
}

impl SymbolKind {
    #[must_use]
    pub const fn is_type_like(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Interface | Self::Enum | Self::Trigger
        )
    }

    #[must_use]
    pub const fn is_callable(self) -> bool {
        matches!(self, Self::Method | Self::Constructor)
    }
}

/// The lexical kind of a `BlockScope`, matching the contexts the listener
/// actually opens scopes for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeType {
    File,
    Class,
    Method,
    Block,
    Trigger,
}

/// Kind-specific data. A `Class`/`Interface`/`Enum`/`Trigger` symbol carries
/// `TypeLike`, a `Method`/`Constructor` carries `Callable`, a
/// `Field`/`Property`/`Parameter`/`Variable`/`EnumValue` carries `Typed`,
/// and a `BlockScope` carries `Block`.
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolDetail {
    TypeLike {
        super_class: Option<TypeDescriptor>,
        interfaces: Vec<TypeDescriptor>,
        /// Populated only for `Enum`; ordered `EnumValue` ids.
        values: Vec<SymbolId>,
    },
    Callable {
        return_type: TypeDescriptor,
        /// Ordered `Parameter` ids, in declaration order.
        parameters: Vec<SymbolId>,
        is_constructor: bool,
    },
    Typed {
        type_descriptor: TypeDescriptor,
    },
    Block {
        scope_type: ScopeType,
    },
}

impl SymbolDetail {
    #[must_use]
    pub fn as_type_like(&self) -> Option<(&Option<TypeDescriptor>, &[TypeDescriptor], &[SymbolId])> {
        match self {
            Self::TypeLike {
                super_class,
                interfaces,
                values,
            } => Some((super_class, interfaces, values)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_callable(&self) -> Option<(&TypeDescriptor, &[SymbolId], bool)> {
        match self {
            Self::Callable {
                return_type,
                parameters,
                is_constructor,
            } => Some((return_type, parameters, *is_constructor)),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_typed(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Typed { type_descriptor } => Some(type_descriptor),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_block(&self) -> Option<ScopeType> {
        match self {
            Self::Block { scope_type } => Some(*scope_type),
            _ => None,
        }
    }
}

/// A symbol: one declaration observed by the binder, with the fields every
/// kind shares plus kind-specific `detail`.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub id: SymbolId,
    pub kind: SymbolKind,
    /// Case-sensitive as stored; comparisons elsewhere are case-insensitive
    /// (Apex is a case-insensitive language).
    pub name: String,
    pub location: Location,
    pub modifiers: Modifiers,
    /// In source order.
    pub annotations: Vec<Annotation>,
    /// Id of the enclosing scope's `BlockScope` symbol — *not* the owning
    /// type symbol's id (see the constructor-parent-linkage discipline in
    /// the binder). `None` only for the file scope's own `BlockScope`.
    pub parent_id: Option<SymbolId>,
    pub key: SymbolKey,
    pub detail: SymbolDetail,
}

impl Symbol {
    #[must_use]
    pub fn is_test_method(&self) -> bool {
        self.modifiers.is_test_method()
    }

    #[must_use]
    pub fn is_constructor(&self) -> bool {
        matches!(
            self.detail,
            SymbolDetail::Callable {
                is_constructor: true,
                ..
            }
        )
    }
}
