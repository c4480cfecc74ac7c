//! Type descriptor model: parses a raw type spelling from the parse tree
//! (`"Map<Id, Account>"`, `"fflib_Application.SelectorFactory"`, `"Integer[]"`)
//! into a structured descriptor.
//!
//! Parsing never fails. An input shape we don't recognize still yields a
//! descriptor carrying at least `name` and `originalTypeString`, since a
//! malformed type spelling must not abort the listener's walk (see the
//! fault-barrier discipline in the binder).

use std::sync::Arc;

use crate::namespace::{Namespace, resolve_namespace};

/// The closed set of Apex primitive type names (§4.1), lowercase. Exposed so
/// collaborators that seed built-in names (e.g. the global symbol registry's
/// `seed_builtins`) share this one list instead of duplicating it.
pub const PRIMITIVES: &[&str] = &[
    "string", "integer", "long", "double", "decimal", "boolean", "date", "datetime", "time", "id",
    "blob", "object", "void",
];

/// The closed set of Apex collection head names (§4.1), lowercase.
pub const COLLECTIONS: &[&str] = &["list", "set", "map"];

/// A parsed Apex type reference.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TypeDescriptor {
    /// The rightmost simple identifier (`"SelectorFactory"` for
    /// `fflib_Application.SelectorFactory`).
    pub name: String,
    /// The verbatim source spelling, unmodified.
    pub original_type_string: String,
    pub is_primitive: bool,
    pub is_array: bool,
    pub is_collection: bool,
    #[serde(skip)]
    pub namespace: Option<Arc<Namespace>>,
}

impl TypeDescriptor {
    /// Parse a raw type spelling straight from the parse tree.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let original_type_string = raw.to_string();
        let trimmed = raw.trim();

        let is_array = is_array_shape(trimmed);
        let head = if is_array {
            trimmed[..trimmed.len() - 2].trim()
        } else {
            trimmed
        };

        // Generic arguments (`List<String>`, `Map<Id, Account>`) don't change
        // the head identifier used for name/namespace extraction.
        let head_no_generics = match head.find('<') {
            Some(idx) => &head[..idx],
            None => head,
        };

        let is_collection = COLLECTIONS
            .iter()
            .any(|c| c.eq_ignore_ascii_case(head_no_generics.trim()));

        let (namespace, name) = split_namespace(head_no_generics.trim());
        let is_primitive = namespace.is_none()
            && PRIMITIVES
                .iter()
                .any(|p| p.eq_ignore_ascii_case(name.as_str()));

        Self {
            name,
            original_type_string,
            is_primitive,
            is_array,
            is_collection,
            namespace: namespace.map(|n| resolve_namespace(&n)),
        }
    }

    /// A bare descriptor with no parsing performed, used for synthesized types
    /// (e.g. a constructor's implicit `void` return type).
    #[must_use]
    pub fn synthetic(name: impl Into<String>) -> Self {
        let name = name.into();
        let is_primitive = PRIMITIVES.iter().any(|p| p.eq_ignore_ascii_case(&name));
        Self {
            original_type_string: name.clone(),
            is_primitive,
            is_array: false,
            is_collection: false,
            namespace: None,
            name,
        }
    }

    #[must_use]
    pub fn void() -> Self {
        Self::synthetic("void")
    }
}

fn is_array_shape(s: &str) -> bool {
    s.len() >= 2 && s.ends_with("[]")
}

/// Split `"fflib_Application.SelectorFactory"` into
/// `(Some("fflib_Application"), "SelectorFactory")`, or
/// `"Account"` into `(None, "Account")`.
///
/// Only the *last* dot-separated segment becomes `name`; everything before
/// it (even multiple segments like `MyNamespace.Outer.Inner`) collapses into
/// the namespace prefix verbatim, matching how the listener reports
/// `originalTypeString` independently.
fn split_namespace(head: &str) -> (Option<String>, String) {
    match head.rfind('.') {
        Some(idx) => {
            let namespace = head[..idx].to_string();
            let name = head[idx + 1..].to_string();
            (Some(namespace), name)
        }
        None => (None, head.to_string()),
    }
}

#[cfg(test)]
#[path = "../tests/type_descriptor.rs"]
mod tests;
