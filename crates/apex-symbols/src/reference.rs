//! References: every name use the listener observes while walking an
//! expression context, recorded on the `SymbolTable` rather than inline on
//! symbols so reference discovery can be layered on top of a symbols-only
//! pass later.

use apex_common::Location;

use crate::ids::SymbolId;

/// The syntactic context a name use was observed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceContext {
    VariableUsage,
    MethodCall,
    FieldAccess,
    TypeReference,
    ConstructorCall,
    StaticMemberAccess,
    ChainedType,
}

/// One name use.
///
/// A chained expression (`URL.getOrgDomainUrl().toExternalForm()`) is
/// recorded as a single reference with `context = ChainedType`, `name` the
/// dot-joined chain, and `chain_nodes` holding each segment individually.
/// Non-chained references leave `chain_nodes` empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub context: ReferenceContext,
    pub location: Location,
    /// The symbol whose body this reference occurs in (a method, a
    /// constructor, or the file scope for top-level references).
    pub enclosing_symbol_id: SymbolId,
    pub chain_nodes: Vec<String>,
    /// Dot-joined names of other references passed as this call's
    /// arguments (only ever populated on a `MethodCall`/`ConstructorCall`
    /// reference), e.g. a chained expression passed as a parameter.
    pub attached_arguments: Vec<String>,
}

impl Reference {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        context: ReferenceContext,
        location: Location,
        enclosing_symbol_id: SymbolId,
    ) -> Self {
        Self {
            name: name.into(),
            context,
            location,
            enclosing_symbol_id,
            chain_nodes: Vec::new(),
            attached_arguments: Vec::new(),
        }
    }

    /// Build a `ChainedType` reference from its segments, joining them with
    /// `.` for `name` per the chained-expression contract.
    #[must_use]
    pub fn chained(
        chain_nodes: Vec<String>,
        location: Location,
        enclosing_symbol_id: SymbolId,
    ) -> Self {
        let name = chain_nodes.join(".");
        Self {
            name,
            context: ReferenceContext::ChainedType,
            location,
            enclosing_symbol_id,
            chain_nodes,
            attached_arguments: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_chained(&self) -> bool {
        !self.chain_nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SymbolId;

    #[test]
    fn chained_reference_joins_nodes_with_dots() {
        let r = Reference::chained(
            vec!["URL".into(), "getOrgDomainUrl".into(), "toExternalForm".into()],
            Location::dummy(),
            SymbolId::new(3),
        );
        assert_eq!(r.name, "URL.getOrgDomainUrl.toExternalForm");
        assert_eq!(r.context, ReferenceContext::ChainedType);
        assert!(r.is_chained());
    }

    #[test]
    fn plain_reference_has_no_chain_nodes() {
        let r = Reference::new(
            "accountId",
            ReferenceContext::VariableUsage,
            Location::dummy(),
            SymbolId::new(1),
        );
        assert!(!r.is_chained());
    }
}
