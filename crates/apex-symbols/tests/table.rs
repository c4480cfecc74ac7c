use apex_common::{Location, TypeDescriptor};

use crate::ids::SymbolId;
use crate::key::SymbolKey;
use crate::modifiers::Modifiers;
use crate::reference::{Reference, ReferenceContext};
use crate::symbol::{ScopeType, Symbol, SymbolDetail, SymbolKind};
use crate::table::SymbolTable;

fn class_symbol(id: SymbolId, name: &str, parent_id: SymbolId) -> Symbol {
    Symbol {
        id,
        kind: SymbolKind::Class,
        name: name.to_string(),
        location: Location::dummy(),
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        parent_id: Some(parent_id),
        key: SymbolKey::new(SymbolKind::Class, name, Vec::new()),
        detail: SymbolDetail::TypeLike {
            super_class: None,
            interfaces: Vec::new(),
            values: Vec::new(),
        },
    }
}

fn constructor_symbol(id: SymbolId, class_name: &str, parent_id: SymbolId) -> Symbol {
    Symbol {
        id,
        kind: SymbolKind::Constructor,
        name: class_name.to_string(),
        location: Location::dummy(),
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        parent_id: Some(parent_id),
        key: SymbolKey::new(SymbolKind::Constructor, class_name, vec![class_name.to_string()]),
        detail: SymbolDetail::Callable {
            return_type: TypeDescriptor::void(),
            parameters: Vec::new(),
            is_constructor: true,
        },
    }
}

fn method_symbol(id: SymbolId, name: &str, path: Vec<String>) -> Symbol {
    Symbol {
        id,
        kind: SymbolKind::Method,
        name: name.to_string(),
        location: Location::dummy(),
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        parent_id: None,
        key: SymbolKey::new(SymbolKind::Method, name, path),
        detail: SymbolDetail::Callable {
            return_type: TypeDescriptor::void(),
            parameters: Vec::new(),
            is_constructor: false,
        },
    }
}

#[test]
fn fresh_table_has_only_a_file_scope() {
    let table = SymbolTable::new("Example.cls");
    assert_eq!(table.get_all_symbols().len(), 1);
    assert_eq!(table.get_all_symbols()[0].kind, SymbolKind::BlockScope);
    assert!(table.validate().is_empty());
}

/// Scenario 1 from the end-to-end walkthrough: `public class C { public C() {} }`.
#[test]
fn constructor_parent_links_to_block_scope_not_type_symbol() {
    let mut table = SymbolTable::new("C.cls");

    let file_scope_id = table.file_scope_id().symbol_id();
    let class_id = table.add_symbol(|id| class_symbol(id, "C", file_scope_id));
    let class_scope = table.enter_scope("C", ScopeType::Class, Location::dummy(), class_id);

    let ctor_id = table.add_symbol(|id| constructor_symbol(id, "C", class_scope.symbol_id()));
    table.exit_scope();

    let ctor = table.get(ctor_id).unwrap();
    assert_eq!(ctor.parent_id, Some(class_scope.symbol_id()));
    assert_ne!(ctor.parent_id, Some(class_id));
    assert!(ctor.is_constructor());
    assert!(table.validate().is_empty());
}

#[test]
fn exit_scope_panics_on_the_file_scope() {
    let mut table = SymbolTable::new("E.cls");
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| table.exit_scope()));
    assert!(result.is_err());
}

#[test]
fn lookup_all_returns_full_overload_set_from_nearest_scope() {
    let mut table = SymbolTable::new("Overloads.cls");
    let file_scope_id = table.file_scope_id().symbol_id();
    let class_id = table.add_symbol(|id| class_symbol(id, "Calc", file_scope_id));
    let class_scope = table.enter_scope("Calc", ScopeType::Class, Location::dummy(), class_id);

    table.add_symbol(|id| method_symbol(id, "m", vec!["Calc".into()]));
    table.add_symbol(|id| method_symbol(id, "m", vec!["Calc".into()]));

    let overloads = table.lookup_all("m");
    assert_eq!(overloads.len(), 2);

    let _ = class_scope;
}

#[test]
fn lookup_walks_outward_when_not_in_current_scope() {
    let mut table = SymbolTable::new("Outward.cls");
    let file_scope_id = table.file_scope_id().symbol_id();
    let class_id = table.add_symbol(|id| class_symbol(id, "Outer", file_scope_id));
    table.enter_scope("Outer", ScopeType::Class, Location::dummy(), class_id);

    assert!(table.lookup("Outer").is_some());
    assert_eq!(table.lookup("Outer").unwrap().kind, SymbolKind::Class);
}

#[test]
fn lookup_by_key_is_keyed_on_prefix_name_and_path() {
    let mut table = SymbolTable::new("Keyed.cls");
    let file_scope_id = table.file_scope_id().symbol_id();
    let class_id = table.add_symbol(|id| class_symbol(id, "K", file_scope_id));
    table.enter_scope("K", ScopeType::Class, Location::dummy(), class_id);
    table.add_symbol(|id| method_symbol(id, "go", vec!["K".into()]));

    let key = SymbolKey::new(SymbolKind::Method, "go", vec!["K".into()]);
    let found = table.lookup_by_key(&key);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "go");
}

#[test]
fn validate_flags_dangling_parent_id() {
    let mut table = SymbolTable::new("Broken.cls");
    table.add_symbol(|id| class_symbol(id, "Dangling", SymbolId::new(999)));
    let errors = table.validate();
    assert_eq!(errors.len(), 1);
}

#[test]
fn references_are_recorded_in_document_order() {
    let mut table = SymbolTable::new("Refs.cls");
    table.add_reference(Reference::new(
        "a",
        ReferenceContext::VariableUsage,
        Location::at(1, 0),
        SymbolId::new(0),
    ));
    table.add_reference(Reference::new(
        "b",
        ReferenceContext::VariableUsage,
        Location::at(2, 0),
        SymbolId::new(0),
    ));
    let refs = table.get_all_references();
    assert_eq!(refs[0].name, "a");
    assert_eq!(refs[1].name, "b");
}
