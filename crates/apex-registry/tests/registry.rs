//! Federation tests for `GlobalSymbolRegistry`, driven entirely through the
//! public API: `register_file`/`unregister`/`resolve_by_fqn`/`resolve_by_name`.

use std::sync::Arc;
use std::time::Duration;

use apex_common::{DiagnosticSink, Location, RegistryOptions};
use apex_registry::{GlobalSymbolRegistry, NamespaceTier, ResolveContext};
use apex_symbols::{Modifiers, Symbol, SymbolDetail, SymbolKey, SymbolKind, SymbolTable};

fn table_with_single_class(file_path: &str, class_name: &str) -> SymbolTable {
    let mut table = SymbolTable::new(file_path);
    let file_scope_id = table.file_scope_id().symbol_id();
    table.add_symbol(|id| Symbol {
        id,
        kind: SymbolKind::Class,
        name: class_name.to_string(),
        location: Location::at(1, 0),
        modifiers: Modifiers::default(),
        annotations: Vec::new(),
        parent_id: Some(file_scope_id),
        key: SymbolKey::new(SymbolKind::Class, class_name, Vec::new()),
        detail: SymbolDetail::TypeLike {
            super_class: None,
            interfaces: Vec::new(),
            values: Vec::new(),
        },
    });
    table
}

#[test]
fn register_file_is_resolvable_unambiguously_by_fqn() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();
    registry.register_file(
        "Account.cls",
        Arc::new(table_with_single_class("Account.cls", "Account")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    let resolved = registry.resolve_by_fqn("Account").expect("registered symbol resolves");
    assert_eq!(resolved.name, "Account");
    assert!(reporter.errors().is_empty());
}

#[test]
fn second_file_declaring_the_same_simple_name_becomes_ambiguous() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "A1.cls",
        Arc::new(table_with_single_class("A1.cls", "Foo")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    registry.register_file(
        "A2.cls",
        Arc::new(table_with_single_class("A2.cls", "Foo")),
        NamespaceTier::Managed,
        Some("fflib".to_string()),
        &mut reporter,
    );

    assert!(registry.resolve_by_fqn("Foo").is_none());
    assert_eq!(registry.candidates("Foo").len(), 2);
}

#[test]
fn resolve_by_name_prefers_the_namespace_matching_candidate() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "A1.cls",
        Arc::new(table_with_single_class("A1.cls", "Foo")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    registry.register_file(
        "A2.cls",
        Arc::new(table_with_single_class("A2.cls", "Foo")),
        NamespaceTier::Managed,
        Some("fflib".to_string()),
        &mut reporter,
    );

    let context = ResolveContext {
        expected_namespace: Some("fflib".to_string()),
        ..Default::default()
    };
    registry.resolve_by_name("Foo", &context).expect("ambiguous name still resolves");

    let winner = registry
        .candidates("Foo")
        .iter()
        .find(|c| c.usage_count == 1)
        .expect("exactly one candidate was scored as the winner");
    assert_eq!(winner.namespace.as_deref(), Some("fflib"));
}

#[test]
fn unregister_deletes_ambiguous_entries_once_empty() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "A1.cls",
        Arc::new(table_with_single_class("A1.cls", "Foo")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    registry.register_file(
        "A2.cls",
        Arc::new(table_with_single_class("A2.cls", "Foo")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    assert_eq!(registry.candidates("Foo").len(), 2);

    registry.unregister("A1.cls");
    assert_eq!(registry.candidates("Foo").len(), 1);

    registry.unregister("A2.cls");
    assert!(registry.candidates("Foo").is_empty());
    assert!(registry.names_for_file("A2.cls").is_empty());
}

#[test]
fn file_and_name_maps_stay_symmetric() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();
    registry.register_file(
        "X.cls",
        Arc::new(table_with_single_class("X.cls", "Xyz")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    assert!(registry.names_for_file("X.cls").contains("Xyz"));
    assert!(registry.files_for_name("Xyz").iter().any(|f| f.as_ref() == "X.cls"));

    registry.unregister("X.cls");
    assert!(registry.names_for_file("X.cls").is_empty());
    assert!(registry.files_for_name("Xyz").is_empty());
}

#[test]
fn reregistering_the_same_file_is_idempotent() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "R.cls",
        Arc::new(table_with_single_class("R.cls", "Re")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    let before = registry.names_for_file("R.cls");

    registry.register_file(
        "R.cls",
        Arc::new(table_with_single_class("R.cls", "Re")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    let after = registry.names_for_file("R.cls");

    assert_eq!(before, after);
    assert!(registry.resolve_by_fqn("Re").is_some());
}

#[test]
fn seed_builtins_routes_matching_user_declarations_into_the_ambiguous_map() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "Shadow.cls",
        Arc::new(table_with_single_class("Shadow.cls", "System")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    assert!(registry.resolve_by_fqn("System").is_none());
    assert_eq!(registry.candidates("System").len(), 1);
}

#[test]
fn disabling_seed_builtins_leaves_the_name_free_for_unambiguous_registration() {
    let options = RegistryOptions {
        max_files: None,
        seed_builtins: false,
    };
    let mut registry = GlobalSymbolRegistry::new(options);
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "Sys.cls",
        Arc::new(table_with_single_class("Sys.cls", "System")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    assert!(registry.resolve_by_fqn("System").is_some());
}

#[test]
fn max_files_evicts_the_least_recently_resolved_file() {
    let options = RegistryOptions {
        max_files: Some(1),
        seed_builtins: false,
    };
    let mut registry = GlobalSymbolRegistry::new(options);
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "One.cls",
        Arc::new(table_with_single_class("One.cls", "One")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );
    std::thread::sleep(Duration::from_millis(5));
    let evicted = registry.register_file(
        "Two.cls",
        Arc::new(table_with_single_class("Two.cls", "Two")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    assert_eq!(evicted.len(), 1);
    assert_eq!(evicted[0].as_ref(), "One.cls");
    assert!(!registry.is_registered("One.cls"));
    assert!(registry.is_registered("Two.cls"));
}

#[test]
fn shadowing_a_candidate_already_present_in_the_ambiguous_map_warns() {
    let mut registry = GlobalSymbolRegistry::new(RegistryOptions::default());
    let mut reporter = DiagnosticSink::new();

    registry.register_file(
        "Builtin.cls",
        Arc::new(table_with_single_class("Builtin.cls", "Helper")),
        NamespaceTier::BuiltIn,
        None,
        &mut reporter,
    );
    registry.register_file(
        "Helper.cls",
        Arc::new(table_with_single_class("Helper.cls", "Helper")),
        NamespaceTier::User,
        None,
        &mut reporter,
    );

    assert!(!reporter.warnings().is_empty());
}
