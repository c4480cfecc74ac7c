//! End-to-end tests driven entirely through the public `compile`/`ParseTree`
//! contract, replaying a scripted event sequence in place of a real Apex
//! grammar (see the binder's design notes on why no concrete grammar is
//! wired into this crate).

use apex_binder::{compile, ParseTree, TreeVisitor};
use apex_common::{Location, ParserOptions};
use apex_symbols::SymbolKind;

enum Event {
    EnterClass {
        name: &'static str,
        super_class: Option<&'static str>,
        location: Location,
    },
    ExitClass,
    EnterMethod {
        name: &'static str,
        return_type: &'static str,
        location: Location,
    },
    ExitMethod,
    FormalParameter {
        name: &'static str,
        type_spelling: &'static str,
        location: Location,
    },
    EnterConstructor {
        name: &'static str,
        location: Location,
    },
    ExitConstructor,
}

struct ScriptedTree(Vec<Event>);

impl ParseTree for ScriptedTree {
    fn accept(&self, visitor: &mut dyn TreeVisitor) {
        for event in &self.0 {
            match event {
                Event::EnterClass {
                    name,
                    super_class,
                    location,
                } => visitor.enter_class_declaration(name, *super_class, &[], *location),
                Event::ExitClass => visitor.exit_class_declaration(),
                Event::EnterMethod {
                    name,
                    return_type,
                    location,
                } => visitor.enter_method_declaration(name, return_type, *location),
                Event::ExitMethod => visitor.exit_method_declaration(),
                Event::FormalParameter {
                    name,
                    type_spelling,
                    location,
                } => visitor.formal_parameter(name, type_spelling, *location),
                Event::EnterConstructor { name, location } => {
                    visitor.enter_constructor_declaration(name, *location);
                }
                Event::ExitConstructor => visitor.exit_constructor_declaration(),
            }
        }
    }
}

fn loc(line: u16) -> Location {
    Location::at(line, 0)
}

#[test]
fn zero_declarations_boundary() {
    let tree = ScriptedTree(Vec::new());
    let result = compile("", "Empty.cls", &tree, ParserOptions::default()).expect("compiles");
    assert_eq!(result.table.get_all_symbols().len(), 1);
    assert!(result.errors().is_empty());
    assert!(result.warnings().is_empty());
    assert!(!result.is_suspect());
}

#[test]
fn constructor_parent_linkage_through_compile() {
    // public class C { public C() {} }
    let tree = ScriptedTree(vec![
        Event::EnterClass {
            name: "C",
            super_class: None,
            location: loc(1),
        },
        Event::EnterConstructor {
            name: "C",
            location: loc(1),
        },
        Event::ExitConstructor,
        Event::ExitClass,
    ]);

    let result = compile(
        "public class C { public C() {} }",
        "C.cls",
        &tree,
        ParserOptions::default(),
    )
    .expect("compiles");

    assert!(result.errors().is_empty());
    let constructor = result
        .table
        .get_all_symbols()
        .iter()
        .find(|s| s.kind == SymbolKind::Constructor)
        .expect("constructor symbol");
    assert!(constructor.is_constructor());
    assert_eq!(constructor.name, "C");
}

#[test]
fn three_constructors_of_differing_arity_all_register_without_duplicates() {
    let tree = ScriptedTree(vec![
        Event::EnterClass {
            name: "N",
            super_class: None,
            location: loc(1),
        },
        Event::EnterConstructor {
            name: "N",
            location: loc(2),
        },
        Event::ExitConstructor,
        Event::EnterConstructor {
            name: "N",
            location: loc(3),
        },
        Event::FormalParameter {
            name: "a",
            type_spelling: "Integer",
            location: loc(3),
        },
        Event::ExitConstructor,
        Event::EnterConstructor {
            name: "N",
            location: loc(4),
        },
        Event::FormalParameter {
            name: "a",
            type_spelling: "Integer",
            location: loc(4),
        },
        Event::FormalParameter {
            name: "b",
            type_spelling: "Integer",
            location: loc(4),
        },
        Event::ExitConstructor,
        Event::ExitClass,
    ]);

    let result = compile("", "N.cls", &tree, ParserOptions::default()).expect("compiles");

    let constructors: Vec<_> = result
        .table
        .get_all_symbols()
        .iter()
        .filter(|s| s.kind == SymbolKind::Constructor)
        .collect();
    assert_eq!(constructors.len(), 3);
    assert!(result.errors().is_empty());
}

#[test]
fn method_overload_tolerated_exact_duplicate_rejected_through_compile() {
    // void m(Integer), void m(String), void m(Integer)
    let tree = ScriptedTree(vec![
        Event::EnterClass {
            name: "M",
            super_class: None,
            location: loc(1),
        },
        Event::EnterMethod {
            name: "m",
            return_type: "void",
            location: loc(2),
        },
        Event::FormalParameter {
            name: "a",
            type_spelling: "Integer",
            location: loc(2),
        },
        Event::ExitMethod,
        Event::EnterMethod {
            name: "m",
            return_type: "void",
            location: loc(3),
        },
        Event::FormalParameter {
            name: "a",
            type_spelling: "String",
            location: loc(3),
        },
        Event::ExitMethod,
        Event::EnterMethod {
            name: "m",
            return_type: "void",
            location: loc(4),
        },
        Event::FormalParameter {
            name: "a",
            type_spelling: "Integer",
            location: loc(4),
        },
        Event::ExitMethod,
        Event::ExitClass,
    ]);

    let result = compile("", "M.cls", &tree, ParserOptions::default()).expect("compiles");

    let methods: Vec<_> = result
        .table
        .get_all_symbols()
        .iter()
        .filter(|s| s.kind == SymbolKind::Method)
        .collect();
    assert_eq!(methods.len(), 3);
    assert_eq!(result.errors().len(), 1);
    assert_eq!(result.errors()[0].line, 4);
}

#[test]
fn oversized_file_fails_before_any_table_is_built() {
    let tree = ScriptedTree(Vec::new());
    let content = "a".repeat(apex_common::limits::MAX_FILE_CHARS + 1);
    let err = compile(&content, "Big.cls", &tree, ParserOptions::default())
        .expect_err("must reject a file over the character limit");
    assert!(format!("{err}").contains("Big.cls"));
}
