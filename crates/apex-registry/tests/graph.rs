//! `CrossReferenceGraph` tests driven entirely through the public API.

use apex_common::Location;
use apex_registry::{ChainStep, CrossReferenceGraph, ReferenceKind};

#[test]
fn add_edge_requires_both_endpoints_to_already_be_vertices() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Account", "Account.cls");

    let added = graph.add_edge(
        "Account",
        "Missing",
        ReferenceKind::TypeReference,
        Location::at(1, 0),
        "Account.cls",
    );
    assert!(!added);
    assert_eq!(graph.edge_count(), 0);
}

#[test]
fn add_edge_succeeds_once_both_vertices_exist() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Account", "Account.cls");
    graph.add_symbol("Contact", "Contact.cls");

    let added = graph.add_edge(
        "Account",
        "Contact",
        ReferenceKind::FieldAccess,
        Location::at(5, 2),
        "Account.cls",
    );
    assert!(added);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.outgoing("Account").len(), 1);
    assert_eq!(graph.incoming("Contact").len(), 1);
}

#[test]
fn deferred_edges_drain_into_real_edges_once_the_target_is_registered() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Account", "Account.cls");

    graph.add_deferred_edge(
        "Account",
        "Contact",
        ReferenceKind::TypeReference,
        Location::at(3, 0),
        "Account.cls",
    );
    assert_eq!(graph.deferred_count("Contact"), 1);
    assert_eq!(graph.edge_count(), 0);

    graph.add_symbol("Contact", "Contact.cls");

    assert_eq!(graph.deferred_count("Contact"), 0);
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.incoming("Contact").len(), 1);
}

#[test]
fn inheritance_chain_walks_outgoing_inheritance_edges_only() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Base", "Base.cls");
    graph.add_symbol("Middle", "Middle.cls");
    graph.add_symbol("Leaf", "Leaf.cls");

    graph.add_edge(
        "Leaf",
        "Middle",
        ReferenceKind::Inheritance,
        Location::dummy(),
        "Leaf.cls",
    );
    graph.add_edge(
        "Middle",
        "Base",
        ReferenceKind::Inheritance,
        Location::dummy(),
        "Middle.cls",
    );
    graph.add_edge(
        "Leaf",
        "SomeInterface",
        ReferenceKind::InterfaceImplementation,
        Location::dummy(),
        "Leaf.cls",
    );

    let chain = graph.inheritance_chain("Leaf");
    assert_eq!(
        chain,
        vec![
            ChainStep::Resolved("Leaf".to_string()),
            ChainStep::Resolved("Middle".to_string()),
            ChainStep::Resolved("Base".to_string()),
        ]
    );
}

#[test]
fn inheritance_chain_reports_a_cycle_instead_of_looping_forever() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("A", "A.cls");
    graph.add_symbol("B", "B.cls");

    graph.add_edge("A", "B", ReferenceKind::Inheritance, Location::dummy(), "A.cls");
    graph.add_edge("B", "A", ReferenceKind::Inheritance, Location::dummy(), "B.cls");

    let chain = graph.inheritance_chain("A");
    assert_eq!(
        chain,
        vec![
            ChainStep::Resolved("A".to_string()),
            ChainStep::Resolved("B".to_string()),
            ChainStep::CycleDetected("A".to_string()),
        ]
    );
}

#[test]
fn detect_cycles_finds_strongly_connected_components() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("A", "A.cls");
    graph.add_symbol("B", "B.cls");
    graph.add_symbol("C", "C.cls");

    graph.add_edge("A", "B", ReferenceKind::Inheritance, Location::dummy(), "A.cls");
    graph.add_edge("B", "C", ReferenceKind::Inheritance, Location::dummy(), "B.cls");
    graph.add_edge("C", "A", ReferenceKind::Inheritance, Location::dummy(), "C.cls");

    let cycles = graph.detect_cycles();
    assert_eq!(cycles.len(), 1);
    assert_eq!(cycles[0].len(), 3);
}

#[test]
fn detect_cycles_is_empty_for_an_acyclic_graph() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("A", "A.cls");
    graph.add_symbol("B", "B.cls");
    graph.add_edge("A", "B", ReferenceKind::Inheritance, Location::dummy(), "A.cls");

    assert!(graph.detect_cycles().is_empty());
}

#[test]
fn remove_file_reactivates_incoming_edges_as_deferred() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Account", "Account.cls");
    graph.add_symbol("Contact", "Contact.cls");
    graph.add_edge(
        "Account",
        "Contact",
        ReferenceKind::FieldAccess,
        Location::dummy(),
        "Account.cls",
    );

    graph.remove_file("Contact.cls");

    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.deferred_count("Contact"), 1);

    graph.add_symbol("Contact", "Contact.cls");
    assert_eq!(graph.edge_count(), 1);
}

#[test]
fn remove_file_only_removes_vertices_it_owns() {
    let mut graph = CrossReferenceGraph::new();
    graph.add_symbol("Account", "Account.cls");
    graph.add_symbol("Contact", "Contact.cls");

    graph.remove_file("Account.cls");

    assert_eq!(graph.vertex_count(), 1);
    assert!(graph.outgoing("Contact").is_empty());
    assert!(graph.outgoing("Account").is_empty() && graph.incoming("Account").is_empty());
}
