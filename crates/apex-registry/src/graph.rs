//! Cross-Reference Graph (§4.8): a directed multigraph over symbol fqns,
//! tagged edges, and a `deferredByFqn` side table for edges whose target
//! isn't registered yet.
//!
//! Vertices are keyed by fqn rather than by `SymbolId`, since `SymbolId` is
//! only unique within one file's table (§4.2) and this graph is explicitly
//! cross-file. `registerFile` on the registry and `addSymbol` here are
//! deliberately separate operations (see `apex-registry::resolver`, which is
//! what actually keeps them in lockstep for a caller); this module only
//! guarantees that *once a vertex for `fqn` exists*, draining its deferred
//! edges (I7) happens atomically with that vertex's creation.

use std::sync::Arc;

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use apex_common::Location;

/// The tag on one cross-reference edge (§3).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    MethodCall,
    FieldAccess,
    TypeReference,
    Inheritance,
    InterfaceImplementation,
    VariableDeclaration,
    ParameterType,
    ReturnType,
    Override,
    ChainedType,
}

impl ReferenceKind {
    /// Inheritance and InterfaceImplementation edges logically compose the
    /// *inheritance graph*; everything else is the *dependency graph* (§3).
    #[must_use]
    pub const fn is_inheritance_edge(self) -> bool {
        matches!(self, Self::Inheritance | Self::InterfaceImplementation)
    }
}

/// Payload carried by one concrete edge.
#[derive(Clone, Debug)]
pub struct EdgeData {
    pub kind: ReferenceKind,
    pub location: Location,
    pub source_file: Arc<str>,
    pub target_file: Option<Arc<str>>,
}

/// An edge whose target fqn wasn't registered at the time it was observed,
/// held by target fqn until that symbol is registered (I7).
#[derive(Clone, Debug)]
pub struct PendingEdge {
    pub source_fqn: String,
    pub kind: ReferenceKind,
    pub location: Location,
    pub source_file: Arc<str>,
}

/// One step of an inheritance-chain walk; see [`CrossReferenceGraph::inheritance_chain`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChainStep {
    /// `fqn` is resolved and has no further (or an unresolved) superclass.
    Resolved(String),
    /// Walking further would revisit an fqn already on the chain — stop
    /// instead of looping forever (the cycle-safety supplement to §4.8).
    CycleDetected(String),
}

/// Directed multigraph over symbol fqns (§4.8).
pub struct CrossReferenceGraph {
    graph: StableDiGraph<String, EdgeData>,
    index_by_fqn: FxHashMap<String, NodeIndex>,
    file_by_fqn: FxHashMap<String, Arc<str>>,
    fqns_by_file: FxHashMap<Arc<str>, FxHashSet<String>>,
    deferred_by_fqn: FxHashMap<String, Vec<PendingEdge>>,
}

impl Default for CrossReferenceGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl CrossReferenceGraph {
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: StableDiGraph::new(),
            index_by_fqn: FxHashMap::default(),
            file_by_fqn: FxHashMap::default(),
            fqns_by_file: FxHashMap::default(),
            deferred_by_fqn: FxHashMap::default(),
        }
    }

    fn index_of(&self, fqn: &str) -> Option<NodeIndex> {
        self.index_by_fqn.get(fqn).copied()
    }

    /// `addSymbol(sym)`: create a vertex for `fqn` if absent, owned by
    /// `file_path`, and drain `deferredByFqn[fqn]` into concrete edges
    /// atomically (I7) — no caller observes the vertex registered without
    /// its incident deferred edges also converted.
    pub fn add_symbol(&mut self, fqn: &str, file_path: &str) -> NodeIndex {
        let file_path: Arc<str> = Arc::from(file_path);
        let index = *self
            .index_by_fqn
            .entry(fqn.to_string())
            .or_insert_with(|| self.graph.add_node(fqn.to_string()));
        self.file_by_fqn.insert(fqn.to_string(), Arc::clone(&file_path));
        self.fqns_by_file
            .entry(file_path)
            .or_default()
            .insert(fqn.to_string());

        if let Some(pending) = self.deferred_by_fqn.remove(fqn) {
            for edge in pending {
                if let Some(src) = self.index_of(&edge.source_fqn) {
                    self.graph.add_edge(
                        src,
                        index,
                        EdgeData {
                            kind: edge.kind,
                            location: edge.location,
                            source_file: edge.source_file,
                            target_file: self.file_by_fqn.get(fqn).cloned(),
                        },
                    );
                }
            }
        }

        index
    }

    /// `addEdge(src, target, kind, location)`: both endpoints must already
    /// have vertices (via `add_symbol`); an edge to an unregistered target
    /// belongs in `add_deferred_edge` instead.
    pub fn add_edge(
        &mut self,
        source_fqn: &str,
        target_fqn: &str,
        kind: ReferenceKind,
        location: Location,
        source_file: impl Into<Arc<str>>,
    ) -> bool {
        let (Some(src), Some(dst)) = (self.index_of(source_fqn), self.index_of(target_fqn)) else {
            return false;
        };
        let source_file = source_file.into();
        let target_file = self.file_by_fqn.get(target_fqn).cloned();
        self.graph.add_edge(
            src,
            dst,
            EdgeData {
                kind,
                location,
                source_file,
                target_file,
            },
        );
        true
    }

    /// `addDeferredEdge(srcId, targetFqn, kind, location)`: `target_fqn` is
    /// not yet a vertex. Held until a matching `add_symbol(target_fqn, _)`
    /// drains it.
    pub fn add_deferred_edge(
        &mut self,
        source_fqn: &str,
        target_fqn: &str,
        kind: ReferenceKind,
        location: Location,
        source_file: impl Into<Arc<str>>,
    ) {
        self.deferred_by_fqn
            .entry(target_fqn.to_string())
            .or_default()
            .push(PendingEdge {
                source_fqn: source_fqn.to_string(),
                kind,
                location,
                source_file: source_file.into(),
            });
    }

    #[must_use]
    pub fn deferred_count(&self, target_fqn: &str) -> usize {
        self.deferred_by_fqn.get(target_fqn).map_or(0, Vec::len)
    }

    /// `incoming(sym)`: edges pointing at `fqn`, as `(source_fqn, edge)`.
    #[must_use]
    pub fn incoming(&self, fqn: &str) -> Vec<(String, &EdgeData)> {
        let Some(index) = self.index_of(fqn) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(index, petgraph::Direction::Incoming)
            .map(|e| (self.graph[e.source()].clone(), e.weight()))
            .collect()
    }

    /// `outgoing(sym)`: edges leaving `fqn`, as `(target_fqn, edge)`.
    #[must_use]
    pub fn outgoing(&self, fqn: &str) -> Vec<(String, &EdgeData)> {
        let Some(index) = self.index_of(fqn) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(index, petgraph::Direction::Outgoing)
            .map(|e| (self.graph[e.target()].clone(), e.weight()))
            .collect()
    }

    /// `inheritanceChain(typeSym)`: walk outgoing `Inheritance` edges only
    /// (single inheritance — at most one per vertex per I3-adjacent
    /// discipline the binder enforces upstream). Stops at the first
    /// unresolved/absent parent, or reports a cycle instead of looping.
    #[must_use]
    pub fn inheritance_chain(&self, fqn: &str) -> Vec<ChainStep> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = fqn.to_string();

        loop {
            if !seen.insert(current.clone()) {
                chain.push(ChainStep::CycleDetected(current));
                break;
            }
            chain.push(ChainStep::Resolved(current.clone()));

            let Some(index) = self.index_of(&current) else {
                break;
            };
            let next = self
                .graph
                .edges_directed(index, petgraph::Direction::Outgoing)
                .find(|e| e.weight().kind == ReferenceKind::Inheritance)
                .map(|e| self.graph[e.target()].clone());

            match next {
                Some(parent) => current = parent,
                None => break,
            }
        }

        chain
    }

    /// `detectCycles()`: every strongly-connected component of size greater
    /// than one, plus any single-vertex self-loop, each as an ordered list
    /// of fqns.
    #[must_use]
    pub fn detect_cycles(&self) -> Vec<Vec<String>> {
        petgraph::algo::tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1
                    || component
                        .first()
                        .is_some_and(|&n| self.graph.contains_edge(n, n))
            })
            .map(|component| component.into_iter().map(|n| self.graph[n].clone()).collect())
            .collect()
    }

    /// When a file is unregistered: removes every vertex it owns (and, with
    /// it, every edge incident to those vertices), and re-activates any
    /// deferred edge whose source survives but whose target was one of the
    /// removed vertices — moving those edges back to `deferredByFqn` rather
    /// than dropping them silently (§4.8).
    pub fn remove_file(&mut self, file_path: &str) {
        let Some(fqns) = self.fqns_by_file.remove(file_path) else {
            return;
        };

        for fqn in &fqns {
            let Some(index) = self.index_by_fqn.remove(fqn) else {
                continue;
            };

            let reactivated: Vec<PendingEdge> = self
                .graph
                .edges_directed(index, petgraph::Direction::Incoming)
                .map(|e| PendingEdge {
                    source_fqn: self.graph[e.source()].clone(),
                    kind: e.weight().kind,
                    location: e.weight().location,
                    source_file: Arc::clone(&e.weight().source_file),
                })
                .collect();

            self.graph.remove_node(index);
            self.file_by_fqn.remove(fqn);

            if !reactivated.is_empty() {
                self.deferred_by_fqn
                    .entry(fqn.clone())
                    .or_default()
                    .extend(reactivated);
            }
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.graph.node_count()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

