//! Lazy Resolver (§4.9): the public entry point a language-server feature
//! calls. Orchestrates registry lookup, fqn→file mapping via `FileLocator`,
//! on-demand compilation via `CompilerService`, and keeps the registry and
//! the cross-reference graph's deferred edges (I7) in lockstep, since those
//! are two separate data structures this crate owns but the spec treats as
//! one consistent federation.

use std::sync::Arc;

use thiserror::Error;

use apex_common::diagnostics::rules;
use apex_common::logger::LogLevel;
use apex_common::{
    DocumentStore, ErrorReporter, Location, Logger, NamespaceStrategy, NoopLogger, ResolverOptions, TypeDescriptor,
};
use apex_symbols::{ReferenceContext, Symbol, SymbolId, SymbolTable};

use crate::fqn::fqn;
use crate::graph::{CrossReferenceGraph, ReferenceKind};
use crate::registry::{GlobalSymbolRegistry, NamespaceTier, ResolveContext};

/// Raised by a [`CompilerService`] when it cannot turn source text into a
/// `SymbolTable` — an *Input*-class failure (§7), never a semantic one.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileServiceError {
    #[error("compiler service failed to compile {file_path}: {message}")]
    Failed { file_path: String, message: String },
}

/// Maps a simple or qualified name to a candidate source file (§4.9 step 3),
/// named by spec.md but left abstract. `apex-core::DefaultFileLocator`
/// supplies the concrete `<name>.cls`/`<name>.trigger` convention; a host
/// embedded in a real workspace supplies its own (e.g. consulting a project
/// index) by implementing this trait directly.
pub trait FileLocator {
    fn locate(&self, name_or_fqn: &str) -> Option<String>;
}

/// Wraps "parse this file's bytes and run the listener" (§4.9 step 4) behind
/// a trait so this crate never depends on `apex-binder`'s concrete listener
/// type. `apex-core::ListenerCompilerService` is the implementation that
/// actually wires `apex_binder::compile` in.
pub trait CompilerService {
    fn compile(&self, file_path: &str, content: &str) -> Result<SymbolTable, CompileServiceError>;
}

/// Emitted when the resolver cannot locate or load a file for a missing
/// name, so a host can intercept it and fetch the file asynchronously (§4.9
/// step 5) — the "optional client-request event" the spec names without
/// detailing its shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientRequestEvent {
    pub name: String,
    pub candidate_path: Option<String>,
}

/// Orchestrates the [`GlobalSymbolRegistry`] and [`CrossReferenceGraph`]
/// behind one `resolve` entry point, lazily pulling in files through a
/// [`DocumentStore`]/[`FileLocator`]/[`CompilerService`] triple when a name
/// isn't registered yet.
pub struct LazyResolver<'a> {
    registry: GlobalSymbolRegistry,
    graph: CrossReferenceGraph,
    document_store: Box<dyn DocumentStore>,
    file_locator: Box<dyn FileLocator>,
    compiler_service: Box<dyn CompilerService>,
    options: ResolverOptions,
    logger: &'a dyn Logger,
    pending_client_requests: Vec<ClientRequestEvent>,
}

impl<'a> LazyResolver<'a> {
    #[must_use]
    pub fn new(
        registry: GlobalSymbolRegistry,
        graph: CrossReferenceGraph,
        document_store: Box<dyn DocumentStore>,
        file_locator: Box<dyn FileLocator>,
        compiler_service: Box<dyn CompilerService>,
        options: ResolverOptions,
        logger: &'a dyn Logger,
    ) -> Self {
        Self {
            registry,
            graph,
            document_store,
            file_locator,
            compiler_service,
            options,
            logger,
            pending_client_requests: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_noop_logger(
        registry: GlobalSymbolRegistry,
        graph: CrossReferenceGraph,
        document_store: Box<dyn DocumentStore>,
        file_locator: Box<dyn FileLocator>,
        compiler_service: Box<dyn CompilerService>,
        options: ResolverOptions,
    ) -> Self {
        Self::new(
            registry,
            graph,
            document_store,
            file_locator,
            compiler_service,
            options,
            &NoopLogger,
        )
    }

    #[must_use]
    pub fn registry(&self) -> &GlobalSymbolRegistry {
        &self.registry
    }

    #[must_use]
    pub fn registry_mut(&mut self) -> &mut GlobalSymbolRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn graph(&self) -> &CrossReferenceGraph {
        &self.graph
    }

    #[must_use]
    pub fn graph_mut(&mut self) -> &mut CrossReferenceGraph {
        &mut self.graph
    }

    /// Drains and returns every `ClientRequestEvent` queued since the last
    /// call — a host polls this after a `resolve()` returns `None` to decide
    /// whether to fetch the file and retry.
    pub fn take_client_requests(&mut self) -> Vec<ClientRequestEvent> {
        std::mem::take(&mut self.pending_client_requests)
    }

    /// Registers `table` for `path` into both the registry and the graph in
    /// one step, so I7 (deferred-edge draining) and I6 (file↔name maps)
    /// never observe one structure updated without the other. Returns the
    /// file paths evicted by the registry's `maxFiles` policy, each of which
    /// is also removed from the graph here.
    pub fn register(
        &mut self,
        path: &str,
        table: SymbolTable,
        tier: NamespaceTier,
        namespace: Option<String>,
        reporter: &mut impl ErrorReporter,
    ) -> Vec<Arc<str>> {
        let table = Arc::new(table);
        for symbol in table.get_all_symbols() {
            if symbol.kind.is_type_like() || symbol.kind.is_callable() {
                self.graph.add_symbol(&fqn(symbol), path);
            }
        }

        for symbol in table.get_all_symbols() {
            let Some((super_class, interfaces, _)) = symbol.detail.as_type_like() else {
                continue;
            };
            let source_fqn = fqn(symbol);
            if let Some(super_class) = super_class {
                self.link(&source_fqn, &super_class.name, ReferenceKind::Inheritance, symbol.location, path);
            }
            for interface in interfaces {
                self.link(
                    &source_fqn,
                    &interface.name,
                    ReferenceKind::InterfaceImplementation,
                    symbol.location,
                    path,
                );
            }
        }

        for reference in table.get_all_references() {
            let Some(enclosing) = table.get(reference.enclosing_symbol_id) else {
                continue;
            };
            // Only a Method/Constructor is ever a graph vertex (see the loop
            // above); a file-scope reference has no source vertex to hang an
            // edge off of.
            if !enclosing.kind.is_callable() {
                continue;
            }
            let Some(kind) = dependency_edge_kind(reference.context) else {
                continue;
            };
            self.link(&fqn(enclosing), &reference.name, kind, reference.location, path);
        }

        let evicted = self.registry.register_file(path, table, tier, namespace, reporter);
        for evicted_path in &evicted {
            self.graph.remove_file(evicted_path);
        }
        evicted
    }

    /// `addEdge` if `target_fqn` is already a vertex, else `addDeferredEdge`
    /// (I7) — the graph itself never decides this, so every ingestion path
    /// that observes a target by fqn funnels through here.
    fn link(&mut self, source_fqn: &str, target_fqn: &str, kind: ReferenceKind, location: Location, source_file: &str) {
        if !self.graph.add_edge(source_fqn, target_fqn, kind, location, source_file) {
            self.graph.add_deferred_edge(source_fqn, target_fqn, kind, location, source_file);
        }
    }

    /// `unregister(path)`: removes `path` from both the registry and the
    /// graph (I8), so a removed file's incoming edges correctly re-activate
    /// as deferred rather than dangling on a half-removed structure.
    pub fn unregister(&mut self, path: &str) {
        self.registry.unregister(path);
        self.graph.remove_file(path);
    }

    /// The public `resolve(name, context) -> Symbol?` entry point (§4.9).
    ///
    /// 1. Query the registry (unambiguous, then ambiguous-with-scoring).
    /// 2. On a miss, map `name` to a candidate file via the `FileLocator`.
    /// 3. Read that file's bytes from the `DocumentStore`.
    /// 4. If present, compile and register it, then retry step 1.
    /// 5. If not present, queue a `ClientRequestEvent` and return `None`.
    pub fn resolve(
        &mut self,
        name: &str,
        context: &ResolveContext,
        reporter: &mut impl ErrorReporter,
    ) -> Option<Symbol> {
        if let Some(symbol) = self.resolve_registered(name, context) {
            return Some(symbol);
        }

        self.logger
            .log_lazy(LogLevel::Debug, || format!("lazy-resolving `{name}`"));

        let Some(path) = self.file_locator.locate(name) else {
            self.pending_client_requests.push(ClientRequestEvent {
                name: name.to_string(),
                candidate_path: None,
            });
            return None;
        };

        let Some(content) = self.document_store.read(&path) else {
            self.pending_client_requests.push(ClientRequestEvent {
                name: name.to_string(),
                candidate_path: Some(path),
            });
            return None;
        };

        match self.compiler_service.compile(&path, &content) {
            Ok(table) => {
                self.register(&path, table, NamespaceTier::User, None, reporter);
                self.resolve_registered(name, context)
            }
            Err(err) => {
                self.logger
                    .log_lazy(LogLevel::Warn, || format!("{err}"));
                None
            }
        }
    }

    /// Step 1 of `resolve`, applying `ResolverOptions::namespace_strategy`
    /// before handing off to the registry's own unambiguous/ambiguous
    /// lookup.
    fn resolve_registered(&mut self, name: &str, context: &ResolveContext) -> Option<Symbol> {
        match self.options.namespace_strategy {
            NamespaceStrategy::ExplicitOnly if context.expected_namespace.is_none() => {
                self.registry.resolve_by_fqn(name).cloned()
            }
            NamespaceStrategy::UserDisambiguation if !self.registry.candidates(name).is_empty() => {
                // Defer to the caller: surface candidates instead of picking one.
                None
            }
            _ => self.registry.resolve_by_name(name, context).cloned(),
        }
    }

    /// Tier-2 (cross-file, asynchronous) duplicate revalidation (§4.9):
    /// re-runs R13/R14-style comparison using each parameter's *resolved*
    /// `TypeDescriptor::name` instead of tier-1's conservative
    /// `originalTypeString` comparison, catching differently-spelled
    /// same-type overloads (`String` vs `System.String`) tier-1
    /// deliberately leaves alone. Only promotes warnings tier-1 could not
    /// already have raised (different spelling, same resolved name); never
    /// downgrades a tier-1 finding.
    pub fn tier2_revalidate_duplicates(&self, path: &str, reporter: &mut impl ErrorReporter) {
        let Some(table) = self.registry.table_for(path) else {
            return;
        };

        let mut groups: std::collections::HashMap<(SymbolId, String), Vec<&Symbol>> =
            std::collections::HashMap::new();
        for symbol in table.get_all_symbols() {
            if !symbol.kind.is_callable() {
                continue;
            }
            if let Some(parent_id) = symbol.parent_id {
                groups
                    .entry((parent_id, symbol.name.to_lowercase()))
                    .or_default()
                    .push(symbol);
            }
        }

        for symbols in groups.into_values() {
            for i in 0..symbols.len() {
                for j in (i + 1)..symbols.len() {
                    let (a, b) = (symbols[i], symbols[j]);
                    let Some(a_params) = param_types(table, a) else { continue };
                    let Some(b_params) = param_types(table, b) else { continue };

                    let tier1_already_flagged = params_equal_by(&a_params, &b_params, |t| &t.original_type_string);
                    if tier1_already_flagged {
                        continue;
                    }
                    if params_equal_by(&a_params, &b_params, |t| &t.name) {
                        reporter.add_rule_warning(
                            rules::R13_DUPLICATE_METHOD,
                            &format!(
                                "duplicate `{}`: parameters resolve to the same types across differently-spelled overloads",
                                a.name
                            ),
                            b.location.start_line(),
                            b.location.start_column(),
                            path,
                        );
                    }
                }
            }
        }
    }
}

fn param_types(table: &SymbolTable, callable: &Symbol) -> Option<Vec<TypeDescriptor>> {
    let (_, parameters, _) = callable.detail.as_callable()?;
    Some(
        parameters
            .iter()
            .filter_map(|id| table.get(*id))
            .filter_map(|s| s.detail.as_typed().cloned())
            .collect(),
    )
}

fn params_equal_by(a: &[TypeDescriptor], b: &[TypeDescriptor], key: impl Fn(&TypeDescriptor) -> &String) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| key(x).eq_ignore_ascii_case(key(y)))
}

/// Maps a reference's syntactic context to the dependency-graph edge kind it
/// contributes (§3). `VariableUsage` names an already-declared local, not a
/// new type dependency, so it contributes no edge.
fn dependency_edge_kind(context: ReferenceContext) -> Option<ReferenceKind> {
    match context {
        ReferenceContext::MethodCall => Some(ReferenceKind::MethodCall),
        ReferenceContext::FieldAccess | ReferenceContext::StaticMemberAccess => Some(ReferenceKind::FieldAccess),
        ReferenceContext::TypeReference | ReferenceContext::ConstructorCall => Some(ReferenceKind::TypeReference),
        ReferenceContext::ChainedType => Some(ReferenceKind::ChainedType),
        ReferenceContext::VariableUsage => None,
    }
}

