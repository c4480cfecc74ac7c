//! Facade for the Apex semantic analysis core (§6 "Exposed"). A host embeds
//! this one crate: it wires `apex-binder`'s per-file listener and
//! `apex-registry`'s cross-file federation behind `compile` and
//! `compile_multiple_with_configs`, and supplies the concrete
//! `FileLocator`/`CompilerService` the lazy resolver needs but cannot
//! provide itself, since both ultimately depend on an external Apex parser
//! (§1 Out of scope) this workspace never implements.

pub mod compile;
pub mod compiler_service;
pub mod file_locator;
pub mod tree_builder;

pub use apex_binder::compile::CompileError;
pub use apex_binder::{CompilationResult, ParseTree, TreeVisitor};
pub use apex_registry::{
    symbol_fqn, AmbiguousEntry, Candidate, ChainStep, ClientRequestEvent, CompileServiceError, CompilerService,
    CrossReferenceGraph, EdgeData, FileLocator, GlobalSymbolRegistry, LazyResolver, NamespaceTier, PendingEdge,
    ReferenceKind, ResolveContext, UsagePattern,
};

pub use compile::{compile, compile_multiple_with_configs, CompileConfig};
pub use compiler_service::ListenerCompilerService;
pub use file_locator::{DefaultFileLocator, FileExistenceCheck};
pub use tree_builder::{ParseTreeBuilder, SharedParseTreeBuilder};
