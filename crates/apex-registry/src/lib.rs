//! Cross-file symbol federation for the Apex semantic analysis core: the
//! global symbol registry (§4.7), the cross-reference graph (§4.8), and the
//! lazy resolver (§4.9) that ties both to an external `DocumentStore` and
//! `CompilerService`.
//!
//! This crate has no dependency on `apex-binder`'s concrete listener type —
//! `resolver::CompilerService` is the seam that keeps the two halves of the
//! pipeline (per-file binding, cross-file resolution) independently
//! testable and independently embeddable.

pub mod fqn;
pub mod graph;
pub mod registry;
pub mod resolver;

pub use fqn::fqn as symbol_fqn;
pub use graph::{ChainStep, CrossReferenceGraph, EdgeData, PendingEdge, ReferenceKind};
pub use registry::{AmbiguousEntry, Candidate, GlobalSymbolRegistry, NamespaceTier, ResolveContext, UsagePattern};
pub use resolver::{ClientRequestEvent, CompileServiceError, CompilerService, FileLocator, LazyResolver};
