//! Common types and utilities for the Apex semantic analysis core.
//!
//! This crate provides foundational types shared by the binder and the
//! cross-file resolution layer, with no dependency on a concrete parser:
//! - Source locations (`Location`, packed line/column pairs)
//! - Byte spans for slicing raw source text (`Span`)
//! - The type descriptor model (`TypeDescriptor`, `Namespace`)
//! - Diagnostics and the `ErrorReporter` sink contract
//! - The `Logger` and `DocumentStore` external collaborator contracts
//! - Compiler configuration (`ParserOptions`, `RegistryOptions`, `ResolverOptions`)

pub mod config;
pub mod diagnostics;
pub mod document_store;
pub mod limits;
pub mod location;
pub mod logger;
pub mod namespace;
pub mod span;
pub mod type_descriptor;

pub use config::{NamespaceStrategy, ParserOptions, RegistryOptions, ResolverOptions};
pub use diagnostics::{Diagnostic, DiagnosticSink, ErrorReporter, Severity};
pub use document_store::DocumentStore;
pub use location::Location;
pub use logger::{Logger, NoopLogger};
pub use namespace::Namespace;
pub use span::{ByteSpan, Span, SpanBuilder, Spanned};
pub use type_descriptor::TypeDescriptor;
