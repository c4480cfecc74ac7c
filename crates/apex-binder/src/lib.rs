//! Parse-tree listener, modifier/annotation validators, and the integrated
//! reference collector for the Apex semantic analysis core.
//!
//! This crate has no dependency on a concrete Apex grammar: the listener is
//! driven by anything implementing [`tree::ParseTree`], which walks its own
//! internal representation and calls back into a [`tree::TreeVisitor`] (the
//! [`listener::ApexListener`] here) using the enter/exit contract described
//! in the binder's design notes. A host embedding a real ANTLR-generated
//! Apex parser implements `ParseTree` once; this crate never needs to know
//! what a token or a parse-tree node actually looks like.

pub mod compile;
pub mod listener;
pub mod tree;
pub mod validators;

pub use compile::{compile, CompilationResult};
pub use listener::ApexListener;
pub use tree::{ParseTree, TreeVisitor};
