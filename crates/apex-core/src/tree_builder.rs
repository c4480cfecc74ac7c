//! The seam for the concrete Apex grammar/parse-tree producer (§1 Out of
//! scope, §6 Consumed). This crate never parses Apex source; a host supplies
//! a [`ParseTreeBuilder`] that turns file content into a [`ParseTree`] for
//! [`ApexListener`](apex_binder::ApexListener) to walk.

use std::sync::Arc;

use apex_binder::tree::ParseTree;

/// Builds a [`ParseTree`] from one file's content. Implemented by whatever
/// grammar/parser a host embeds; `apex-core` only ever calls through this
/// trait.
pub trait ParseTreeBuilder: Sync {
    fn build(&self, file_path: &str, content: &str) -> Box<dyn ParseTree>;
}

impl<F> ParseTreeBuilder for F
where
    F: Fn(&str, &str) -> Box<dyn ParseTree> + Sync,
{
    fn build(&self, file_path: &str, content: &str) -> Box<dyn ParseTree> {
        self(file_path, content)
    }
}

/// Shared-ownership handle to a [`ParseTreeBuilder`], used wherever a
/// `'static` bound is needed (e.g. wiring a [`ListenerCompilerService`] into
/// a [`apex_registry::resolver::LazyResolver`]).
///
/// [`ListenerCompilerService`]: crate::compiler_service::ListenerCompilerService
pub type SharedParseTreeBuilder = Arc<dyn ParseTreeBuilder>;
