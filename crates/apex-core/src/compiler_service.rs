//! `ListenerCompilerService` (§4.9 step 4): the concrete `CompilerService`
//! the lazy resolver invokes, wiring `apex_binder::compile` behind the
//! trait `apex-registry` defines so it never depends on the binder directly.

use apex_common::ParserOptions;
use apex_registry::{CompileServiceError, CompilerService};
use apex_symbols::SymbolTable;

use crate::tree_builder::SharedParseTreeBuilder;

/// Parses `content` via the shared [`ParseTreeBuilder`](crate::tree_builder::ParseTreeBuilder)
/// and runs one [`ApexListener`](apex_binder::ApexListener) pass over it.
pub struct ListenerCompilerService {
    tree_builder: SharedParseTreeBuilder,
    options: ParserOptions,
}

impl ListenerCompilerService {
    #[must_use]
    pub fn new(tree_builder: SharedParseTreeBuilder, options: ParserOptions) -> Self {
        Self { tree_builder, options }
    }
}

impl CompilerService for ListenerCompilerService {
    fn compile(&self, file_path: &str, content: &str) -> Result<SymbolTable, CompileServiceError> {
        let tree = self.tree_builder.build(file_path, content);
        apex_binder::compile(content, file_path, tree.as_ref(), self.options)
            .map(|result| result.table)
            .map_err(|err| CompileServiceError::Failed {
                file_path: file_path.to_string(),
                message: err.to_string(),
            })
    }
}
