//! `compile`/`compile_multiple_with_configs` (§6 "Exposed"): the two facade
//! entry points a host calls without reaching into `apex-binder` directly.

use apex_binder::compile::CompileError;
use apex_binder::tree::ParseTree;
use apex_binder::{compile_with_logger, CompilationResult};
use apex_common::logger::TracingLogger;
use apex_common::ParserOptions;

/// One file's compilation inputs, grouped so a host can hand a batch to
/// [`compile_multiple_with_configs`]. `tree` must be `Sync` so the parallel
/// path can share it across rayon's worker threads.
pub struct CompileConfig<'a> {
    pub content: &'a str,
    pub file_path: &'a str,
    pub tree: &'a (dyn ParseTree + Sync),
    pub options: ParserOptions,
}

/// Runs one listener pass over an already-parsed tree, logging through
/// `tracing` rather than the silent default `compile_with_logger` uses.
#[tracing::instrument(level = "debug", skip(content, tree), fields(file_path))]
pub fn compile(
    content: &str,
    file_path: &str,
    tree: &dyn ParseTree,
    options: ParserOptions,
) -> Result<CompilationResult, CompileError> {
    compile_with_logger(content, file_path, tree, options, &TracingLogger)
}

/// `compileMultipleWithConfigs` (§6): compiles every config independently
/// and returns results in input order regardless of whether `parallel`
/// dispatches them across rayon's thread pool — a single file's structural
/// error never prevents the others in the batch from compiling.
pub fn compile_multiple_with_configs(
    configs: &[CompileConfig<'_>],
    parallel: bool,
) -> Vec<Result<CompilationResult, CompileError>> {
    let _span = tracing::info_span!("compile_multiple_with_configs", count = configs.len(), parallel).entered();

    if parallel {
        use rayon::prelude::*;
        configs
            .par_iter()
            .map(|config| compile(config.content, config.file_path, config.tree, config.options))
            .collect()
    } else {
        configs
            .iter()
            .map(|config| compile(config.content, config.file_path, config.tree, config.options))
            .collect()
    }
}
