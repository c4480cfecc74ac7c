//! `compile`: wires a parse tree and `ParserOptions` into one
//! [`ApexListener`] pass and returns its result.
//!
//! This is the only *Input*-class (§7) fallible operation in this crate —
//! a file over the size ceiling is fatal to this compilation only and
//! never produces a table. Everything else the listener observes while
//! walking (semantic R1-R16, structural I2) is recorded as a diagnostic on
//! the successful [`CompilationResult`] instead of an `Err`.

use thiserror::Error;

use apex_common::limits::MAX_FILE_CHARS;
use apex_common::{Diagnostic, DiagnosticSink, Logger, NoopLogger, ParserOptions};
use apex_symbols::SymbolTable;

use crate::listener::ApexListener;
use crate::tree::ParseTree;

/// The *Input* error class (§7): fatal to this compilation only, no table
/// produced.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error(
        "file {file_path} is {char_count} characters, exceeding the {MAX_FILE_CHARS}-character limit"
    )]
    FileTooLarge { file_path: String, char_count: usize },
}

/// The outcome of one successful `compile()` call.
#[derive(Debug)]
pub struct CompilationResult {
    pub table: SymbolTable,
    diagnostics: DiagnosticSink,
    suspect: bool,
}

impl CompilationResult {
    #[must_use]
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics.errors()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics.warnings()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &DiagnosticSink {
        &self.diagnostics
    }

    /// True once a structural (I2) inconsistency was recorded during the
    /// walk. A host may choose to withhold a suspect file's symbols from
    /// registry promotion rather than have the core dictate that policy.
    #[must_use]
    pub fn is_suspect(&self) -> bool {
        self.suspect
    }
}

/// Run one listener pass over `tree`, producing a `SymbolTable` plus
/// diagnostics for `file_path`. `content` is consulted only for the §7
/// *Input* file-size check — `tree` has already been parsed from it by an
/// external collaborator.
pub fn compile(
    content: &str,
    file_path: &str,
    tree: &dyn ParseTree,
    options: ParserOptions,
) -> Result<CompilationResult, CompileError> {
    compile_with_logger(content, file_path, tree, options, &NoopLogger)
}

/// Like [`compile`], but with an explicit [`Logger`] instead of the default
/// no-op — used by a host (e.g. `apex-core`) that wants this pass
/// instrumented.
pub fn compile_with_logger(
    content: &str,
    file_path: &str,
    tree: &dyn ParseTree,
    options: ParserOptions,
    logger: &dyn Logger,
) -> Result<CompilationResult, CompileError> {
    let char_count = content.chars().count();
    if char_count > MAX_FILE_CHARS {
        return Err(CompileError::FileTooLarge {
            file_path: file_path.to_string(),
            char_count,
        });
    }

    let mut listener = ApexListener::new(file_path, options, logger);
    tree.accept(&mut listener);
    let (table, diagnostics, suspect) = listener.into_parts();

    Ok(CompilationResult {
        table,
        diagnostics,
        suspect,
    })
}

#[cfg(test)]
#[path = "../tests/compile.rs"]
mod tests;
