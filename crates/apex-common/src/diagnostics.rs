//! Diagnostics and the `ErrorReporter` sink contract.
//!
//! Every diagnostic produced by the listener or its validators is
//! `{ kind = "semantic", severity, message, line, column, filePath }` per the
//! diagnostic format in the core's external-interface contract. Diagnostics
//! never escape the file they were raised for: callers collect them into a
//! `DiagnosticSink` scoped to one compilation.

use serde::Serialize;

/// Stable identifiers for the modifier/annotation validator rules (R1-R16)
/// and the structural invariants (I2, I7) that can also surface as
/// diagnostics. Not an exhaustive enum: rule codes are looked up by string so
/// that validators stay data-driven and new rules don't require touching
/// this crate.
pub mod rules {
    pub const R1_ABSTRACT_FINAL: &str = "R1";
    pub const R2_ABSTRACT_STATIC: &str = "R2";
    pub const R3_INTERFACE_MEMBER_MODIFIER: &str = "R3";
    pub const R4_CLASS_IN_INTERFACE: &str = "R4";
    pub const R5_INTERFACE_IN_INTERFACE: &str = "R5";
    pub const R6_FIELD_IN_INTERFACE: &str = "R6";
    pub const R7_ENUM_IN_INTERFACE: &str = "R7";
    pub const R8_CONSTRUCTOR_IN_INTERFACE: &str = "R8";
    pub const R9_NESTED_INNER_CLASS: &str = "R9";
    pub const R10_INNER_CLASS_NAME_COLLISION: &str = "R10";
    pub const R11_DOTTED_CONSTRUCTOR_NAME: &str = "R11";
    pub const R12_CONSTRUCTOR_NAME_MISMATCH: &str = "R12";
    pub const R13_DUPLICATE_METHOD: &str = "R13";
    pub const R14_DUPLICATE_CONSTRUCTOR: &str = "R14";
    pub const R15_DUPLICATE_VARIABLE: &str = "R15";
    pub const R16_UNRESOLVED_OVERRIDE: &str = "R16";
    /// Internal structural error: the scope stack was inconsistent on exit.
    pub const I2_STRUCTURAL: &str = "I2";
    /// Shadowing a built-in (e.g. a user class named `System`) is a warning,
    /// never an error (see the namespace-ambiguity design note).
    pub const BUILTIN_SHADOW: &str = "SHADOW";
}

/// Diagnostic severity. The core never emits anything above `Error`: there is
/// no "fatal" diagnostic, only the `Input` error class in §7 which aborts the
/// compilation before any table (and therefore any diagnostic) is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A single semantic diagnostic, anchored at the offending token's start.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(rename = "kind")]
    pub kind: &'static str,
    pub severity: Severity,
    pub message: String,
    pub line: u16,
    pub column: u16,
    pub file_path: String,
    /// Rule code (`"R13"`, `"I2"`, ...), when the diagnostic was raised by a
    /// named validator rule rather than ad hoc listener logic.
    pub rule: Option<&'static str>,
}

impl Diagnostic {
    #[must_use]
    pub fn error(
        file_path: impl Into<String>,
        line: u16,
        column: u16,
        message: impl Into<String>,
        rule: Option<&'static str>,
    ) -> Self {
        Self {
            kind: "semantic",
            severity: Severity::Error,
            message: message.into(),
            line,
            column,
            file_path: file_path.into(),
            rule,
        }
    }

    #[must_use]
    pub fn warning(
        file_path: impl Into<String>,
        line: u16,
        column: u16,
        message: impl Into<String>,
        rule: Option<&'static str>,
    ) -> Self {
        Self {
            kind: "semantic",
            severity: Severity::Warning,
            message: message.into(),
            line,
            column,
            file_path: file_path.into(),
            rule,
        }
    }
}

/// The sink every listener and validator reports into. Implemented as a
/// trait so that a host (e.g. an LSP diagnostics stream) can supply its own
/// sink; the listener only depends on this contract, never a concrete type.
pub trait ErrorReporter {
    fn add_error(&mut self, message: &str, line: u16, column: u16, file_path: &str);
    fn add_warning(&mut self, message: &str, line: u16, column: u16, file_path: &str);

    /// Convenience for validators that know their rule code.
    fn add_rule_error(
        &mut self,
        rule: &'static str,
        message: &str,
        line: u16,
        column: u16,
        file_path: &str,
    ) {
        let _ = rule;
        self.add_error(message, line, column, file_path);
    }

    /// Convenience for validators that know their rule code.
    fn add_rule_warning(
        &mut self,
        rule: &'static str,
        message: &str,
        line: u16,
        column: u16,
        file_path: &str,
    ) {
        let _ = rule;
        self.add_warning(message, line, column, file_path);
    }
}

/// The default `ErrorReporter`: an in-memory collector scoped to one
/// compilation. `compile()` hands one of these to the listener and returns
/// its contents split into `errors`/`warnings`.
#[derive(Debug, Default, Clone)]
pub struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    #[must_use]
    pub fn errors(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .collect()
    }

    #[must_use]
    pub fn warnings(&self) -> Vec<&Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .collect()
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }
}

impl ErrorReporter for DiagnosticSink {
    fn add_error(&mut self, message: &str, line: u16, column: u16, file_path: &str) {
        self.diagnostics
            .push(Diagnostic::error(file_path, line, column, message, None));
    }

    fn add_warning(&mut self, message: &str, line: u16, column: u16, file_path: &str) {
        self.diagnostics
            .push(Diagnostic::warning(file_path, line, column, message, None));
    }

    fn add_rule_error(
        &mut self,
        rule: &'static str,
        message: &str,
        line: u16,
        column: u16,
        file_path: &str,
    ) {
        self.diagnostics.push(Diagnostic::error(
            file_path,
            line,
            column,
            message,
            Some(rule),
        ));
    }

    fn add_rule_warning(
        &mut self,
        rule: &'static str,
        message: &str,
        line: u16,
        column: u16,
        file_path: &str,
    ) {
        self.diagnostics.push(Diagnostic::warning(
            file_path,
            line,
            column,
            message,
            Some(rule),
        ));
    }
}

#[cfg(test)]
#[path = "../tests/diagnostics.rs"]
mod tests;
