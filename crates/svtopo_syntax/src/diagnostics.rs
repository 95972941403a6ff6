//! Diagnostics for tolerant scanning.
//!
//! Diagnostics are a side channel: scanning, collection and resolution always produce a best-effort
//! result and *attach* problems here instead of failing. A diagnostic whose kind is fatal
//! ([`DiagnosticKind::is_fatal`]) ends scanning of the file it belongs to and nothing else.
//!
//! ## Notes
//! - `DiagnosticKind` derives both `thiserror::Error` (message) and `miette::Diagnostic` (stable code,
//!   severity, help), so front ends can render it with miette's report handlers.
//! - `line == 0` marks a file-level diagnostic (e.g. an unreadable file).

use std::fmt;
use std::sync::Arc;

use miette::Severity;
use thiserror::Error;

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum DiagnosticKind {
    /// A listed source (or a resolved include) could not be read.
    #[error("cannot read source file: {reason}")]
    #[diagnostic(
        code(svtopo::io),
        help("the file is skipped; the remaining files are still analyzed")
    )]
    Io { reason: String },

    #[error("`include \"{name}\" was not found next to the including file or on any include path")]
    #[diagnostic(code(svtopo::include_not_found), severity(Warning))]
    IncludeNotFound { name: String },

    #[error("`include \"{name}\" exceeds the include depth limit of {limit}")]
    #[diagnostic(
        code(svtopo::include_depth),
        severity(Warning),
        help("this usually means a file includes itself, directly or indirectly")
    )]
    IncludeDepthExceeded { name: String, limit: usize },

    #[error("module `{name}` is missing `endmodule`")]
    #[diagnostic(code(svtopo::unterminated_module))]
    UnterminatedModule { name: String },

    #[error("header of `{name}` is not terminated by `;`")]
    #[diagnostic(code(svtopo::unterminated_header))]
    UnterminatedHeader { name: String },

    #[error("`{found}` has no matching opening delimiter")]
    #[diagnostic(code(svtopo::unbalanced_delimiter))]
    UnbalancedDelimiter { found: String },

    #[error("expected `{expected}`, found `{found}`")]
    #[diagnostic(code(svtopo::mismatched_delimiter))]
    MismatchedDelimiter { expected: String, found: String },

    #[error("`{open}` is never closed")]
    #[diagnostic(code(svtopo::unterminated_delimiter))]
    UnterminatedDelimiter { open: String },

    #[error("`{opener}` is never closed by `{closer}`")]
    #[diagnostic(code(svtopo::unterminated_block))]
    UnterminatedBlock { opener: String, closer: String },

    #[error("{count} block(s) still open at `endmodule` of module `{name}`")]
    #[diagnostic(code(svtopo::unclosed_blocks), severity(Warning))]
    UnclosedBlocks { name: String, count: usize },

    #[error("`{keyword}` has no matching block opener")]
    #[diagnostic(code(svtopo::stray_end), severity(Warning))]
    StrayEnd { keyword: String },

    #[error("`endmodule` outside of any module")]
    #[diagnostic(code(svtopo::stray_endmodule), severity(Warning))]
    StrayEndmodule,

    #[error("module `{name}` is already declared at {first_file}:{first_line}")]
    #[diagnostic(
        code(svtopo::duplicate_declaration),
        severity(Warning),
        help("the first declaration in source-list order wins; this one is ignored")
    )]
    DuplicateDeclaration {
        name: String,
        first_file: String,
        first_line: u32,
    },

    #[error("`{name}` is declared as an interface, not a module")]
    #[diagnostic(
        code(svtopo::interface_instantiated),
        severity(Advice),
        help("interface instances have the same shape as module instances and are reported as missing modules")
    )]
    InterfaceInstantiated { name: String },
}

impl DiagnosticKind {
    /// Return `true` for structural errors that stop scanning of the current file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::UnterminatedModule { .. }
                | DiagnosticKind::UnterminatedHeader { .. }
                | DiagnosticKind::UnbalancedDelimiter { .. }
                | DiagnosticKind::MismatchedDelimiter { .. }
                | DiagnosticKind::UnterminatedDelimiter { .. }
                | DiagnosticKind::UnterminatedBlock { .. }
        )
    }
}

/// A diagnostic anchored to a file and line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub file: Arc<str>,
    /// 1-based line, or `0` for file-level diagnostics.
    pub line: u32,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(file: Arc<str>, line: u32, kind: DiagnosticKind) -> Self {
        Self { file, line, kind }
    }

    /// A diagnostic about a whole file rather than a position in it.
    pub fn file_level(file: Arc<str>, kind: DiagnosticKind) -> Self {
        Self { file, line: 0, kind }
    }

    /// Severity as declared on the kind; kinds without an explicit severity are errors.
    pub fn severity(&self) -> Severity {
        miette::Diagnostic::severity(&self.kind).unwrap_or(Severity::Error)
    }

    /// Stable diagnostic code, e.g. `svtopo::duplicate_declaration`.
    pub fn code(&self) -> String {
        miette::Diagnostic::code(&self.kind)
            .map(|c| c.to_string())
            .unwrap_or_default()
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line == 0 {
            write!(f, "{}: {}", self.file, self.kind)
        } else {
            write!(f, "{}:{}: {}", self.file, self.line, self.kind)
        }
    }
}

/// Lower-case severity name as used in serialized reports.
pub fn severity_name(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Advice => "advice",
    }
}
