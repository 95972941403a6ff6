//! Module scanner for SystemVerilog.
//!
//! Walks the token stream of one file and reports only what shapes the module graph: module
//! declarations and their ends, instantiation statements, interface declarations and `` `include ``
//! requests. Everything else (behavioral code, expressions, declarations) is skipped by balanced-token
//! scanning.
//!
//! ## Model
//! - Nesting is an explicit stack of [`Scope`] markers (modules, interfaces and generate/begin/case blocks), never
//!   recursion, so deep or malformed nesting cannot exhaust the call stack.
//! - Structural errors (unterminated module, unbalanced delimiters) *halt* the file: events collected so
//!   far are kept and a fatal [`Diagnostic`] is attached. Everything else is a warning or silently skipped.
//! - Which token shapes count as an instantiation is decided by [`InstantiationPolicy`].
//!
//! ## Examples
//!
//! ```rust
//! use svtopo_syntax::{lexer, scanner};
//! use svtopo_syntax::scanner::{InstantiationPolicy, ScanEvent};
//!
//! let tokens = lexer::tokenize("module top; sub #(8) u0(), u1(); endmodule", "top.sv");
//! let out = scanner::scan(tokens, &InstantiationPolicy::default());
//! let instances: Vec<_> = out
//!     .plain_events()
//!     .filter_map(|e| match e {
//!         ScanEvent::Instantiation { instance_name, .. } => Some(instance_name.as_str()),
//!         _ => None,
//!     })
//!     .collect();
//! assert_eq!(instances, ["u0", "u1"]);
//! ```

mod policy;

use std::fmt;
use std::sync::Arc;

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::lexer::{Token, TokenKind};
use crate::token_helpers::include_target;
use svtopo_core::lang::keywords::{self, KeywordCategory, KeywordId};
use svtopo_core::lang::punctuation::{self, PunctuationId};

pub use policy::InstantiationPolicy;

// NOTE: The scanner is split across multiple files using `include!` so that every scanning method stays
// in one Rust module (shared private state) without one very large source file.

include!("scanner/core.rs");
include!("scanner/helpers.rs");
include!("scanner/items.rs");
include!("scanner/instances.rs");
include!("scanner/skip.rs");
include!("scanner/tests.rs");

/// A topology-relevant fact found in one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// `module NAME` (line of the name token).
    ModuleDeclared { name: String, line: u32 },
    /// The `;` ending a module header.
    ModuleHeaderEnd { line: u32 },
    /// `TYPE [#(...)] INSTANCE (...)`; one event per instance (line of the type token).
    Instantiation {
        type_name: String,
        instance_name: String,
        /// Enclosing module or interface, or the target of a `bind`; `None` at top level.
        parent: Option<String>,
        line: u32,
    },
    ModuleEnd { name: String, line: u32 },
    InterfaceDeclared { name: String, line: u32 },
    /// `` `include "path" ``, unresolved.
    Include { path: String, line: u32 },
}

impl ScanEvent {
    pub fn line(&self) -> u32 {
        match self {
            ScanEvent::ModuleDeclared { line, .. }
            | ScanEvent::ModuleHeaderEnd { line }
            | ScanEvent::Instantiation { line, .. }
            | ScanEvent::ModuleEnd { line, .. }
            | ScanEvent::InterfaceDeclared { line, .. }
            | ScanEvent::Include { line, .. } => *line,
        }
    }
}

impl fmt::Display for ScanEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanEvent::ModuleDeclared { name, line } => write!(f, "{line}: module {name}"),
            ScanEvent::ModuleHeaderEnd { line } => write!(f, "{line}: header end"),
            ScanEvent::Instantiation {
                type_name,
                instance_name,
                line,
                ..
            } => write!(f, "{line}: instance {type_name} {instance_name}"),
            ScanEvent::ModuleEnd { name, line } => write!(f, "{line}: endmodule {name}"),
            ScanEvent::InterfaceDeclared { name, line } => write!(f, "{line}: interface {name}"),
            ScanEvent::Include { path, line } => write!(f, "{line}: include {path:?}"),
        }
    }
}

/// A scan event and the file its tokens came from.
///
/// A token stream may splice several files (`` `include ``), so the file is tracked per event rather
/// than per scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    pub file: Arc<str>,
    pub event: ScanEvent,
}

impl fmt::Display for Located {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.event)
    }
}

/// Result of scanning one token stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    pub events: Vec<Located>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScanOutput {
    /// The events without their files.
    pub fn plain_events(&self) -> impl Iterator<Item = &ScanEvent> {
        self.events.iter().map(|located| &located.event)
    }

    /// Return `true` if scanning stopped early on a structural error.
    pub fn halted(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }
}
