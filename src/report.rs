//! Request and response structures of the JSON boundary, and the report assembler.
//!
//! Wire shape:
//!
//! ```text
//! request:  { "files": { "include": [..], "source": [..] } }
//! response: { "modules": { "declarations": {..}, "instances": {..}, "exports": {..}, "missing": {..} },
//!             "diagnostics": [..] }   // only when non-empty
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::frontend::diagnostics::{Diagnostic, severity_name};
use crate::frontend::resolver::Resolution;
use crate::frontend::symbols::{ModuleInfo, SymbolTable};

/// An analysis request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    pub files: FilesInput,
}

/// Files of a request: sources to scan and directories to search for includes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilesInput {
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub source: Vec<String>,
}

impl Request {
    pub fn new(source: Vec<String>, include: Vec<String>) -> Self {
        Self {
            files: FilesInput { include, source },
        }
    }
}

/// The four maps of a resolved corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulesReport {
    pub declarations: BTreeMap<String, ModuleInfo>,
    pub instances: BTreeMap<String, Vec<ModuleInfo>>,
    pub exports: BTreeMap<String, ModuleInfo>,
    pub missing: BTreeMap<String, Vec<ModuleInfo>>,
}

/// A serialized diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub severity: String,
    pub code: String,
    pub message: String,
    pub file: String,
    /// Absent for file-level diagnostics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

impl From<&Diagnostic> for DiagnosticRecord {
    fn from(diag: &Diagnostic) -> Self {
        Self {
            severity: severity_name(diag.severity()).to_string(),
            code: diag.code(),
            message: diag.message(),
            file: diag.file.to_string(),
            line: (diag.line != 0).then_some(diag.line),
        }
    }
}

/// The response document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub modules: ModulesReport,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<DiagnosticRecord>,
}

/// Assemble the four maps from a symbol table and its resolution.
pub fn assemble(table: SymbolTable, resolution: Resolution) -> ModulesReport {
    ModulesReport {
        declarations: table.declarations,
        instances: table.instances,
        exports: resolution.exports,
        missing: resolution.missing,
    }
}

impl Response {
    pub fn new(modules: ModulesReport, diagnostics: &[Diagnostic]) -> Self {
        Self {
            modules,
            diagnostics: diagnostics.iter().map(DiagnosticRecord::from).collect(),
        }
    }
}
