//! Symbol table builder.
//!
//! Folds the per-file event lists, in source-list order, into the corpus-wide maps:
//! - declarations: module name to its first declaration site
//! - instances: instantiated type name to every instantiation site, in scan order
//! - interfaces: interface name to its first declaration site (used only for advice)
//! - children: enclosing module or interface name to the instances it contains, in scan order
//!
//! Maps are `BTreeMap`s so every iteration (and the serialized report) is ordered by name.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::frontend::collect::FileResult;
use crate::frontend::diagnostics::{Diagnostic, DiagnosticKind};
use crate::frontend::scanner::{Located, ScanEvent};

/// A declaration or instantiation site.
///
/// `name` is the module name: the declared name for declarations, the instantiated type for instances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub file: String,
    pub line: u32,
}

impl ModuleInfo {
    pub fn new(name: impl Into<String>, file: impl Into<String>, line: u32) -> Self {
        Self {
            name: name.into(),
            file: file.into(),
            line,
        }
    }
}

/// One instantiation inside a parent module or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildInstance {
    pub instance_name: String,
    /// The instantiated type and where the instantiation is.
    pub site: ModuleInfo,
}

/// Declarations and instantiation sites of a whole corpus.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    pub declarations: BTreeMap<String, ModuleInfo>,
    pub instances: BTreeMap<String, Vec<ModuleInfo>>,
    pub interfaces: BTreeMap<String, ModuleInfo>,
    /// Parent-to-child edges; a parent declared more than once collects the children of every copy.
    pub children: BTreeMap<String, Vec<ChildInstance>>,
    /// Duplicate declarations, in the order they were met
    pub diagnostics: Vec<Diagnostic>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file's events into the table.
    pub fn add_events<'a>(&mut self, events: impl IntoIterator<Item = &'a Located>) {
        for located in events {
            match &located.event {
                ScanEvent::ModuleDeclared { name, line } => self.declare(&located.file, name, *line),
                ScanEvent::Instantiation {
                    type_name,
                    instance_name,
                    parent,
                    line,
                } => {
                    let site = ModuleInfo::new(type_name.as_str(), &*located.file, *line);
                    if let Some(parent) = parent {
                        self.children.entry(parent.clone()).or_default().push(ChildInstance {
                            instance_name: instance_name.clone(),
                            site: site.clone(),
                        });
                    }
                    self.instances.entry(type_name.clone()).or_default().push(site);
                }
                ScanEvent::InterfaceDeclared { name, line } => {
                    self.interfaces
                        .entry(name.clone())
                        .or_insert_with(|| ModuleInfo::new(name.as_str(), &*located.file, *line));
                }
                ScanEvent::ModuleHeaderEnd { .. } | ScanEvent::ModuleEnd { .. } | ScanEvent::Include { .. } => {}
            }
        }
    }

    /// Record a declaration; the first one of a name wins, later ones become diagnostics.
    fn declare(&mut self, file: &Arc<str>, name: &str, line: u32) {
        if let Some(first) = self.declarations.get(name) {
            tracing::debug!(name, file = %file, line, "duplicate declaration");
            let kind = DiagnosticKind::DuplicateDeclaration {
                name: name.to_string(),
                first_file: first.file.clone(),
                first_line: first.line,
            };
            self.diagnostics.push(Diagnostic::new(Arc::clone(file), line, kind));
            return;
        }
        self.declarations
            .insert(name.to_string(), ModuleInfo::new(name, &**file, line));
    }
}

/// Build the table from per-file results given in source-list order.
pub fn build<'a>(files: impl IntoIterator<Item = &'a FileResult>) -> SymbolTable {
    let mut table = SymbolTable::new();
    for file in files {
        table.add_events(&file.events);
    }
    table
}
