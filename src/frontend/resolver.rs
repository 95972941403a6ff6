//! Graph resolver: exports and missing modules.
//!
//! Pure set differences over a [`SymbolTable`]:
//! - `missing`: instantiated names with no declaration, with all their sites
//! - `exports`: declared names never instantiated anywhere in the corpus (presumed roots)
//!
//! A missing name that matches a declared interface also gets an advice diagnostic.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::frontend::diagnostics::{Diagnostic, DiagnosticKind};
use crate::frontend::symbols::{ModuleInfo, SymbolTable};

/// Result of resolving a symbol table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    pub exports: BTreeMap<String, ModuleInfo>,
    pub missing: BTreeMap<String, Vec<ModuleInfo>>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Classify every name of `table`.
pub fn resolve(table: &SymbolTable) -> Resolution {
    let exports: BTreeMap<String, ModuleInfo> = table
        .declarations
        .iter()
        .filter(|(name, _)| !table.instances.contains_key(*name))
        .map(|(name, info)| (name.clone(), info.clone()))
        .collect();

    let missing: BTreeMap<String, Vec<ModuleInfo>> = table
        .instances
        .iter()
        .filter(|(name, _)| !table.declarations.contains_key(*name))
        .map(|(name, sites)| (name.clone(), sites.clone()))
        .collect();

    let diagnostics = missing
        .iter()
        .filter(|(name, _)| table.interfaces.contains_key(*name))
        .filter_map(|(name, sites)| {
            let site = sites.first()?;
            let kind = DiagnosticKind::InterfaceInstantiated { name: name.clone() };
            Some(Diagnostic::new(Arc::from(site.file.as_str()), site.line, kind))
        })
        .collect();

    Resolution {
        exports,
        missing,
        diagnostics,
    }
}
