//! Analyzer entry points.
//!
//! One run is a fork-join pipeline:
//! 1. every listed source is loaded, lexed and scanned independently ([`collect::collect_all`])
//! 2. the per-file results are folded in source-list order into a [`SymbolTable`]
//! 3. the table is resolved into exports and missing modules
//! 4. the four maps and all diagnostics become an [`Analysis`]
//!
//! Analysis never fails. [`run_json`] adds the serialized boundary, which can.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::AnalyzerConfig;
use crate::errors::AnalyzeError;
use crate::frontend::diagnostics::Diagnostic;
use crate::frontend::source::{FsLoader, SourceLoader};
use crate::frontend::symbols::ChildInstance;
use crate::frontend::{collect, resolver, symbols};
use crate::report::{self, ModulesReport, Request, Response};

/// Result of one analysis run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Analysis {
    pub modules: ModulesReport,
    /// Module or interface name to the instances inside it, in scan order. Not part of the response.
    pub children: BTreeMap<String, Vec<ChildInstance>>,
    /// Per-file diagnostics in source-list order, then corpus-level ones.
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    pub fn to_response(&self) -> Response {
        Response::new(self.modules.clone(), &self.diagnostics)
    }

    pub fn into_response(self) -> Response {
        Response::new(self.modules, &self.diagnostics)
    }

    /// Instances directly inside `parent`; empty if it has none or is unknown.
    pub fn children_of(&self, parent: &str) -> &[ChildInstance] {
        self.children.get(parent).map(Vec::as_slice).unwrap_or_default()
    }

    /// Return `true` if any file failed to load or stopped scanning early.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == miette::Severity::Error)
    }
}

/// Runs analyses with a fixed configuration and source loader.
#[derive(Debug)]
pub struct Analyzer<L = FsLoader> {
    config: AnalyzerConfig,
    loader: L,
}

impl Analyzer<FsLoader> {
    /// Analyzer reading from the local filesystem.
    pub fn new(config: AnalyzerConfig) -> Self {
        let loader = FsLoader::new().with_max_size(config.max_source_size);
        Self { config, loader }
    }
}

impl Default for Analyzer<FsLoader> {
    fn default() -> Self {
        Self::new(AnalyzerConfig::default())
    }
}

impl<L: SourceLoader> Analyzer<L> {
    pub fn with_loader(config: AnalyzerConfig, loader: L) -> Self {
        Self { config, loader }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze the sources of `request`.
    #[tracing::instrument(skip_all, fields(sources = request.files.source.len()))]
    pub fn analyze(&self, request: &Request) -> Analysis {
        let include_dirs: Vec<PathBuf> = request.files.include.iter().map(PathBuf::from).collect();
        let files = collect::collect_all(&self.loader, &request.files.source, &include_dirs, &self.config);

        let mut table = symbols::build(&files);
        let resolution = resolver::resolve(&table);

        let mut diagnostics: Vec<Diagnostic> = files.into_iter().flat_map(|f| f.diagnostics).collect();
        diagnostics.extend(table.diagnostics.iter().cloned());
        diagnostics.extend(resolution.diagnostics.iter().cloned());

        let children = std::mem::take(&mut table.children);
        let modules = report::assemble(table, resolution);
        tracing::info!(
            files = request.files.source.len(),
            declarations = modules.declarations.len(),
            instances = modules.instances.len(),
            exports = modules.exports.len(),
            missing = modules.missing.len(),
            diagnostics = diagnostics.len(),
            "analysis complete"
        );
        Analysis {
            modules,
            children,
            diagnostics,
        }
    }
}

/// Analyze `request` against the filesystem with the default configuration.
pub fn analyze(request: &Request) -> Analysis {
    Analyzer::default().analyze(request)
}

/// Serialized boundary: request JSON in, response JSON out.
///
/// ## Errors
/// - [`AnalyzeError::InvalidRequest`] if `request` is not a valid request document.
/// - [`AnalyzeError::Serialize`] if the response cannot be encoded.
pub fn run_json(request: &str) -> Result<String, AnalyzeError> {
    run_json_with(&Analyzer::default(), request)
}

/// [`run_json`] with a caller-supplied analyzer.
pub fn run_json_with<L: SourceLoader>(analyzer: &Analyzer<L>, request: &str) -> Result<String, AnalyzeError> {
    let request: Request = serde_json::from_str(request).map_err(AnalyzeError::InvalidRequest)?;
    let response = analyzer.analyze(&request).into_response();
    serde_json::to_string(&response).map_err(AnalyzeError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::source::MemoryLoader;

    fn analyzer(files: &[(&str, &str)]) -> Analyzer<MemoryLoader> {
        let loader = files
            .iter()
            .fold(MemoryLoader::new(), |loader, (path, text)| loader.with_file(*path, *text));
        Analyzer::with_loader(AnalyzerConfig::default(), loader)
    }

    #[test]
    fn test_pipeline_orders_diagnostics() {
        let analyzer = analyzer(&[
            ("a.sv", "module m; endmodule\nendmodule\n"),
            ("b.sv", "module m; bus_if b (); endmodule\n"),
            ("c.sv", "interface bus_if; endinterface\n"),
        ]);
        let request = Request::new(vec!["a.sv".into(), "b.sv".into(), "c.sv".into()], vec![]);
        let analysis = analyzer.analyze(&request);
        let codes: Vec<String> = analysis.diagnostics.iter().map(Diagnostic::code).collect();
        assert_eq!(
            codes,
            [
                "svtopo::stray_endmodule",
                "svtopo::duplicate_declaration",
                "svtopo::interface_instantiated"
            ]
        );
        assert!(!analysis.has_errors());
    }

    #[test]
    fn test_run_json_rejects_malformed_requests() {
        let analyzer = analyzer(&[]);
        let err = run_json_with(&analyzer, "{\"files\": 3}").unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidRequest(_)));
        assert!(run_json_with(&analyzer, "not json").is_err());
    }

    #[test]
    fn test_run_json_round_trip() {
        let analyzer = analyzer(&[("top.sv", "module top; leaf l (); endmodule\n")]);
        let json = run_json_with(&analyzer, r#"{"files": {"include": [], "source": ["top.sv"]}}"#).unwrap();
        let response: Response = serde_json::from_str(&json).unwrap();
        assert!(response.modules.exports.contains_key("top"));
        assert!(response.modules.missing.contains_key("leaf"));
        assert!(response.diagnostics.is_empty());
    }
}
