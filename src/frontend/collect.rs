//! Per-file collection: load, lex, scan, and splice `` `include `` files.
//!
//! This is the parallel half of the fork-join pipeline. Every listed source is processed independently
//! into a [`FileResult`]; [`collect_all`] runs that on scoped worker threads and returns the results in
//! source-list order so the sequential merge stays deterministic.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;

use crate::config::AnalyzerConfig;
use crate::frontend::diagnostics::{Diagnostic, DiagnosticKind};
use crate::frontend::lexer::{self, Token};
use crate::frontend::scanner::{self, Located};
use crate::frontend::source::{SourceLoader, resolve_include};
use crate::frontend::token_helpers::include_target;

/// Everything one listed source contributed, includes spliced in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileResult {
    pub events: Vec<Located>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Collect one listed source file.
///
/// Included files are lexed and their tokens spliced in place of the `` `include `` directive before
/// scanning, so an include holding module-body items is scanned inside the module that includes it.
/// Never fails: an unreadable file yields a file-level `Io` diagnostic and no events.
pub fn collect_file(
    loader: &dyn SourceLoader,
    path: &str,
    include_dirs: &[PathBuf],
    config: &AnalyzerConfig,
) -> FileResult {
    let mut collector = Collector {
        loader,
        include_dirs,
        config,
        chain: Vec::new(),
        diagnostics: Vec::new(),
    };
    let Some(tokens) = collector.tokens(Path::new(path), Arc::from(path)) else {
        return FileResult {
            events: Vec::new(),
            diagnostics: collector.diagnostics,
        };
    };

    let output = scanner::scan(tokens, &config.policy);
    let mut diagnostics = collector.diagnostics;
    diagnostics.extend(output.diagnostics);
    tracing::debug!(
        file = path,
        events = output.events.len(),
        diagnostics = diagnostics.len(),
        "collected"
    );
    FileResult {
        events: output.events,
        diagnostics,
    }
}

/// Collect every source on up to `config.effective_jobs` scoped threads.
///
/// Results are returned in the order of `sources`, independent of scheduling.
pub fn collect_all(
    loader: &dyn SourceLoader,
    sources: &[String],
    include_dirs: &[PathBuf],
    config: &AnalyzerConfig,
) -> Vec<FileResult> {
    let jobs = config.effective_jobs(sources.len());
    if jobs <= 1 {
        return sources
            .iter()
            .map(|path| collect_file(loader, path, include_dirs, config))
            .collect();
    }

    let chunk_size = sources.len().div_ceil(jobs);
    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk
                        .iter()
                        .map(|path| collect_file(loader, path, include_dirs, config))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect()
    })
}

struct Collector<'a> {
    loader: &'a dyn SourceLoader,
    include_dirs: &'a [PathBuf],
    config: &'a AnalyzerConfig,
    /// Files currently being expanded, outermost first.
    chain: Vec<PathBuf>,
    diagnostics: Vec<Diagnostic>,
}

impl Collector<'_> {
    /// Load and lex `path`, expanding includes. `None` if the file cannot be read.
    fn tokens(&mut self, path: &Path, name: Arc<str>) -> Option<Vec<Token>> {
        let text = match self.loader.load(path) {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(file = %name, error = %err, "cannot read source file");
                let kind = DiagnosticKind::Io {
                    reason: err.to_string(),
                };
                self.diagnostics.push(Diagnostic::file_level(name, kind));
                return None;
            }
        };

        let tokens = lexer::tokenize(&text, Arc::clone(&name));
        if !self.config.follow_includes {
            return Some(tokens);
        }

        self.chain.push(path.to_path_buf());
        let mut expanded = Vec::with_capacity(tokens.len());
        let mut idx = 0;
        while idx < tokens.len() {
            let token = &tokens[idx];
            let target = if token.is_directive("include") {
                include_target(&tokens[idx + 1..])
            } else {
                None
            };
            match target {
                Some((target, len)) => {
                    let line = token.line;
                    expanded.extend(self.include(&target, &name, line));
                    idx += 1 + len;
                }
                None => {
                    expanded.push(token.clone());
                    idx += 1;
                }
            }
        }
        self.chain.pop();
        Some(expanded)
    }

    /// Tokens of an included file without its `Eof`; empty when the include cannot be followed.
    fn include(&mut self, target: &str, from: &Arc<str>, line: u32) -> Vec<Token> {
        let including = self.chain.last().cloned().unwrap_or_default();
        let Some(resolved) = resolve_include(self.loader, target, &including, self.include_dirs) else {
            tracing::warn!(file = %from, line, include = target, "include not found");
            let kind = DiagnosticKind::IncludeNotFound {
                name: target.to_string(),
            };
            self.diagnostics.push(Diagnostic::new(Arc::clone(from), line, kind));
            return Vec::new();
        };

        if self.chain.len() > self.config.max_include_depth || self.chain.contains(&resolved) {
            tracing::warn!(file = %from, line, include = target, "include chain too deep");
            let kind = DiagnosticKind::IncludeDepthExceeded {
                name: target.to_string(),
                limit: self.config.max_include_depth,
            };
            self.diagnostics.push(Diagnostic::new(Arc::clone(from), line, kind));
            return Vec::new();
        }

        let name: Arc<str> = Arc::from(&*resolved.to_string_lossy());
        let mut tokens = self.tokens(&resolved, name).unwrap_or_default();
        tokens.retain(|t| !t.is_eof());
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::source::MemoryLoader;

    fn names(result: &FileResult) -> Vec<String> {
        result.events.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_unreadable_file_is_a_diagnostic() {
        let loader = MemoryLoader::new();
        let result = collect_file(&loader, "gone.sv", &[], &AnalyzerConfig::default());
        assert!(result.events.is_empty());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 0);
        assert!(matches!(result.diagnostics[0].kind, DiagnosticKind::Io { .. }));
    }

    #[test]
    fn test_include_events_are_spliced_in_place() {
        let loader = MemoryLoader::new()
            .with_file("rtl/top.sv", "module top;\n`include \"body.svh\"\nendmodule\n")
            .with_file("rtl/body.svh", "fifo u_fifo();\n");
        let result = collect_file(&loader, "rtl/top.sv", &[], &AnalyzerConfig::default());
        assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);
        assert_eq!(
            names(&result),
            [
                "rtl/top.sv:1: module top",
                "rtl/top.sv:1: header end",
                "rtl/body.svh:1: instance fifo u_fifo",
                "rtl/top.sv:3: endmodule top",
            ]
        );
    }

    #[test]
    fn test_includes_can_be_disabled() {
        let loader = MemoryLoader::new()
            .with_file("top.sv", "`include \"defs.svh\"\nmodule top; endmodule\n")
            .with_file("defs.svh", "module defs; endmodule\n");
        let config = AnalyzerConfig::default().with_follow_includes(false);
        let result = collect_file(&loader, "top.sv", &[], &config);
        assert!(result.events.iter().all(|l| &*l.file == "top.sv"));
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_missing_include_warns() {
        let loader = MemoryLoader::new().with_file("top.sv", "`include \"nope.svh\"\nmodule top; endmodule\n");
        let result = collect_file(&loader, "top.sv", &[], &AnalyzerConfig::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 1);
        assert_eq!(result.diagnostics[0].code(), "svtopo::include_not_found");
        assert_eq!(result.events.len(), 3);
    }

    #[test]
    fn test_self_include_is_cut() {
        let loader = MemoryLoader::new().with_file("loop.svh", "`include \"loop.svh\"\nmodule m; endmodule\n");
        let result = collect_file(&loader, "loop.svh", &[], &AnalyzerConfig::default());
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].code(), "svtopo::include_depth");
        assert_eq!(result.events.len(), 3);
    }

    #[test]
    fn test_depth_limit() {
        let loader = MemoryLoader::new()
            .with_file("a.svh", "`include \"b.svh\"\n")
            .with_file("b.svh", "`include \"c.svh\"\n")
            .with_file("c.svh", "module c; endmodule\n");
        let config = AnalyzerConfig::default().with_max_include_depth(1);
        let result = collect_file(&loader, "a.svh", &[], &config);
        assert!(result.events.is_empty());
        assert!(matches!(
            result.diagnostics[0].kind,
            DiagnosticKind::IncludeDepthExceeded { limit: 1, .. }
        ));
    }

    #[test]
    fn test_parallel_collection_keeps_source_order() {
        let mut loader = MemoryLoader::new();
        let sources: Vec<String> = (0..17).map(|i| format!("m{i}.sv")).collect();
        for (i, path) in sources.iter().enumerate() {
            loader.insert(path.as_str(), format!("module m{i}; endmodule\n"));
        }
        let config = AnalyzerConfig::default().with_jobs(4);
        let results = collect_all(&loader, &sources, &[], &config);
        let files: Vec<&str> = results.iter().map(|r| &*r.events[0].file).collect();
        assert_eq!(files, sources.iter().map(String::as_str).collect::<Vec<_>>());
    }
}
