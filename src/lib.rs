#![forbid(unsafe_code)]
//! svtopo: fast, error-tolerant SystemVerilog module hierarchy analysis
//!
//! svtopo scans SystemVerilog sources well enough to find module declarations and instantiations, and
//! classifies every module name of a corpus as declared, instantiated, exported (never instantiated, a
//! presumed root) or missing (instantiated, never declared). It does not elaborate.
//!
//! ## Examples
//! ```rust
//! use svtopo::{Analyzer, AnalyzerConfig, MemoryLoader, Request};
//!
//! let loader = MemoryLoader::new()
//!     .with_file("top.sv", "module top; core u_core (); endmodule")
//!     .with_file("core.sv", "module core; endmodule");
//! let analyzer = Analyzer::with_loader(AnalyzerConfig::default(), loader);
//! let analysis = analyzer.analyze(&Request::new(vec!["top.sv".into(), "core.sv".into()], vec![]));
//! assert!(analysis.modules.exports.contains_key("top"));
//! assert!(analysis.modules.missing.is_empty());
//! ```
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. Per-file problems are
//!   diagnostics, never errors. The `cli` module enforces `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents an analyzer bug (logic error), use
//!   `.expect("INVARIANT: reason")` with a clear explanation.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod errors;
pub mod frontend;
pub mod report;
pub mod version;

pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::scanner;
pub use frontend::symbols;

pub use analyzer::{Analysis, Analyzer, analyze, run_json, run_json_with};
pub use config::AnalyzerConfig;
pub use errors::AnalyzeError;
pub use frontend::source::{FsLoader, MemoryLoader, SourceLoader};
pub use report::{ModulesReport, Request, Response};
