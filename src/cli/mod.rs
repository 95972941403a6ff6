//! CLI module for svtopo
//!
//! This module provides the command-line interface of the analyzer.
//!
//! ## Usage
//!
//! - `svtopo request.json` - analyze the request in a file (`-` or nothing reads stdin)
//! - `svtopo -s a.sv -s b.sv -I include/` - build the request from flags
//! - `svtopo --lex FILE` / `svtopo --scan FILE` - debug views of one file
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use crate::config::AnalyzerConfig;
use crate::frontend::scanner::InstantiationPolicy;
use crate::report::Request;
use crate::version::SVTOPO_VERSION;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// SystemVerilog module hierarchy analyzer
#[derive(Parser, Debug)]
#[command(name = "svtopo")]
#[command(version = SVTOPO_VERSION)]
#[command(about = "Report declared, instantiated, exported and missing SystemVerilog modules", long_about = None)]
pub struct Cli {
    /// Request JSON file (`-` or omitted: read stdin)
    #[arg(value_name = "REQUEST", conflicts_with = "sources")]
    pub request: Option<PathBuf>,

    /// Source file to analyze (repeatable)
    #[arg(short = 's', long = "source", value_name = "FILE")]
    pub sources: Vec<String>,

    /// Include search directory (repeatable)
    #[arg(short = 'I', long = "include", value_name = "DIR")]
    pub includes: Vec<String>,

    /// Indent the response JSON
    #[arg(long)]
    pub pretty: bool,

    /// Render diagnostics on stderr
    #[arg(long)]
    pub diagnostics: bool,

    /// Worker threads for scanning (0 = available parallelism)
    #[arg(short = 'j', long, value_name = "N", default_value_t = 0)]
    pub jobs: usize,

    /// Do not follow `include directives
    #[arg(long)]
    pub no_includes: bool,

    /// Never treat NAME as an instantiated module type (repeatable)
    #[arg(long = "exclude-type", value_name = "NAME")]
    pub exclude_types: Vec<String>,

    // Debug/development flags
    /// Tokenize only (debug)
    #[arg(long = "lex", value_name = "FILE", conflicts_with_all = ["request", "sources"])]
    pub lex_file: Option<PathBuf>,

    /// Scan one file and print its events (debug)
    #[arg(long = "scan", value_name = "FILE", conflicts_with_all = ["request", "sources"])]
    pub scan_file: Option<PathBuf>,
}

impl Cli {
    /// Analyzer configuration selected by the flags.
    pub fn config(&self) -> AnalyzerConfig {
        let policy = InstantiationPolicy::default().with_excluded(self.exclude_types.iter().cloned());
        AnalyzerConfig::new()
            .with_policy(policy)
            .with_jobs(self.jobs)
            .with_follow_includes(!self.no_includes)
    }

    /// The request to analyze: built from `--source`/`--include`, or read from `REQUEST`.
    ///
    /// `--include` directories are appended to those of a request file.
    pub fn request(&self) -> CliResult<Request> {
        if !self.sources.is_empty() {
            return Ok(Request::new(self.sources.clone(), self.includes.clone()));
        }
        let mut request = commands::read_request(self.request.as_deref())?;
        request.files.include.extend(self.includes.iter().cloned());
        Ok(request)
    }
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    // Handle debug flags first
    if let Some(file) = &cli.lex_file {
        return commands::lex_file(file);
    }
    if let Some(file) = &cli.scan_file {
        return commands::scan_file(file, &cli.config());
    }

    let request = cli.request()?;
    commands::analyze_request(&request, cli.config(), cli.pretty, cli.diagnostics)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_request_file() {
        let cli = Cli::try_parse_from(["svtopo", "request.json", "--pretty"]).unwrap();
        assert_eq!(cli.request, Some(PathBuf::from("request.json")));
        assert!(cli.pretty);
        assert!(cli.sources.is_empty());
    }

    #[test]
    fn test_cli_parse_sources_and_includes() {
        let cli = Cli::try_parse_from(["svtopo", "-s", "a.sv", "--source", "b.sv", "-I", "inc"]).unwrap();
        let request = cli.request().unwrap();
        assert_eq!(request.files.source, ["a.sv", "b.sv"]);
        assert_eq!(request.files.include, ["inc"]);
    }

    #[test]
    fn test_cli_request_conflicts_with_sources() {
        assert!(Cli::try_parse_from(["svtopo", "request.json", "-s", "a.sv"]).is_err());
        assert!(Cli::try_parse_from(["svtopo", "--lex", "a.sv", "-s", "b.sv"]).is_err());
    }

    #[test]
    fn test_cli_config_flags() {
        let cli = Cli::try_parse_from([
            "svtopo",
            "-s",
            "a.sv",
            "--jobs",
            "2",
            "--no-includes",
            "--exclude-type",
            "my_func",
        ])
        .unwrap();
        let config = cli.config();
        assert_eq!(config.jobs, 2);
        assert!(!config.follow_includes);
        assert!(config.policy.is_excluded("my_func"));
        assert!(config.policy.is_excluded("module"));
    }

    #[test]
    fn test_execute_scan_debug_view() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.sv");
        std::fs::write(&path, "module m; sub u (;\n").unwrap();
        let cli = Cli::try_parse_from(["svtopo".into(), "--scan".into(), path.into_os_string()]).unwrap();
        assert_eq!(execute(cli).unwrap(), ExitCode::FAILURE);
    }

    #[test]
    fn test_execute_reports_unreadable_request() {
        let cli = Cli::try_parse_from(["svtopo", "no/such/request.json"]).unwrap();
        let err = execute(cli).unwrap_err();
        assert!(err.message.contains("no/such/request.json"));
    }
}
