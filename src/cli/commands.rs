//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use miette::{MietteDiagnostic, Report};

use crate::analyzer::{Analysis, Analyzer};
use crate::config::{AnalyzerConfig, MAX_SOURCE_SIZE};
use crate::errors::AnalyzeError;
use crate::frontend::diagnostics::Diagnostic;
use crate::frontend::{lexer, scanner};
use crate::report::Request;

use super::{CliError, CliResult, ExitCode};

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MiB)
pub fn read_source(file_path: &Path) -> CliResult<String> {
    let shown = file_path.display();
    // Check file size before reading
    let metadata =
        fs::metadata(file_path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", shown, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            shown,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    let bytes = fs::read(file_path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", shown, e)))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Read and decode a request document from `path`, or from stdin when `path` is `None` or `-`.
pub fn read_request(path: Option<&Path>) -> CliResult<Request> {
    let text = match path {
        Some(path) if path != Path::new("-") => read_source(path)?,
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .map_err(|e| CliError::failure(format!("Error reading request from stdin: {}", e)))?;
            text
        }
    };
    serde_json::from_str(&text).map_err(|e| CliError::failure(AnalyzeError::InvalidRequest(e).to_string()))
}

/// Analyze a request and print the response JSON on stdout.
pub fn analyze_request(
    request: &Request,
    config: AnalyzerConfig,
    pretty: bool,
    show_diagnostics: bool,
) -> CliResult<ExitCode> {
    let analysis = Analyzer::new(config).analyze(request);
    if show_diagnostics {
        render_diagnostics(&analysis);
    }
    println!("{}", response_json(&analysis, pretty)?);
    Ok(ExitCode::SUCCESS)
}

/// Encode the response of `analysis`.
pub fn response_json(analysis: &Analysis, pretty: bool) -> CliResult<String> {
    let response = analysis.to_response();
    let encoded = if pretty {
        serde_json::to_string_pretty(&response)
    } else {
        serde_json::to_string(&response)
    };
    encoded.map_err(|e| CliError::failure(AnalyzeError::Serialize(e).to_string()))
}

/// Print every diagnostic of `analysis` to stderr through miette's report handler.
fn render_diagnostics(analysis: &Analysis) {
    for diag in &analysis.diagnostics {
        eprintln!("{:?}", Report::new(to_miette(diag)));
    }
}

fn to_miette(diag: &Diagnostic) -> MietteDiagnostic {
    let mut rendered = MietteDiagnostic::new(diag.to_string())
        .with_code(diag.code())
        .with_severity(diag.severity());
    if let Some(help) = miette::Diagnostic::help(&diag.kind) {
        rendered = rendered.with_help(help.to_string());
    }
    rendered
}

/// Tokenize and display tokens.
pub fn lex_file(file_path: &Path) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    for tok in lexer::lex(&source, &*file_path.to_string_lossy()) {
        println!("{}", tok);
    }
    Ok(ExitCode::SUCCESS)
}

/// Scan one file (includes not followed) and display its events and diagnostics.
pub fn scan_file(file_path: &Path, config: &AnalyzerConfig) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let tokens = lexer::tokenize(&source, &*file_path.to_string_lossy());
    let output = scanner::scan(tokens, &config.policy);
    for event in &output.events {
        println!("{}", event);
    }
    for diag in &output.diagnostics {
        eprintln!("{:?}", Report::new(to_miette(diag)));
    }
    if output.halted() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::frontend::diagnostics::DiagnosticKind;

    #[test]
    fn test_read_source_reports_missing_file() {
        let err = read_source(Path::new("definitely/not/here.sv")).unwrap_err();
        assert!(err.message.starts_with("Cannot access file 'definitely/not/here.sv'"));
        assert_eq!(err.exit_code, ExitCode::FAILURE);
    }

    #[test]
    fn test_read_request_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("request.json");
        fs::write(&path, r#"{"files": {"source": ["a.sv"], "include": ["inc"]}}"#).unwrap();
        let request = read_request(Some(&path)).unwrap();
        assert_eq!(request.files.source, ["a.sv"]);
        assert_eq!(request.files.include, ["inc"]);

        fs::write(&path, "[]").unwrap();
        let err = read_request(Some(&path)).unwrap_err();
        assert!(err.message.starts_with("invalid request"));
    }

    #[test]
    fn test_miette_rendering_keeps_code_and_severity() {
        let diag = Diagnostic::new(Arc::from("a.sv"), 2, DiagnosticKind::StrayEndmodule);
        let rendered = to_miette(&diag);
        assert_eq!(rendered.message, "a.sv:2: `endmodule` outside of any module");
        assert_eq!(rendered.code.as_deref(), Some("svtopo::stray_endmodule"));
        assert_eq!(rendered.severity, Some(miette::Severity::Warning));
    }

    #[test]
    fn test_pretty_response_json() {
        let json = response_json(&Analysis::default(), true).unwrap();
        assert!(json.starts_with("{\n  \"modules\""));
        assert!(!json.contains("diagnostics"));
    }
}
