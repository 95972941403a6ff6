//! Whole-run errors.
//!
//! Analysis itself cannot fail (per-file problems become diagnostics). Only the serialized boundary can:
//! a request that is not valid JSON of the expected shape, or a response that cannot be encoded.

use thiserror::Error;

#[derive(Debug, Error, miette::Diagnostic)]
pub enum AnalyzeError {
    #[error("invalid request: {0}")]
    #[diagnostic(
        code(svtopo::invalid_request),
        help("expected {{\"files\": {{\"include\": [...], \"source\": [...]}}}}")
    )]
    InvalidRequest(#[source] serde_json::Error),

    #[error("cannot encode response: {0}")]
    #[diagnostic(code(svtopo::serialize))]
    Serialize(#[source] serde_json::Error),
}
