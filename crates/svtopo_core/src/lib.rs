//! Provide the canonical SystemVerilog vocabulary used by the svtopo lexer, scanner, and analyzer.
//!
//! This crate is intentionally small and dependency-free. It holds the registries that let the rest of the
//! workspace avoid stringly-typed keyword checks.
//!
//! ## Notes
//!
//! - **No IO**, no global mutable state, no syntax-tree types.
//! - Current scope: structural keywords (the subset of reserved words that shapes module topology),
//!   punctuation, and the full IEEE 1800-2017 reserved-word list.

pub mod lang;
