//! svtopo analysis frontend
//!
//! This module contains every stage that runs before reporting:
//! - `lexer`, `scanner`, `diagnostics`: per-file tokenization and structural scanning
//! - `source`: the file-loading capability and include lookup
//! - `collect`: per-file collection with include splicing, run fork-join across files
//! - `symbols`: the cross-file symbol table (declarations and instantiation sites)
//! - `resolver`: exports and missing modules

// Syntax components are provided by the shared svtopo_syntax crate.
pub use svtopo_syntax::{diagnostics, lexer, scanner, token_helpers};

// Corpus-level pieces remain local.
pub mod collect;
pub mod resolver;
pub mod source;
pub mod symbols;
