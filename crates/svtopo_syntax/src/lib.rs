//! Syntax frontend for svtopo: lexer, module scanner, diagnostics.
//!
//! This crate is dependency-light and performs no IO. It turns the text of one file into a list of
//! topology events (`module` declarations, instantiations, `` `include `` requests) plus diagnostics.
//!
//! ## Notes
//! - The scanner is *structural*, not a grammar: it recognizes module boundaries and instantiation
//!   statements and skips everything else by balanced-token scanning.
//! - Nothing here fails. Malformed input degrades to noise tokens or to a fatal diagnostic that ends
//!   scanning of that file only.
//! - Vocabulary identity (keywords/punctuation/reserved words) comes from `svtopo_core::lang` registries.
//!
//! ## Examples
//! ```rust
//! use svtopo_syntax::lexer;
//! use svtopo_syntax::scanner::{self, InstantiationPolicy, ScanEvent};
//!
//! let tokens = lexer::tokenize("module top; fifo u_fifo(); endmodule\n", "top.sv");
//! let output = scanner::scan(tokens, &InstantiationPolicy::default());
//! assert!(output.plain_events().any(|e| matches!(e, ScanEvent::Instantiation { type_name, .. } if type_name == "fifo")));
//! ```

pub mod diagnostics;
pub mod lexer;
pub mod scanner;
pub mod token_helpers;
