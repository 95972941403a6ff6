//! SystemVerilog vocabulary registries.
//!
//! Callers work with **stable IDs** (`KeywordId`, `PunctuationId`) and look up spellings and metadata via
//! registry tables instead of comparing raw strings.
//!
//! ## Notes
//! - Registries are **pure**: no tokens, no IO, no side effects.
//! - The lexer/scanner decide what is syntactically legal; registries only describe vocabulary.
//!
//! ## Examples
//! ```rust
//! use svtopo_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("endmodule"), Some(KeywordId::Endmodule));
//! assert_eq!(keywords::as_str(KeywordId::Begin), "begin");
//! ```

pub mod keywords;
pub mod punctuation;
pub mod reserved;
