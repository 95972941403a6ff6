//! Token types for the SystemVerilog lexer.
//!
//! Structural vocabulary uses **registry-backed IDs**:
//! - `Keyword(KeywordId)` for the structural reserved words
//! - `Punctuation(PunctuationId)` for delimiters, separators and markers
//!
//! Everything else keeps its spelling in [`Token::text`] and a coarse kind. Reserved words that never shape
//! topology (`wire`, `logic`, …) are plain `Ident`s; the scanner's policy rejects them as type names.

use std::fmt;
use std::sync::Arc;

use svtopo_core::lang::keywords::{self, KeywordId};
use svtopo_core::lang::punctuation::{self, PunctuationId};

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(KeywordId),
    Punctuation(PunctuationId),

    /// Simple identifier (`[A-Za-z_][A-Za-z0-9_$]*`) that is not a structural keyword.
    Ident,
    /// Escaped identifier; `text` holds the name without the leading `\`.
    EscapedIdent,
    /// System task/function name such as `$display`.
    SystemIdent,
    /// Compiler directive; `text` holds the name without the backtick (`include`, `define`, `MY_MACRO`).
    Directive,

    Number,
    /// String literal; `text` holds the content without quotes.
    String,
    /// Any operator character sequence not modelled as punctuation.
    Operator,
    /// A character the lexer does not recognise.
    Unknown,

    Eof,
}

/// A token with its spelling and position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub file: Arc<str>,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, counted in characters.
    pub column: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, file: Arc<str>, line: u32, column: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            file,
            line,
            column,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            TokenKind::Keyword(_) => "keyword",
            TokenKind::Punctuation(_) => "punct",
            TokenKind::Ident => "ident",
            TokenKind::EscapedIdent => "escaped",
            TokenKind::SystemIdent => "system",
            TokenKind::Directive => "directive",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Operator => "op",
            TokenKind::Unknown => "unknown",
            TokenKind::Eof => "eof",
        };
        write!(f, "{}:{}:{} {kind} {:?}", self.file, self.line, self.column, self.text)
    }
}

/// Resolve an identifier spelling to a keyword id, if structural.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}

/// Resolve a punctuation spelling to its id.
pub fn punctuation_id(text: &str) -> Option<PunctuationId> {
    punctuation::from_str(text)
}

/// Canonical spelling of a punctuation id.
pub fn punctuation_text(id: PunctuationId) -> &'static str {
    punctuation::as_str(id)
}
