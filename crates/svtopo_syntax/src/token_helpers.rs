//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These helpers exist to reduce repetitive `matches!(...)` at call sites in the scanner.

use crate::lexer::{Token, TokenKind};
use svtopo_core::lang::keywords::{self, KeywordCategory, KeywordId};
use svtopo_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is a keyword of the given category.
    pub fn is_keyword_in(&self, category: KeywordCategory) -> bool {
        self.keyword_id().is_some_and(|id| keywords::category(id) == category)
    }

    /// Return the punctuation id, if this is a punctuation token.
    pub fn punctuation_id(&self) -> Option<PunctuationId> {
        match self {
            TokenKind::Punctuation(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for simple and escaped identifiers.
    pub fn is_identifier(&self) -> bool {
        matches!(self, TokenKind::Ident | TokenKind::EscapedIdent)
    }
}

impl Token {
    /// Convenience wrapper for `self.kind.keyword_id()`.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        self.kind.keyword_id()
    }

    pub fn is_keyword(&self, id: KeywordId) -> bool {
        self.kind.is_keyword(id)
    }

    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        self.kind.is_punctuation(id)
    }

    pub fn is_identifier(&self) -> bool {
        self.kind.is_identifier()
    }

    /// Return `true` for an operator token spelled exactly `text`.
    pub fn is_operator(&self, text: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == text
    }

    /// Return `true` for a directive token with the given name (without backtick).
    pub fn is_directive(&self, name: &str) -> bool {
        self.kind == TokenKind::Directive && self.text == name
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Read the target of an `` `include `` from the tokens following the directive.
///
/// Accepts `"file"` or `<file>` (the latter on a single line). Returns the path and the number of tokens
/// it spans.
pub fn include_target(tokens: &[Token]) -> Option<(String, usize)> {
    let first = tokens.first()?;
    if first.kind == TokenKind::String {
        return Some((first.text.clone(), 1));
    }
    if !first.is_operator("<") {
        return None;
    }
    let mut path = String::new();
    for (idx, token) in tokens.iter().enumerate().skip(1) {
        if token.is_eof() || token.line != first.line {
            return None;
        }
        if token.is_operator(">") {
            return Some((path, idx + 1));
        }
        path.push_str(&token.text);
    }
    None
}
