//! Lexer for SystemVerilog source.
//!
//! Handles tokenization including:
//! - Structural keywords (module, endmodule, generate, begin, …) as registry IDs
//! - Simple, escaped and system identifiers
//! - Compiler directives (`` `include ``, `` `define ``, macro usages)
//! - Numeric literals (sized, based, real, time) and string literals, consumed whole
//! - Punctuation and operators
//!
//! Comments are discarded. The lexer never fails: an unrecognised character becomes an
//! [`TokenKind::Unknown`] token and lexing continues.
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)

pub mod tokens;

use std::sync::Arc;

pub use tokens::{Token, TokenKind, keyword_id, punctuation_id};

use svtopo_core::lang::punctuation::PunctuationId;

/// Directives whose arguments run to the end of the (logical) line.
const LINE_DIRECTIVES: &[&str] = &[
    "define",
    "timescale",
    "default_nettype",
    "line",
    "pragma",
    "begin_keywords",
    "unconnected_drive",
    "default_decay_time",
    "default_trireg_strength",
    "delay_mode_distributed",
];

/// Directives that take exactly one macro-name argument.
const NAME_DIRECTIVES: &[&str] = &["ifdef", "ifndef", "elsif", "undef"];

/// Lexer for one SystemVerilog source text.
///
/// Implements [`Iterator`]: tokens are produced lazily, the last one is always [`TokenKind::Eof`], after
/// which the iterator is exhausted. Re-lexing means constructing a new lexer over the same input.
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    file: Arc<str>,
    line: u32,
    column: u32,
    finished: bool,
}

/// Create a lazy lexer over `source`, attributing tokens to `file`.
pub fn lex<'a>(source: &'a str, file: impl Into<Arc<str>>) -> Lexer<'a> {
    Lexer::new(source, file.into())
}

/// Tokenize the whole of `source`. The result always ends with an `Eof` token.
#[tracing::instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn tokenize(source: &str, file: impl Into<Arc<str>>) -> Vec<Token> {
    let tokens: Vec<Token> = lex(source, file).collect();
    tracing::trace!(count = tokens.len(), "tokenized");
    tokens
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str, file: Arc<str>) -> Self {
        Self {
            source,
            pos: 0,
            file,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.advance();
        }
    }

    fn token(&self, kind: TokenKind, text: impl Into<String>, line: u32, column: u32) -> Token {
        Token::new(kind, text, Arc::clone(&self.file), line, column)
    }

    // ========================================================================
    // Trivia
    // ========================================================================

    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(), self.peek_nth(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => self.advance_while(|c| c != '\n'),
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    /// Consume a `/* ... */` comment starting at the current `/`.
    /// Unterminated block comments run to end of input.
    fn skip_block_comment(&mut self) {
        self.advance();
        self.advance();
        while let Some(c) = self.advance() {
            if c == '*' && self.peek() == Some('/') {
                self.advance();
                break;
            }
        }
    }

    /// Consume the rest of a logical line, honouring `\` continuations.
    ///
    /// A block comment inside the line is consumed whole, even across newlines; a `//` comment ends
    /// the line.
    fn skip_logical_line(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => return,
                '/' if self.peek_nth(1) == Some('*') => self.skip_block_comment(),
                '/' if self.peek_nth(1) == Some('/') => {
                    self.advance_while(|c| c != '\n');
                    return;
                }
                '\\' if self.peek_nth(1) == Some('\n') => {
                    self.advance();
                    self.advance();
                }
                '\\' if self.peek_nth(1) == Some('\r') && self.peek_nth(2) == Some('\n') => {
                    self.advance();
                    self.advance();
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) -> Token {
        let (line, column) = (self.line, self.column);
        let start = self.pos;

        let Some(c) = self.advance() else {
            return self.token(TokenKind::Eof, "", line, column);
        };

        match c {
            c if is_ident_start(c) => {
                self.advance_while(is_ident_continue);
                let text = &self.source[start..self.pos];
                match keyword_id(text) {
                    Some(id) => self.token(TokenKind::Keyword(id), text, line, column),
                    None => self.token(TokenKind::Ident, text, line, column),
                }
            }

            '\\' => match self.peek() {
                Some(next) if !next.is_whitespace() => {
                    let name_start = self.pos;
                    self.advance_while(|c| !c.is_whitespace());
                    let text = &self.source[name_start..self.pos];
                    self.token(TokenKind::EscapedIdent, text, line, column)
                }
                _ => self.token(TokenKind::Unknown, "\\", line, column),
            },

            '$' => match self.peek() {
                Some(next) if is_ident_start(next) => {
                    self.advance_while(is_ident_continue);
                    self.token(TokenKind::SystemIdent, &self.source[start..self.pos], line, column)
                }
                _ => self.token(TokenKind::Operator, "$", line, column),
            },

            '`' => self.scan_directive(line, column),

            '"' => self.scan_string(line, column),

            c if c.is_ascii_digit() => self.scan_number(start, line, column),

            '\'' => self.scan_apostrophe(start, line, column),

            ':' => match self.peek() {
                Some(':') => {
                    self.advance();
                    self.punct(PunctuationId::ColonColon, line, column)
                }
                Some(next @ ('=' | '/')) => {
                    self.advance();
                    self.token(TokenKind::Operator, format!(":{next}"), line, column)
                }
                _ => self.punct(PunctuationId::Colon, line, column),
            },

            '#' if self.peek() == Some('#') => {
                self.advance();
                self.token(TokenKind::Operator, "##", line, column)
            }

            '(' | ')' | '[' | ']' | '{' | '}' | ';' | ',' | '.' | '#' | '@' => {
                match punctuation_id(&self.source[start..self.pos]) {
                    Some(id) => self.punct(id, line, column),
                    None => self.token(TokenKind::Unknown, c.to_string(), line, column),
                }
            }

            '+' | '-' | '*' | '/' | '%' | '<' | '>' | '=' | '!' | '&' | '|' | '^' | '~' | '?' => {
                self.token(TokenKind::Operator, c.to_string(), line, column)
            }

            other => self.token(TokenKind::Unknown, other.to_string(), line, column),
        }
    }

    fn punct(&self, id: PunctuationId, line: u32, column: u32) -> Token {
        self.token(TokenKind::Punctuation(id), tokens::punctuation_text(id), line, column)
    }

    // ========================================================================
    // Directives, literals
    // ========================================================================

    fn scan_directive(&mut self, line: u32, column: u32) -> Token {
        if !self.peek().is_some_and(is_ident_start) {
            return self.token(TokenKind::Unknown, "`", line, column);
        }
        let name_start = self.pos;
        self.advance_while(is_ident_continue);
        let name = &self.source[name_start..self.pos];

        if LINE_DIRECTIVES.contains(&name) {
            self.skip_logical_line();
        } else if NAME_DIRECTIVES.contains(&name) {
            self.advance_while(|c| c == ' ' || c == '\t');
            self.advance_while(is_ident_continue);
        }
        self.token(TokenKind::Directive, name, line, column)
    }

    fn scan_string(&mut self, line: u32, column: u32) -> Token {
        let content_start = self.pos;
        loop {
            match self.peek() {
                None | Some('\n') => {
                    let text = &self.source[content_start..self.pos];
                    return self.token(TokenKind::String, text, line, column);
                }
                Some('"') => {
                    let text = &self.source[content_start..self.pos];
                    self.advance();
                    return self.token(TokenKind::String, text, line, column);
                }
                Some('\\') => {
                    self.advance();
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    fn scan_number(&mut self, start: usize, line: u32, column: u32) -> Token {
        self.advance_while(|c| c.is_ascii_digit() || c == '_');
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit() || c == '_');
        }
        // Exponent, time unit (`10ns`) or other alphanumeric suffix.
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_');
        if self.source[start..self.pos].ends_with(['e', 'E'])
            && matches!(self.peek(), Some('+' | '-'))
            && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        if self.peek() == Some('\'') && self.at_base_specifier(1) {
            self.advance();
            self.scan_based_digits();
        }
        self.token(TokenKind::Number, &self.source[start..self.pos], line, column)
    }

    /// Called after a lone `'`: a based literal (`'hFF`), an unbased unsized literal (`'0`), or an operator
    /// (casts, assignment patterns).
    fn scan_apostrophe(&mut self, start: usize, line: u32, column: u32) -> Token {
        if self.at_base_specifier(0) {
            self.scan_based_digits();
            return self.token(TokenKind::Number, &self.source[start..self.pos], line, column);
        }
        if matches!(self.peek(), Some('0' | '1' | 'x' | 'X' | 'z' | 'Z'))
            && !self.peek_nth(1).is_some_and(is_ident_continue)
        {
            self.advance();
            return self.token(TokenKind::Number, &self.source[start..self.pos], line, column);
        }
        self.token(TokenKind::Operator, "'", line, column)
    }

    /// `true` if the characters from offset `at` form `[sS]?[bodhBODH]`.
    fn at_base_specifier(&self, at: usize) -> bool {
        let is_base = |c: Option<char>| matches!(c, Some('b' | 'o' | 'd' | 'h' | 'B' | 'O' | 'D' | 'H'));
        match self.peek_nth(at) {
            Some('s' | 'S') => is_base(self.peek_nth(at + 1)),
            c => is_base(c),
        }
    }

    fn scan_based_digits(&mut self) {
        if matches!(self.peek(), Some('s' | 'S')) {
            self.advance();
        }
        self.advance();
        self.advance_while(|c| c == ' ' || c == '\t');
        self.advance_while(|c| c.is_ascii_alphanumeric() || c == '_' || c == '?');
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        self.skip_trivia();
        let token = self.scan_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;
    use svtopo_core::lang::keywords::KeywordId;

    fn kinds(src: &str) -> Vec<TokenKind> {
        tokenize(src, "t.sv").into_iter().map(|t| t.kind).collect()
    }

    fn texts(src: &str) -> Vec<String> {
        tokenize(src, "t.sv")
            .into_iter()
            .filter(|t| t.kind != TokenKind::Eof)
            .map(|t| t.text)
            .collect()
    }

    #[test]
    fn test_module_header() {
        assert_eq!(
            kinds("module top(input a);"),
            vec![
                TokenKind::Keyword(KeywordId::Module),
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::LParen),
                TokenKind::Keyword(KeywordId::Input),
                TokenKind::Ident,
                TokenKind::Punctuation(PunctuationId::RParen),
                TokenKind::Punctuation(PunctuationId::Semicolon),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_eof_is_last_and_iterator_ends() {
        let mut lexer = lex("", "t.sv");
        assert_eq!(lexer.next().map(|t| t.kind), Some(TokenKind::Eof));
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_comments_are_discarded() {
        let src = "// module fake;\nmodule /* endmodule */ real; endmodule";
        assert_eq!(texts(src), vec!["module", "real", ";", "endmodule"]);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_eof() {
        assert_eq!(kinds("a /* b c"), vec![TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_positions_track_lines_and_columns() {
        let tokens = tokenize("module m;\n  sub u();\nendmodule", "t.sv");
        let sub = tokens.iter().find(|t| t.text == "sub").map(|t| (t.line, t.column));
        assert_eq!(sub, Some((2, 3)));
        let end = tokens.iter().find(|t| t.text == "endmodule").map(|t| (t.line, t.column));
        assert_eq!(end, Some((3, 1)));
        assert!(tokens.iter().all(|t| &*t.file == "t.sv"));
    }

    #[test]
    fn test_escaped_identifier_drops_backslash() {
        let tokens = tokenize("\\cpu[3] u();", "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::EscapedIdent);
        assert_eq!(tokens[0].text, "cpu[3]");
        assert_eq!(tokens[1].text, "u");
    }

    #[test]
    fn test_lone_backslash_is_unknown() {
        assert_eq!(kinds("\\ x"), vec![TokenKind::Unknown, TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_reserved_non_structural_words_are_identifiers() {
        assert_eq!(kinds("wire logic"), vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]);
    }

    #[test]
    fn test_system_identifiers() {
        let tokens = tokenize("$display $", "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::SystemIdent);
        assert_eq!(tokens[0].text, "$display");
        assert_eq!(tokens[1].kind, TokenKind::Operator);
    }

    #[test]
    fn test_numbers_are_single_tokens() {
        let src = "8'hFF 4'b10_10 'd12 12 1.5e-3 10ns 'x '1 8'sh7F 4'b 0101";
        let tokens = tokenize(src, "t.sv");
        let numbers: Vec<_> = tokens.iter().filter(|t| t.kind == TokenKind::Number).map(|t| t.text.as_str()).collect();
        assert_eq!(
            numbers,
            vec!["8'hFF", "4'b10_10", "'d12", "12", "1.5e-3", "10ns", "'x", "'1", "8'sh7F", "4'b 0101"]
        );
        assert_eq!(tokens.len(), numbers.len() + 1);
    }

    #[test]
    fn test_apostrophe_cast_is_operator() {
        assert_eq!(texts("int'(x)"), vec!["int", "'", "(", "x", ")"]);
        assert_eq!(texts("'{a}"), vec!["'", "{", "a", "}"]);
    }

    #[test]
    fn test_strings_are_consumed_whole() {
        let tokens = tokenize(r#""a ( b \" ; c" x"#, "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, r#"a ( b \" ; c"#);
        assert_eq!(tokens[1].text, "x");
    }

    #[test]
    fn test_unterminated_string_stops_at_newline() {
        let tokens = tokenize("\"oops\nmodule", "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[1].kind, TokenKind::Keyword(KeywordId::Module));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_define_consumes_logical_line() {
        let src = "`define WIDTH(x) \\\n  (x + 1)\nmodule m;";
        let tokens = tokenize(src, "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text, "define");
        assert_eq!(tokens[1].kind, TokenKind::Keyword(KeywordId::Module));
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_define_body_block_comment_spans_lines() {
        let src = "`define W 8 /* width\n   of bus; see endmodule notes */\n  sub u_sub ();";
        let tokens = tokenize(src, "t.sv");
        assert_eq!(texts(src), vec!["define", "sub", "u_sub", "(", ")", ";"]);
        assert_eq!(tokens[1].line, 3);
    }

    #[test]
    fn test_define_line_comment_ends_the_line() {
        let src = "`define W 8 // trailing \\\nendmodule";
        let tokens = tokenize(src, "t.sv");
        assert_eq!(tokens[1].kind, TokenKind::Keyword(KeywordId::Endmodule));
        assert_eq!(tokens[1].line, 2);
    }

    #[test]
    fn test_conditional_directives_consume_their_name() {
        assert_eq!(texts("`ifdef SIM module `else module `endif"), vec![
            "ifdef", "module", "else", "module", "endif"
        ]);
    }

    #[test]
    fn test_include_keeps_its_argument() {
        let tokens = tokenize("`include \"defs.svh\"", "t.sv");
        assert_eq!(tokens[0].kind, TokenKind::Directive);
        assert_eq!(tokens[0].text, "include");
        assert_eq!(tokens[1].kind, TokenKind::String);
        assert_eq!(tokens[1].text, "defs.svh");
    }

    #[test]
    fn test_colon_family() {
        assert_eq!(
            kinds(": :: := :/"),
            vec![
                TokenKind::Punctuation(PunctuationId::Colon),
                TokenKind::Punctuation(PunctuationId::ColonColon),
                TokenKind::Operator,
                TokenKind::Operator,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_hash_and_cycle_delay() {
        assert_eq!(
            kinds("# ##"),
            vec![TokenKind::Punctuation(PunctuationId::Hash), TokenKind::Operator, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unknown_characters_do_not_stop_lexing() {
        assert_eq!(
            kinds("a ¤ ` b"),
            vec![TokenKind::Ident, TokenKind::Unknown, TokenKind::Unknown, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_lexing_is_restartable() {
        let src = "module a; b c(); endmodule";
        assert_eq!(tokenize(src, "t.sv"), tokenize(src, "t.sv"));
    }
}
