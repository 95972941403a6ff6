/// Token-stream helpers and balanced skipping.
///
/// This chunk contains the low-level primitives used throughout scanning:
/// - Peeking/consuming tokens (`peek`, `peek_at`, `advance`)
/// - Diagnostics (`report`, `fail`)
/// - Balanced-delimiter and statement skipping (`skip_group`, `skip_statement`, `skip_through_semicolon`)
/// - Labels and attribute instances
impl<'p> Scanner<'p> {
    // ========================================================================
    // Cursor
    // ========================================================================

    fn is_at_end(&self) -> bool {
        self.peek().is_eof()
    }

    /// Current token. The stream always ends with `Eof`, which is never consumed.
    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    /// Token `n` positions ahead, clamped to `Eof`.
    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    /// Kind and line of the current token.
    fn current(&self) -> (TokenKind, u32) {
        let token = self.peek();
        (token.kind, token.line)
    }

    fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).map(|i| &self.tokens[i])
    }

    /// Consume and return the current token; at `Eof` the cursor stays put.
    fn advance(&mut self) -> &Token {
        let idx = self.pos;
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[idx]
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().is_punctuation(id)
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check_module_keyword(&self) -> bool {
        matches!(
            self.peek().kind,
            TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule)
        )
    }

    // ========================================================================
    // Diagnostics
    // ========================================================================

    fn emit(&mut self, file: &Arc<str>, event: ScanEvent) {
        self.events.push(Located {
            file: Arc::clone(file),
            event,
        });
    }

    fn report(&mut self, line: u32, kind: DiagnosticKind) {
        let file = Arc::clone(&self.peek().file);
        self.diagnostics.push(Diagnostic::new(file, line, kind));
    }

    /// Record a fatal diagnostic and drop all open scopes.
    fn fail(&mut self, line: u32, kind: DiagnosticKind) -> Halt {
        debug_assert!(kind.is_fatal());
        self.report(line, kind);
        self.scopes.clear();
        Halt
    }

    // ========================================================================
    // Balanced skipping
    // ========================================================================

    /// Skip a balanced `(...)`, `[...]` or `{...}` group starting at the current token.
    ///
    /// Does nothing if the current token is not an opening delimiter. A mismatched closer, or a
    /// `module`/`endmodule`/end of file inside the group, is fatal.
    fn skip_group(&mut self) -> Step {
        let mut open: Vec<(PunctuationId, u32)> = Vec::new();
        loop {
            let (kind, line) = self.current();
            match kind {
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => {
                    open.push((p, line));
                    self.advance();
                }
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    let Some((opener, _)) = open.pop() else {
                        return Ok(());
                    };
                    if punctuation::matching_close(opener) != Some(p) {
                        let expected = punctuation::matching_close(opener)
                            .map(punctuation::as_str)
                            .unwrap_or_default()
                            .to_string();
                        let found = punctuation::as_str(p).to_string();
                        return Err(self.fail(line, DiagnosticKind::MismatchedDelimiter { expected, found }));
                    }
                    self.advance();
                }
                TokenKind::Eof | TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule | KeywordId::Endmodule)
                    if !open.is_empty() =>
                {
                    let (opener, open_line) = open[open.len() - 1];
                    let open_text = punctuation::as_str(opener).to_string();
                    return Err(self.fail(open_line, DiagnosticKind::UnterminatedDelimiter { open: open_text }));
                }
                _ if open.is_empty() => return Ok(()),
                _ => {
                    self.advance();
                }
            }
            if open.is_empty() {
                return Ok(());
            }
        }
    }

    /// Skip one statement through its `;`.
    ///
    /// Stops *before* a keyword that starts a new structural item (so a missing `;` cannot swallow the
    /// next block), and always consumes at least one token.
    fn skip_statement(&mut self) -> Step {
        let start = self.pos;
        loop {
            let (kind, line) = self.current();
            match kind {
                TokenKind::Eof => return Ok(()),
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => self.skip_group()?,
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    let found = punctuation::as_str(p).to_string();
                    return Err(self.fail(line, DiagnosticKind::UnbalancedDelimiter { found }));
                }
                TokenKind::Keyword(id) if self.pos > start && is_statement_boundary(id) => return Ok(()),
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip through the next `;` at delimiter depth zero, ignoring statement boundaries other than
    /// `module`/`endmodule`. Used for items that may legally contain `function`, `class`, … keywords
    /// (`import "DPI-C" function …;`, `typedef class c;`).
    fn skip_through_semicolon(&mut self) -> Step {
        loop {
            let (kind, line) = self.current();
            match kind {
                TokenKind::Eof | TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule | KeywordId::Endmodule) => {
                    return Ok(());
                }
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    self.advance();
                    return Ok(());
                }
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => self.skip_group()?,
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    let found = punctuation::as_str(p).to_string();
                    return Err(self.fail(line, DiagnosticKind::UnbalancedDelimiter { found }));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Labels and attributes
    // ========================================================================

    /// Skip `: label` after `begin`, `end`, `endmodule`, `endgenerate`, … if present.
    fn skip_block_label(&mut self) {
        if self.check_punct(PunctuationId::Colon) && self.peek_at(1).is_identifier() {
            self.advance();
            self.advance();
        }
    }

    /// Skip a leading statement label `name :`.
    fn skip_statement_label(&mut self) {
        if self.peek().is_identifier() && self.peek_at(1).is_punctuation(PunctuationId::Colon) {
            self.advance();
            self.advance();
        }
    }

    /// Skip a case item label (`8, 16:`, `default:`) at the start of an item in a generate `case`.
    ///
    /// Looks ahead for a `:` at delimiter depth zero before anything that ends or opens an item.
    fn skip_case_item_label(&mut self) {
        if self.check_keyword(KeywordId::Default) {
            self.advance();
            self.match_punct(PunctuationId::Colon);
            return;
        }
        let mut depth = 0usize;
        let mut i = self.pos;
        while i < self.tokens.len() {
            let token = &self.tokens[i];
            match token.kind {
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => depth += 1,
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                }
                TokenKind::Punctuation(PunctuationId::Colon) if depth == 0 => {
                    if i > self.pos {
                        self.pos = i + 1;
                    }
                    return;
                }
                TokenKind::Punctuation(PunctuationId::Semicolon) if depth == 0 => return,
                TokenKind::Keyword(_) | TokenKind::Eof if depth == 0 => return,
                TokenKind::Eof => return,
                _ => {}
            }
            i += 1;
        }
    }

    /// Skip attribute instances `(* ... *)`.
    fn skip_attributes(&mut self) {
        while self.check_punct(PunctuationId::LParen)
            && self.peek_at(1).is_operator("*")
            && !self.peek_at(2).is_punctuation(PunctuationId::RParen)
        {
            self.advance();
            self.advance();
            loop {
                if self.is_at_end() {
                    return;
                }
                if self.peek().is_operator("*") && self.peek_at(1).is_punctuation(PunctuationId::RParen) {
                    self.advance();
                    self.advance();
                    break;
                }
                self.advance();
            }
        }
    }
}

/// Keywords that start a new structural item; statement skipping never runs past them.
fn is_statement_boundary(id: KeywordId) -> bool {
    matches!(
        id,
        KeywordId::Module
            | KeywordId::Macromodule
            | KeywordId::Endmodule
            | KeywordId::Endinterface
            | KeywordId::Begin
            | KeywordId::End
            | KeywordId::Generate
            | KeywordId::Endgenerate
            | KeywordId::Endcase
            | KeywordId::Function
            | KeywordId::Task
            | KeywordId::Clocking
            | KeywordId::Covergroup
    ) || keywords::category(id) == KeywordCategory::Procedural
}
