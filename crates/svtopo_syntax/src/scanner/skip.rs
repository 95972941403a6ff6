/// Wholesale skipping of constructs that never contain module instantiations.
///
/// - Design units and module items with a closing keyword (`package … endpackage`, `function … endfunction`)
/// - Procedural blocks (`always`, `initial`, `final`), skipped statement-wise with a closer stack
/// - Clocking blocks, which only sometimes have a body
impl<'p> Scanner<'p> {
    /// Skip the unit opened by the current keyword through its closer.
    fn skip_unit(&mut self) -> Step {
        let (kind, line) = self.current();
        self.advance();
        match kind {
            TokenKind::Keyword(opener) => self.skip_to_closer(opener, line),
            _ => Ok(()),
        }
    }

    /// Advance past the keyword closing `opener` (and its label).
    ///
    /// Reaching `module`, `endmodule` or end of file first means the unit is unterminated, which is fatal.
    fn skip_to_closer(&mut self, opener: KeywordId, line: u32) -> Step {
        loop {
            let (kind, _) = self.current();
            match kind {
                TokenKind::Keyword(id) if keywords::closes(opener, id) => {
                    self.advance();
                    self.skip_block_label();
                    return Ok(());
                }
                TokenKind::Eof
                | TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule | KeywordId::Endmodule) => {
                    let kind = DiagnosticKind::UnterminatedBlock {
                        opener: keywords::as_str(opener).to_string(),
                        closer: keywords::closer(opener).map(keywords::as_str).unwrap_or_default().to_string(),
                    };
                    return Err(self.fail(line, kind));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Skip the statement of a procedural block; the `always`/`initial`/`final` keyword is already
    /// consumed.
    ///
    /// Nested `begin`/`fork`/`case` blocks are tracked on a local closer stack; the statement ends at a `;`
    /// or a closer that empties the stack, unless an `else` continues it.
    fn skip_procedural(&mut self) -> Step {
        let mut blocks: Vec<(KeywordId, u32)> = Vec::new();
        loop {
            let (kind, line) = self.current();
            match kind {
                TokenKind::Eof
                | TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule | KeywordId::Endmodule) => {
                    let Some(&(opener, open_line)) = blocks.last() else {
                        return Ok(());
                    };
                    let kind = DiagnosticKind::UnterminatedBlock {
                        opener: keywords::as_str(opener).to_string(),
                        closer: keywords::closer(opener).map(keywords::as_str).unwrap_or_default().to_string(),
                    };
                    return Err(self.fail(open_line, kind));
                }
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => self.skip_group()?,
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    let found = punctuation::as_str(p).to_string();
                    return Err(self.fail(line, DiagnosticKind::UnbalancedDelimiter { found }));
                }
                TokenKind::Keyword(KeywordId::Fork) if self.previous().is_some_and(is_fork_control) => {
                    // `wait fork;` / `disable fork;` open nothing.
                    self.advance();
                }
                TokenKind::Keyword(
                    id @ (KeywordId::Begin
                    | KeywordId::Fork
                    | KeywordId::Case
                    | KeywordId::Casex
                    | KeywordId::Casez
                    | KeywordId::Randcase
                    | KeywordId::Randsequence),
                ) => {
                    blocks.push((id, line));
                    self.advance();
                }
                TokenKind::Keyword(
                    id @ (KeywordId::End
                    | KeywordId::Join
                    | KeywordId::JoinAny
                    | KeywordId::JoinNone
                    | KeywordId::Endcase
                    | KeywordId::Endsequence),
                ) => {
                    let Some(&(opener, _)) = blocks.last() else {
                        // Belongs to an enclosing scope; the statement ended without `;`.
                        return Ok(());
                    };
                    self.advance();
                    if keywords::closes(opener, id) {
                        blocks.pop();
                    } else {
                        let keyword = keywords::as_str(id).to_string();
                        self.report(line, DiagnosticKind::StrayEnd { keyword });
                    }
                    self.skip_block_label();
                    if blocks.is_empty() && !self.check_keyword(KeywordId::Else) {
                        return Ok(());
                    }
                }
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    self.advance();
                    if blocks.is_empty() && !self.check_keyword(KeywordId::Else) {
                        return Ok(());
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// `[default] clocking [name] @(...); ... endclocking`, or a bodiless `default clocking name;`.
    fn clocking_block(&mut self) -> Step {
        if self.clocking_has_event() {
            self.skip_unit()
        } else {
            self.advance();
            self.skip_through_semicolon()
        }
    }

    /// Look ahead from `clocking` for an `@` before the first `;`.
    fn clocking_has_event(&self) -> bool {
        self.tokens[self.pos..]
            .iter()
            .take_while(|t| !t.is_punctuation(PunctuationId::Semicolon) && !t.is_eof())
            .any(|t| t.is_punctuation(PunctuationId::At))
    }
}

fn is_fork_control(token: &Token) -> bool {
    token.kind == TokenKind::Ident && matches!(token.text.as_str(), "wait" | "disable")
}
