/// Top-level and module-body items.
///
/// This chunk holds the two dispatch functions of the scan loop (`top_level_item` outside any module,
/// `module_item` inside one) and the handlers for module headers, block nesting and directives.
impl<'p> Scanner<'p> {
    // ========================================================================
    // Outside any module
    // ========================================================================

    fn top_level_item(&mut self) -> Step {
        self.skip_attributes();
        let (kind, line) = self.current();
        match kind {
            TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule) => self.module_declaration(),
            TokenKind::Keyword(KeywordId::Interface) => self.interface_declaration(),
            TokenKind::Keyword(KeywordId::Bind) => self.bind_directive(),
            TokenKind::Keyword(KeywordId::Extern) => self.skip_extern(),
            TokenKind::Keyword(KeywordId::Import | KeywordId::Export | KeywordId::Typedef) => {
                self.advance();
                self.skip_through_semicolon()
            }
            TokenKind::Keyword(KeywordId::Endmodule) => {
                self.report(line, DiagnosticKind::StrayEndmodule);
                self.advance();
                self.skip_block_label();
                Ok(())
            }
            TokenKind::Keyword(id) if is_unit_opener(id) => self.skip_unit(),
            TokenKind::Directive => self.directive(),
            _ => {
                self.advance();
                Ok(())
            }
        }
    }

    /// `module [lifetime] NAME header ;`: records the declaration and pushes a module scope.
    fn module_declaration(&mut self) -> Step {
        self.advance();
        if self.check_keyword(KeywordId::Static) || self.check_keyword(KeywordId::Automatic) {
            self.advance();
        }
        if !self.peek().is_identifier() {
            // `module` without a name: nothing to record, the rest is noise.
            return Ok(());
        }
        let name_token = self.advance();
        let (name, line, file) = (name_token.text.clone(), name_token.line, Arc::clone(&name_token.file));
        tracing::trace!(%name, line, "module declared");

        self.emit(&file, ScanEvent::ModuleDeclared { name: name.clone(), line });
        self.scopes.push(Scope::Module { name: name.clone(), line });
        let (file, header_end) = self.skip_header(&name, line)?;
        self.emit(&file, ScanEvent::ModuleHeaderEnd { line: header_end });
        Ok(())
    }

    /// Skip package imports, parameter ports and the port list through the header's `;`.
    ///
    /// Returns the file and line of that `;`.
    fn skip_header(&mut self, name: &str, line: u32) -> Result<(Arc<str>, u32), Halt> {
        loop {
            let (kind, token_line) = self.current();
            match kind {
                TokenKind::Punctuation(PunctuationId::Semicolon) => {
                    let file = Arc::clone(&self.advance().file);
                    return Ok((file, token_line));
                }
                TokenKind::Keyword(KeywordId::Import) => {
                    self.advance();
                    self.skip_through_semicolon()?;
                }
                TokenKind::Punctuation(p) if punctuation::is_open_delimiter(p) => self.skip_group()?,
                TokenKind::Punctuation(p) if punctuation::is_close_delimiter(p) => {
                    let found = punctuation::as_str(p).to_string();
                    return Err(self.fail(token_line, DiagnosticKind::UnbalancedDelimiter { found }));
                }
                TokenKind::Eof
                | TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule | KeywordId::Endmodule) => {
                    let name = name.to_string();
                    return Err(self.fail(line, DiagnosticKind::UnterminatedHeader { name }));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    // ========================================================================
    // Inside a module body
    // ========================================================================

    fn module_item(&mut self) -> Step {
        self.skip_attributes();
        if self.in_case_block() {
            self.skip_case_item_label();
        } else {
            self.skip_statement_label();
        }

        let (kind, line) = self.current();
        match kind {
            TokenKind::Keyword(KeywordId::Endmodule) => {
                self.end_module();
                Ok(())
            }
            TokenKind::Keyword(KeywordId::Endinterface) if self.in_interface() => {
                self.end_interface();
                Ok(())
            }
            TokenKind::Keyword(KeywordId::Module | KeywordId::Macromodule) => self.module_declaration(),
            TokenKind::Keyword(KeywordId::Generate) => {
                self.advance();
                self.scopes.push(Scope::Block {
                    opener: KeywordId::Generate,
                    line,
                });
                Ok(())
            }
            TokenKind::Keyword(KeywordId::Begin) => {
                self.advance();
                self.skip_block_label();
                self.scopes.push(Scope::Block {
                    opener: KeywordId::Begin,
                    line,
                });
                Ok(())
            }
            TokenKind::Keyword(id @ (KeywordId::Case | KeywordId::Casex | KeywordId::Casez)) => {
                self.advance();
                self.skip_group()?;
                self.scopes.push(Scope::Block { opener: id, line });
                Ok(())
            }
            TokenKind::Keyword(id @ (KeywordId::End | KeywordId::Endgenerate | KeywordId::Endcase)) => {
                self.close_block(id, line);
                Ok(())
            }
            TokenKind::Keyword(KeywordId::If | KeywordId::For | KeywordId::Foreach | KeywordId::While | KeywordId::Repeat) => {
                self.advance();
                self.skip_group()
            }
            TokenKind::Keyword(KeywordId::Else) => {
                self.advance();
                Ok(())
            }
            TokenKind::Keyword(_) if kind.is_keyword_in(KeywordCategory::Procedural) => {
                self.advance();
                self.skip_procedural()
            }
            TokenKind::Keyword(KeywordId::Default) if self.peek_at(1).is_keyword(KeywordId::Clocking) => {
                self.advance();
                self.clocking_block()
            }
            TokenKind::Keyword(KeywordId::Clocking) => self.clocking_block(),
            TokenKind::Keyword(KeywordId::Interface) => self.interface_declaration(),
            TokenKind::Keyword(KeywordId::Bind) => self.bind_directive(),
            TokenKind::Keyword(KeywordId::Extern) => self.skip_extern(),
            TokenKind::Keyword(KeywordId::Import | KeywordId::Export | KeywordId::Typedef) => {
                self.advance();
                self.skip_through_semicolon()
            }
            TokenKind::Keyword(id) if is_unit_opener(id) => self.skip_unit(),
            TokenKind::Keyword(id) if is_unit_closer(id) => {
                // Closer of a unit we never saw open (e.g. after `global clocking`); ignore it.
                self.advance();
                self.skip_block_label();
                Ok(())
            }
            TokenKind::Keyword(_) => {
                self.advance();
                self.skip_statement()
            }
            TokenKind::Directive => self.directive(),
            TokenKind::Ident | TokenKind::EscapedIdent => self.instantiation_or_statement(),
            TokenKind::Punctuation(PunctuationId::Semicolon) => {
                self.advance();
                Ok(())
            }
            _ => self.skip_statement(),
        }
    }

    /// Name of the innermost open module or interface.
    fn enclosing_unit(&self) -> Option<&str> {
        self.scopes.iter().rev().find_map(Scope::unit_name)
    }

    /// Return `true` if the innermost module or interface scope is an interface.
    fn in_interface(&self) -> bool {
        matches!(
            self.scopes.iter().rev().find(|s| s.unit_name().is_some()),
            Some(Scope::Interface { .. })
        )
    }

    fn in_case_block(&self) -> bool {
        matches!(
            self.scopes.last(),
            Some(Scope::Block {
                opener: KeywordId::Case | KeywordId::Casex | KeywordId::Casez,
                ..
            })
        )
    }

    /// Close the innermost block that `closer` terminates, implicitly closing blocks opened after it.
    fn close_block(&mut self, closer: KeywordId, line: u32) {
        self.advance();
        let found = self
            .scopes
            .iter()
            .rposition(|s| s.unit_name().is_some() || matches!(s, Scope::Block { opener, .. } if keywords::closes(*opener, closer)));
        match found {
            Some(idx) if matches!(self.scopes[idx], Scope::Block { .. }) => self.scopes.truncate(idx),
            _ => {
                let keyword = keywords::as_str(closer).to_string();
                self.report(line, DiagnosticKind::StrayEnd { keyword });
            }
        }
        self.skip_block_label();
    }

    /// `endmodule [: label]`: closes the innermost module, warning about blocks left open inside it.
    fn end_module(&mut self) {
        let token = self.advance();
        let (line, file) = (token.line, Arc::clone(&token.file));
        let Some(idx) = self.scopes.iter().rposition(|s| matches!(s, Scope::Module { .. })) else {
            self.report(line, DiagnosticKind::StrayEndmodule);
            self.skip_block_label();
            return;
        };
        let open_blocks = self.scopes.len() - idx - 1;
        let Some(Scope::Module { name, .. }) = self.scopes.drain(idx..).next() else {
            return;
        };
        if open_blocks > 0 {
            self.report(
                line,
                DiagnosticKind::UnclosedBlocks {
                    name: name.clone(),
                    count: open_blocks,
                },
            );
        }
        self.emit(&file, ScanEvent::ModuleEnd { name, line });
        self.skip_block_label();
    }

    // ========================================================================
    // Design units other than modules
    // ========================================================================

    /// `interface NAME header ; ... endinterface`: recorded, then its body is scanned like a module body.
    ///
    /// `interface class` and nameless interfaces are skipped.
    fn interface_declaration(&mut self) -> Step {
        if self.peek_at(1).is_keyword(KeywordId::Class) {
            self.advance();
            return self.skip_unit();
        }
        let line = self.advance().line;
        if self.check_keyword(KeywordId::Static) || self.check_keyword(KeywordId::Automatic) {
            self.advance();
        }
        if !self.peek().is_identifier() {
            return self.skip_to_closer(KeywordId::Interface, line);
        }
        let token = self.advance();
        let (name, name_line, file) = (token.text.clone(), token.line, Arc::clone(&token.file));
        self.emit(&file, ScanEvent::InterfaceDeclared { name: name.clone(), line: name_line });
        self.scopes.push(Scope::Interface { name: name.clone(), line: name_line });
        self.skip_header(&name, name_line)?;
        Ok(())
    }

    /// `endinterface [: label]`: closes the innermost interface and any blocks left open inside it.
    fn end_interface(&mut self) {
        self.advance();
        if let Some(idx) = self.scopes.iter().rposition(|s| matches!(s, Scope::Interface { .. })) {
            self.scopes.truncate(idx);
        }
        self.skip_block_label();
    }

    /// `extern module NAME (...);` prototypes and other `extern` declarations.
    fn skip_extern(&mut self) -> Step {
        self.advance();
        if self.check_module_keyword() {
            self.advance();
        }
        self.skip_through_semicolon()
    }

    // ========================================================================
    // Directives
    // ========================================================================

    /// Handle a compiler directive token: record `` `include ``, skip macro-usage arguments.
    fn directive(&mut self) -> Step {
        let token = self.advance();
        let (name, line, file) = (token.text.clone(), token.line, Arc::clone(&token.file));
        match name.as_str() {
            "include" => {
                if let Some(path) = self.include_path() {
                    self.emit(&file, ScanEvent::Include { path, line });
                }
                Ok(())
            }
            name if is_compiler_directive(name) => Ok(()),
            _ => {
                // Macro usage: `FOO(args) consumes its argument list when it follows immediately.
                if self.check_punct(PunctuationId::LParen) && self.peek().line == line {
                    self.skip_group()?;
                }
                Ok(())
            }
        }
    }

    /// Read `"file"` or `<file>` after `` `include ``.
    fn include_path(&mut self) -> Option<String> {
        let (path, len) = include_target(&self.tokens[self.pos..])?;
        self.pos += len;
        Some(path)
    }
}

/// Openers of units and items that are skipped wholesale up to their closing keyword.
fn is_unit_opener(id: KeywordId) -> bool {
    matches!(
        keywords::category(id),
        KeywordCategory::DesignUnit | KeywordCategory::SkippedItem
    ) && keywords::closer(id).is_some()
        && !matches!(id, KeywordId::Module | KeywordId::Macromodule)
}

fn is_unit_closer(id: KeywordId) -> bool {
    matches!(
        keywords::category(id),
        KeywordCategory::DesignUnit | KeywordCategory::SkippedItem
    ) && keywords::closer(id).is_none()
}

/// Standard directives that are neither `` `include `` nor macro usages.
fn is_compiler_directive(name: &str) -> bool {
    matches!(
        name,
        "define"
            | "undef"
            | "undefineall"
            | "ifdef"
            | "ifndef"
            | "elsif"
            | "else"
            | "endif"
            | "timescale"
            | "default_nettype"
            | "resetall"
            | "celldefine"
            | "endcelldefine"
            | "line"
            | "pragma"
            | "begin_keywords"
            | "end_keywords"
            | "unconnected_drive"
            | "nounconnected_drive"
            | "__FILE__"
            | "__LINE__"
    )
}
