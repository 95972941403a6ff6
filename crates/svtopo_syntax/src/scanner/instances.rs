/// Instantiation matching.
///
/// Recognises the statement shape
///
/// ```text
/// TYPE [ #(...) | #TOKEN ] NAME [dims]* (...) { , NAME [dims]* (...) } ;
/// ```
///
/// where `TYPE` must pass [`InstantiationPolicy::is_candidate_type`]. Matching is speculative: on
/// mismatch the cursor is restored and the caller skips the statement instead.
impl<'p> Scanner<'p> {
    fn instantiation_or_statement(&mut self) -> Step {
        let parent = self.enclosing_unit().map(str::to_string);
        if self.match_instantiation(parent)? {
            Ok(())
        } else {
            self.skip_statement()
        }
    }

    /// Try to match an instantiation at the cursor; on success emit one event per instance, each
    /// attributed to `parent`.
    ///
    /// ## Returns
    /// - `Ok(true)` if a full statement (through `;`) was matched and consumed.
    /// - `Ok(false)` if the shape did not match; the cursor is unchanged.
    /// - `Err(Halt)` if a delimiter group inside the statement is broken.
    fn match_instantiation(&mut self, parent: Option<String>) -> Result<bool, Halt> {
        let start = self.pos;
        if !self.policy.is_candidate_type(self.peek()) {
            return Ok(false);
        }
        let type_token = self.advance();
        let (type_name, line, file) = (type_token.text.clone(), type_token.line, Arc::clone(&type_token.file));

        if self.check_punct(PunctuationId::Hash) {
            if !self.policy.parameter_overrides {
                self.pos = start;
                return Ok(false);
            }
            self.advance();
            match self.peek().kind {
                TokenKind::Punctuation(PunctuationId::LParen) => self.skip_group()?,
                TokenKind::Number | TokenKind::Ident => {
                    self.advance();
                }
                _ => {
                    self.pos = start;
                    return Ok(false);
                }
            }
        }

        let mut instances = Vec::new();
        loop {
            if !self.peek().is_identifier() {
                self.pos = start;
                return Ok(false);
            }
            let instance_name = self.advance().text.clone();

            while self.check_punct(PunctuationId::LBracket) {
                if !self.policy.instance_arrays {
                    self.pos = start;
                    return Ok(false);
                }
                self.skip_group()?;
            }

            if !self.check_punct(PunctuationId::LParen) {
                self.pos = start;
                return Ok(false);
            }
            self.skip_group()?;
            instances.push(instance_name);

            if self.check_punct(PunctuationId::Comma) && self.policy.multiple_instances {
                self.advance();
                continue;
            }
            if self.match_punct(PunctuationId::Semicolon) {
                break;
            }
            self.pos = start;
            return Ok(false);
        }

        tracing::trace!(%type_name, line, count = instances.len(), "instantiation");
        for instance_name in instances {
            let event = ScanEvent::Instantiation {
                type_name: type_name.clone(),
                instance_name,
                parent: parent.clone(),
                line,
            };
            self.emit(&file, event);
        }
        Ok(true)
    }

    /// `bind TARGET [: INST {, INST}] TYPE [#(...)] NAME (...);`
    ///
    /// The instance is attributed to the first identifier of `TARGET`.
    fn bind_directive(&mut self) -> Step {
        self.advance();
        if !self.policy.bind_directives {
            return self.skip_through_semicolon();
        }

        let target = self.peek().is_identifier().then(|| self.peek().text.clone());
        self.skip_hierarchical_name()?;
        if self.match_punct(PunctuationId::Colon) {
            loop {
                self.skip_hierarchical_name()?;
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }

        if self.match_instantiation(target)? {
            Ok(())
        } else {
            self.skip_through_semicolon()
        }
    }

    /// Skip `a.b[2].c`-style hierarchical references.
    fn skip_hierarchical_name(&mut self) -> Step {
        if !self.peek().is_identifier() {
            return Ok(());
        }
        self.advance();
        loop {
            if self.check_punct(PunctuationId::LBracket) {
                self.skip_group()?;
            } else if self.check_punct(PunctuationId::Dot) && self.peek_at(1).is_identifier() {
                self.advance();
                self.advance();
            } else {
                return Ok(());
            }
        }
    }
}
