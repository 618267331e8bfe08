/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error recovery (`synchronize`) and problem reporting
impl<'a, 'r> Parser<'a, 'r> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.tokens[self.pos]
    }

    /// Return the token after the current token without consuming it.
    fn peek_next(&self) -> &Token {
        if self.pos + 1 < self.tokens.len() {
            self.tokens[self.pos + 1]
        } else {
            self.tokens[self.tokens.len() - 1]
        }
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        self.tokens[self.pos - 1]
    }

    /// Span of the most recently consumed token.
    fn previous_span(&self) -> Span {
        if self.pos == 0 {
            self.peek().span
        } else {
            self.tokens[self.pos - 1].span
        }
    }

    fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Return `true` if the current token is the given keyword.
    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    /// Return `true` if the current token is the given punctuation.
    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> Result<&Token, SyntaxError> {
        if self.check_keyword(id) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::new(
                format!("{}, found {}", msg, describe(&self.peek().kind)),
                self.current_span(),
            ))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> Result<&Token, SyntaxError> {
        if self.check_punct(id) {
            Ok(self.advance())
        } else {
            Err(SyntaxError::new(
                format!("{}, found {}", msg, describe(&self.peek().kind)),
                self.current_span(),
            ))
        }
    }

    /// Consume a name token.
    fn name(&mut self) -> Result<Spanned<Name>, SyntaxError> {
        match &self.peek().kind {
            TokenKind::Name(name) => {
                let span = self.current_span();
                let name = name.clone();
                self.advance();
                Ok(Spanned::new(name, span))
            }
            other => Err(SyntaxError::new(
                format!("Expected a name, found {}", describe(other)),
                self.current_span(),
            )),
        }
    }

    /// Empty statements: stray `;` separators are consumed silently.
    fn skip_semicolons(&mut self) {
        while self.match_punct(PunctuationId::Semicolon) {}
    }

    /// Return `true` at a token that terminates the current block.
    fn at_block_end(&self) -> bool {
        self.is_at_end()
            || matches!(
                self.peek().kind.keyword_id(),
                Some(KeywordId::End | KeywordId::Else | KeywordId::Elseif | KeywordId::Until)
            )
    }

    // ========================================================================
    // Error recovery
    // ========================================================================

    /// Skip tokens until the next plausible statement boundary.
    ///
    /// The resumption set is: statement-starting keywords, block terminators, a `;`
    /// (consumed), a name (assignments and calls start with one), or end of file.
    /// Bounding recovery this way keeps one malformed region to one reported problem.
    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if let Some(id) = self.peek().kind.keyword_id() {
                match id {
                    KeywordId::If
                    | KeywordId::While
                    | KeywordId::Do
                    | KeywordId::For
                    | KeywordId::Repeat
                    | KeywordId::Function
                    | KeywordId::Local
                    | KeywordId::Return
                    | KeywordId::Break
                    | KeywordId::End
                    | KeywordId::Else
                    | KeywordId::Elseif
                    | KeywordId::Until => return,
                    _ => {}
                }
            }
            if matches!(self.peek().kind, TokenKind::Name(_)) {
                return;
            }
            if self.check_punct(PunctuationId::Semicolon) {
                self.advance();
                return;
            }
            self.advance();
        }
    }

    // ========================================================================
    // Problem reporting
    // ========================================================================

    fn report(&mut self, problem: Problem) {
        self.reporter.report_problem(problem);
    }

    fn report_syntax_error(&mut self, error: SyntaxError) {
        let problem = error.into_problem();
        self.report(problem);
    }
}

/// Human-readable description of a token for diagnostics.
fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Keyword(id) => format!("'{}'", keywords::as_str(*id)),
        TokenKind::Operator(id) => format!("'{}'", operators::as_str(*id)),
        TokenKind::Punctuation(id) => format!("'{}'", punctuation::as_str(*id)),
        TokenKind::Name(name) => format!("name '{}'", name),
        TokenKind::Number(_) => "a number".to_string(),
        TokenKind::Str(_) => "a string".to_string(),
        TokenKind::Comment(_) => "a comment".to_string(),
        TokenKind::Eof => "end of file".to_string(),
    }
}
