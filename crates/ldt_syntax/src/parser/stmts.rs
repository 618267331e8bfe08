/// Statement parsing methods.
///
/// This chunk parses statement forms (`if`, `while`, `for`, assignments, declarations)
/// and blocks. Blocks never fail to parse: errors inside a block are reported and
/// recovery resumes at the next statement, so every compound statement always carries a
/// well-formed body. A construct still open at end of file is reported once and closed
/// synthetically.
impl<'a, 'r> Parser<'a, 'r> {
    // ========================================================================
    // Statements
    // ========================================================================

    fn statement(&mut self) -> Result<Spanned<Statement>, SyntaxError> {
        let start = self.current_span().start;

        let stmt = match self.peek().kind.keyword_id() {
            Some(KeywordId::If) => self.if_stmt()?,
            Some(KeywordId::While) => self.while_stmt()?,
            Some(KeywordId::Do) => self.do_stmt()?,
            Some(KeywordId::For) => self.for_stmt()?,
            Some(KeywordId::Repeat) => self.repeat_stmt()?,
            Some(KeywordId::Function) => self.function_stmt()?,
            Some(KeywordId::Local) => self.local_stmt()?,
            Some(KeywordId::Return) => self.return_stmt()?,
            Some(KeywordId::Break) => {
                self.advance();
                Statement::Break
            }
            Some(
                id @ (KeywordId::End
                | KeywordId::Else
                | KeywordId::Elseif
                | KeywordId::Until
                | KeywordId::Then
                | KeywordId::In),
            ) => {
                return Err(SyntaxError::new(
                    format!("Unexpected '{}'", keywords::as_str(id)),
                    self.current_span(),
                ));
            }
            _ => self.expr_stmt()?,
        };

        let end = self.previous_span().end;
        Ok(Spanned::new(stmt, Span::new(start, end)))
    }

    /// Parse statements until a block terminator (`end`, `else`, `elseif`, `until`) or
    /// end of file. Errors are contained here: one report per malformed region, then
    /// recovery, so the block itself always materializes.
    fn block(&mut self) -> Chunk {
        let start = self.current_span().start;
        let mut statements = Vec::new();

        loop {
            self.skip_semicolons();
            if self.at_block_end() {
                break;
            }
            match self.statement() {
                Ok(stmt) => statements.push(stmt),
                Err(error) => {
                    self.report_syntax_error(error);
                    self.synchronize();
                }
            }
        }

        let end = statements.last().map(|s| s.span.end).unwrap_or(start);
        Chunk::new(Span::new(start, end), statements)
    }

    /// Expect `terminator` to close `construct`. At end of file the problem is reported
    /// and the construct is closed synthetically instead of failing, so partially typed
    /// files keep their tree.
    fn close_block(&mut self, terminator: KeywordId, construct: &str) -> Result<(), SyntaxError> {
        if self.match_keyword(terminator) {
            return Ok(());
        }
        if self.is_at_end() {
            self.report(Problem::error(
                format!(
                    "Missing '{}' to close {} before end of file",
                    keywords::as_str(terminator),
                    construct
                ),
                self.current_span(),
            ));
            return Ok(());
        }
        Err(SyntaxError::new(
            format!(
                "Expected '{}' to close {}, found {}",
                keywords::as_str(terminator),
                construct,
                describe(&self.peek().kind)
            ),
            self.current_span(),
        ))
    }

    fn do_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Do, "Expected 'do'")?;
        let body = self.block();
        self.close_block(KeywordId::End, "the 'do' block")?;
        Ok(Statement::Do(body))
    }

    fn while_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::While, "Expected 'while'")?;
        let condition = self.expression()?;
        self.expect_keyword(KeywordId::Do, "Expected 'do' after the loop condition")?;
        let body = self.block();
        self.close_block(KeywordId::End, "the 'while' loop")?;
        Ok(Statement::While(WhileStmt { condition, body }))
    }

    fn repeat_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Repeat, "Expected 'repeat'")?;
        let body = self.block();
        if self.is_at_end() {
            // Close synthetically: a nil condition stands in for the missing one.
            self.report(Problem::error(
                "Missing 'until' to close the 'repeat' loop before end of file",
                self.current_span(),
            ));
            let condition = Spanned::new(Expr::Nil, self.current_span());
            return Ok(Statement::Repeat(RepeatStmt { body, condition }));
        }
        self.expect_keyword(KeywordId::Until, "Expected 'until' after the loop body")?;
        let condition = self.expression()?;
        Ok(Statement::Repeat(RepeatStmt { body, condition }))
    }

    fn if_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::If, "Expected 'if'")?;
        let condition = self.expression()?;
        self.expect_keyword(KeywordId::Then, "Expected 'then' after the condition")?;
        let then_body = self.block();

        let mut elseif_branches = Vec::new();
        while self.match_keyword(KeywordId::Elseif) {
            let elseif_condition = self.expression()?;
            self.expect_keyword(KeywordId::Then, "Expected 'then' after the condition")?;
            elseif_branches.push((elseif_condition, self.block()));
        }

        let else_body = if self.match_keyword(KeywordId::Else) {
            Some(self.block())
        } else {
            None
        };

        self.close_block(KeywordId::End, "the 'if' statement")?;
        Ok(Statement::If(IfStmt {
            condition,
            then_body,
            elseif_branches,
            else_body,
        }))
    }

    fn for_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::For, "Expected 'for'")?;
        let first = self.name()?;

        if self.check_punct(PunctuationId::Assign) {
            return self.numeric_for_stmt(first);
        }
        self.for_in_stmt(first)
    }

    /// `for i = start, limit[, step] do ... end`
    fn numeric_for_stmt(&mut self, var: Spanned<Name>) -> Result<Statement, SyntaxError> {
        self.advance(); // '='
        let start = self.expression()?;
        self.expect_punct(PunctuationId::Comma, "Expected ',' after the loop start value")?;
        let limit = self.expression()?;
        let step = if self.match_punct(PunctuationId::Comma) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect_keyword(KeywordId::Do, "Expected 'do' after the loop range")?;
        let body = self.block();
        self.close_block(KeywordId::End, "the 'for' loop")?;
        Ok(Statement::NumericFor(NumericForStmt {
            var,
            start,
            limit,
            step,
            body,
        }))
    }

    /// `for k, v in e1, e2 do ... end`
    ///
    /// The loop-variable and iterator-expression lists each become their own chunk, so
    /// both stay traversable blocks alongside the loop body.
    fn for_in_stmt(&mut self, first: Spanned<Name>) -> Result<Statement, SyntaxError> {
        let mut names = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.name()?);
        }
        self.expect_keyword(KeywordId::In, "Expected 'in' after the loop variables")?;
        let exprs = self.expr_list()?;
        self.expect_keyword(KeywordId::Do, "Expected 'do' after the iterator expressions")?;
        let body = self.block();
        self.close_block(KeywordId::End, "the 'for' loop")?;

        let identifiers = exprs_as_chunk(
            names
                .into_iter()
                .map(|name| {
                    let span = name.span;
                    Spanned::new(Expr::Identifier(name.node), span)
                })
                .collect(),
        );
        let expressions = exprs_as_chunk(exprs);
        Ok(Statement::ForIn(ForInStmt {
            identifiers,
            expressions,
            body,
        }))
    }

    fn function_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Function, "Expected 'function'")?;
        let name = self.function_name()?;
        let body = self.function_body("the 'function' declaration")?;
        Ok(Statement::Function(FunctionStmt { name, body }))
    }

    /// `a`, `a.b.c`, or `a.b:m`
    fn function_name(&mut self) -> Result<FunctionName, SyntaxError> {
        let first = self.name()?;
        let mut span = first.span;
        let mut path = vec![first];
        while self.match_punct(PunctuationId::Dot) {
            let segment = self.name()?;
            span = span.merge(segment.span);
            path.push(segment);
        }
        let method = if self.match_punct(PunctuationId::Colon) {
            let name = self.name()?;
            span = span.merge(name.span);
            Some(name)
        } else {
            None
        };
        Ok(FunctionName { path, method, span })
    }

    /// Parameter list and body, shared by declarations and function literals.
    fn function_body(&mut self, construct: &str) -> Result<FunctionBody, SyntaxError> {
        self.expect_punct(PunctuationId::LParen, "Expected '(' to open the parameter list")?;
        let mut params = Vec::new();
        let mut is_vararg = false;
        if !self.check_punct(PunctuationId::RParen) {
            loop {
                // The vararg marker ends the list.
                if self.match_punct(PunctuationId::Ellipsis) {
                    is_vararg = true;
                    break;
                }
                params.push(self.name()?);
                if !self.match_punct(PunctuationId::Comma) {
                    break;
                }
            }
        }
        self.expect_punct(PunctuationId::RParen, "Expected ')' after the parameter list")?;
        let body = self.block();
        self.close_block(KeywordId::End, construct)?;
        Ok(FunctionBody {
            params,
            is_vararg,
            body,
        })
    }

    fn local_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Local, "Expected 'local'")?;

        if self.match_keyword(KeywordId::Function) {
            let name = self.name()?;
            let body = self.function_body("the 'function' declaration")?;
            return Ok(Statement::LocalFunction(LocalFunctionStmt { name, body }));
        }

        let mut names = vec![self.name()?];
        while self.match_punct(PunctuationId::Comma) {
            names.push(self.name()?);
        }
        let values = if self.match_punct(PunctuationId::Assign) {
            self.expr_list()?
        } else {
            Vec::new()
        };
        Ok(Statement::Local(LocalStmt { names, values }))
    }

    fn return_stmt(&mut self) -> Result<Statement, SyntaxError> {
        self.expect_keyword(KeywordId::Return, "Expected 'return'")?;
        let values = if self.at_block_end() || self.check_punct(PunctuationId::Semicolon) {
            Vec::new()
        } else {
            self.expr_list()?
        };
        Ok(Statement::Return(ReturnStmt { values }))
    }

    /// Statements that open with an expression: assignments and standalone calls.
    fn expr_stmt(&mut self) -> Result<Statement, SyntaxError> {
        let first = self.suffixed_expr()?;

        if self.check_punct(PunctuationId::Comma) || self.check_punct(PunctuationId::Assign) {
            let mut targets = vec![first];
            while self.match_punct(PunctuationId::Comma) {
                targets.push(self.suffixed_expr()?);
            }
            self.expect_punct(PunctuationId::Assign, "Expected '=' in assignment")?;
            let values = self.expr_list()?;
            for target in &targets {
                if !matches!(target.node, Expr::Identifier(_) | Expr::Index(..)) {
                    self.report(Problem::error("Cannot assign to this expression", target.span));
                }
            }
            return Ok(Statement::Assign(AssignStmt { targets, values }));
        }

        // Only calls may stand alone; keep the node anyway so tooling sees it.
        if !matches!(first.node, Expr::Call(..) | Expr::Invoke(..)) {
            self.report(Problem::error(
                "Unexpected expression in statement position; only calls can stand alone",
                first.span,
            ));
        }
        Ok(Statement::Expression(first))
    }
}

/// Wrap an expression list in a chunk of expression statements, preserving spans, so
/// the list supports block traversal like any other chunk.
fn exprs_as_chunk(exprs: Vec<Spanned<Expr>>) -> Chunk {
    let span = exprs
        .iter()
        .map(|e| e.span)
        .reduce(Span::merge)
        .unwrap_or_default();
    let statements = exprs
        .into_iter()
        .map(|expr| {
            let span = expr.span;
            Spanned::new(Statement::Expression(expr), span)
        })
        .collect();
    Chunk::new(span, statements)
}
