/// Expression parsing methods.
///
/// This chunk implements the expression grammar with precedence climbing driven by the
/// operator registry: each binary operator's precedence and associativity come from
/// `ldt_core::lang::operators`, so the registry table *is* the precedence contract.
/// Postfix forms (indexing, calls, method invocations) chain left-to-right, so
/// `a.b:c().d` parses as successive operations applied to `a`.
impl<'a, 'r> Parser<'a, 'r> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expr_list(&mut self) -> Result<Vec<Spanned<Expr>>, SyntaxError> {
        let mut exprs = vec![self.expression()?];
        while self.match_punct(PunctuationId::Comma) {
            exprs.push(self.expression()?);
        }
        Ok(exprs)
    }

    fn expression(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        self.binary_expr(0)
    }

    /// Precedence climbing: consume operators binding at least as tightly as
    /// `min_precedence`. Right-associative operators re-enter at their own level so
    /// `2 ^ 3 ^ 2` nests as `2 ^ (3 ^ 2)`.
    fn binary_expr(&mut self, min_precedence: u8) -> Result<Spanned<Expr>, SyntaxError> {
        let mut left = self.unary_expr()?;

        while let Some((id, op)) = self.peek_binary_op() {
            let info = operators::info_for(id);
            if info.precedence < min_precedence {
                break;
            }
            self.advance();
            let next_min = match info.associativity {
                Associativity::Right => info.precedence,
                Associativity::Left => info.precedence + 1,
            };
            let right = self.binary_expr(next_min)?;
            let span = left.span.merge(right.span);
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), span);
        }

        Ok(left)
    }

    /// Identify the current token as a binary operator, mapping the word operators
    /// (which lex as keywords) through the registry.
    fn peek_binary_op(&self) -> Option<(OperatorId, BinaryOp)> {
        let id = match &self.peek().kind {
            TokenKind::Operator(id) => *id,
            TokenKind::Keyword(KeywordId::And) => OperatorId::And,
            TokenKind::Keyword(KeywordId::Or) => OperatorId::Or,
            _ => return None,
        };
        let op = match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::Percent => BinaryOp::Mod,
            OperatorId::Caret => BinaryOp::Pow,
            OperatorId::Concat => BinaryOp::Concat,
            OperatorId::EqEq => BinaryOp::Eq,
            OperatorId::NotEq => BinaryOp::NotEq,
            OperatorId::Lt => BinaryOp::Lt,
            OperatorId::LtEq => BinaryOp::LtEq,
            OperatorId::Gt => BinaryOp::Gt,
            OperatorId::GtEq => BinaryOp::GtEq,
            OperatorId::And => BinaryOp::And,
            OperatorId::Or => BinaryOp::Or,
            // Prefix-only operators never bind as infix.
            OperatorId::Len | OperatorId::Not => return None,
        };
        Some((id, op))
    }

    fn unary_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let op = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Not) => Some(UnaryOp::Not),
            TokenKind::Operator(OperatorId::Minus) => Some(UnaryOp::Neg),
            TokenKind::Operator(OperatorId::Len) => Some(UnaryOp::Len),
            _ => None,
        };
        let Some(op) = op else {
            return self.suffixed_expr();
        };

        let start = self.current_span().start;
        self.advance();
        // Unary binds tighter than any binary operator except '^': -x^2 is -(x^2),
        // while 2^-3 keeps the minus inside the exponent.
        let operand = self.binary_expr(UNARY_PRECEDENCE + 1)?;
        let span = Span::new(start, operand.span.end);
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), span))
    }

    /// A primary expression with its postfix chain: `.name`, `[expr]`, `:name(args)`,
    /// and call arguments, applied successively left-to-right.
    fn suffixed_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let mut expr = self.primary_expr()?;

        loop {
            if self.match_punct(PunctuationId::Dot) {
                // `a.b` lowers to indexing with a string key.
                let name = self.name()?;
                let span = Span::new(expr.span.start, name.span.end);
                let key = Spanned::new(Expr::Str(name.node), name.span);
                expr = Spanned::new(Expr::Index(Box::new(expr), Box::new(key)), span);
            } else if self.match_punct(PunctuationId::LBracket) {
                let key = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, "Expected ']' after the index expression")?;
                let span = Span::new(expr.span.start, self.previous_span().end);
                expr = Spanned::new(Expr::Index(Box::new(expr), Box::new(key)), span);
            } else if self.match_punct(PunctuationId::Colon) {
                let method = self.name()?;
                let args = self.call_args()?;
                let span = Span::new(expr.span.start, self.previous_span().end);
                expr = Spanned::new(Expr::Invoke(Box::new(expr), method, args), span);
            } else if self.at_call_args() {
                let args = self.call_args()?;
                let span = Span::new(expr.span.start, self.previous_span().end);
                expr = Spanned::new(Expr::Call(Box::new(expr), args), span);
            } else {
                break;
            }
        }

        Ok(expr)
    }

    /// Return `true` if the current token can open call arguments: `(`, a string
    /// literal, or a table constructor.
    fn at_call_args(&self) -> bool {
        self.check_punct(PunctuationId::LParen)
            || self.check_punct(PunctuationId::LBrace)
            || matches!(self.peek().kind, TokenKind::Str(_))
    }

    fn call_args(&mut self) -> Result<Vec<Spanned<Expr>>, SyntaxError> {
        if self.match_punct(PunctuationId::LParen) {
            let args = if self.check_punct(PunctuationId::RParen) {
                Vec::new()
            } else {
                self.expr_list()?
            };
            self.expect_punct(PunctuationId::RParen, "Expected ')' after the argument list")?;
            return Ok(args);
        }
        if matches!(self.peek().kind, TokenKind::Str(_)) {
            return Ok(vec![self.primary_expr()?]);
        }
        if self.check_punct(PunctuationId::LBrace) {
            return Ok(vec![self.table_constructor()?]);
        }
        Err(SyntaxError::new(
            format!("Expected arguments after the method name, found {}", describe(&self.peek().kind)),
            self.current_span(),
        ))
    }

    fn primary_expr(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let span = self.current_span();
        let expr = match &self.peek().kind {
            TokenKind::Keyword(KeywordId::Nil) => {
                self.advance();
                Expr::Nil
            }
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::True
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::False
            }
            TokenKind::Keyword(KeywordId::Function) => {
                self.advance();
                let body = self.function_body("the 'function' literal")?;
                let span = Span::new(span.start, self.previous_span().end);
                return Ok(Spanned::new(Expr::Function(body), span));
            }
            TokenKind::Number(n) => {
                let n = *n;
                self.advance();
                Expr::Number(n)
            }
            TokenKind::Str(s) => {
                let s = s.clone();
                self.advance();
                Expr::Str(s)
            }
            TokenKind::Name(name) => {
                let name = name.clone();
                self.advance();
                Expr::Identifier(name)
            }
            TokenKind::Punctuation(PunctuationId::Ellipsis) => {
                self.advance();
                Expr::Dots
            }
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(
                    PunctuationId::RParen,
                    "Expected ')' to close the parenthesized expression",
                )?;
                let span = Span::new(span.start, self.previous_span().end);
                return Ok(Spanned::new(Expr::Paren(Box::new(inner)), span));
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => return self.table_constructor(),
            other => {
                return Err(SyntaxError::new(
                    format!("Expected an expression, found {}", describe(other)),
                    span,
                ));
            }
        };
        Ok(Spanned::new(expr, span))
    }

    /// `{ field (',' | ';') ... }` with a trailing separator tolerated.
    fn table_constructor(&mut self) -> Result<Spanned<Expr>, SyntaxError> {
        let start = self.current_span().start;
        self.expect_punct(PunctuationId::LBrace, "Expected '{' to open a table constructor")?;

        let mut fields = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            fields.push(self.table_field()?);
            if !self.match_punct(PunctuationId::Comma) && !self.match_punct(PunctuationId::Semicolon) {
                break;
            }
        }

        self.expect_punct(PunctuationId::RBrace, "Expected '}' to close the table constructor")?;
        let span = Span::new(start, self.previous_span().end);
        Ok(Spanned::new(Expr::Table(fields), span))
    }

    fn table_field(&mut self) -> Result<Spanned<TableField>, SyntaxError> {
        if self.check_punct(PunctuationId::LBracket) {
            let start = self.current_span().start;
            self.advance();
            let key = self.expression()?;
            self.expect_punct(PunctuationId::RBracket, "Expected ']' after the table key")?;
            self.expect_punct(PunctuationId::Assign, "Expected '=' after the table key")?;
            let value = self.expression()?;
            let span = Span::new(start, value.span.end);
            return Ok(Spanned::new(TableField::Keyed(key, value), span));
        }

        if matches!(self.peek().kind, TokenKind::Name(_))
            && self.peek_next().kind.is_punctuation(PunctuationId::Assign)
        {
            let name = self.name()?;
            self.advance(); // '='
            let value = self.expression()?;
            let span = Span::new(name.span.start, value.span.end);
            return Ok(Spanned::new(TableField::Named(name, value), span));
        }

        let value = self.expression()?;
        let span = value.span;
        Ok(Spanned::new(TableField::Item(value), span))
    }
}
