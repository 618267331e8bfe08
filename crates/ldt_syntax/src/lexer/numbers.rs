//! Numeric literal scanning.

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::Problem;

impl<'a, 'r> Lexer<'a, 'r> {
    /// Scan a numeric literal; the first character (digit or leading `.`) has been
    /// consumed.
    ///
    /// Mirrors the reference lexer: consume digits and dots greedily, then an optional
    /// exponent, and let the conversion decide validity. This is what makes `1..2`
    /// a malformed number rather than a concatenation, exactly as in Lua itself.
    pub(super) fn scan_number(&mut self, start: usize, first: char) {
        if first == '0' && matches!(self.peek(), Some('x' | 'X')) {
            self.advance();
            while matches!(self.peek(), Some(c) if c.is_ascii_hexdigit()) {
                self.advance();
            }
            let value = i64::from_str_radix(&self.source[start + 2..self.current_pos], 16);
            match value {
                Ok(n) => self.add_token(TokenKind::Number(n as f64), start),
                Err(_) => self.malformed_number(start),
            }
            return;
        }

        while matches!(self.peek(), Some(c) if c.is_ascii_digit() || c == '.') {
            self.advance();
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek(), Some('+' | '-')) {
                self.advance();
            }
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }

        match self.source[start..self.current_pos].parse::<f64>() {
            Ok(n) => self.add_token(TokenKind::Number(n), start),
            Err(_) => self.malformed_number(start),
        }
    }

    /// Report a malformed numeral and emit a zero token in its place so the parser
    /// keeps a plausible stream.
    fn malformed_number(&mut self, start: usize) {
        let text = self.source[start..self.current_pos].to_string();
        self.report(Problem::error(
            format!("Malformed number near '{}'", text),
            Span::new(start, self.current_pos),
        ));
        self.add_token(TokenKind::Number(0.0), start);
    }
}
