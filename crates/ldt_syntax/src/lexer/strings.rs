//! String and long-bracket scanning.

use super::{Lexer, TokenKind};
use crate::ast::Span;
use crate::diagnostics::Problem;

impl<'a, 'r> Lexer<'a, 'r> {
    /// Scan a short string; the opening quote has been consumed.
    ///
    /// Short strings may not span lines. On an unterminated string the problem is
    /// reported and the characters read so far still become a `Str` token, so the
    /// parser sees a plausible stream.
    pub(super) fn scan_string(&mut self, start: usize, quote: char) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    self.report(Problem::error(
                        "Unterminated string before end of file",
                        Span::new(start, self.current_pos),
                    ));
                    break;
                }
                Some('\n') => {
                    self.report(Problem::error(
                        "Unterminated string before end of line",
                        Span::new(start, self.current_pos),
                    ));
                    break;
                }
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    self.scan_escape(&mut value);
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
        self.add_token(TokenKind::Str(value), start);
    }

    /// Scan one escape sequence; the backslash has been consumed.
    fn scan_escape(&mut self, value: &mut String) {
        let escape_start = self.current_pos - 1;
        match self.advance() {
            Some('n') => value.push('\n'),
            Some('t') => value.push('\t'),
            Some('r') => value.push('\r'),
            Some('a') => value.push('\u{07}'),
            Some('b') => value.push('\u{08}'),
            Some('f') => value.push('\u{0C}'),
            Some('v') => value.push('\u{0B}'),
            Some('\\') => value.push('\\'),
            Some('"') => value.push('"'),
            Some('\'') => value.push('\''),
            // An escaped line break is a literal newline in the string.
            Some('\n') => value.push('\n'),
            Some(c) if c.is_ascii_digit() => {
                // \ddd: up to three decimal digits naming a byte.
                let mut code = c as u32 - '0' as u32;
                for _ in 0..2 {
                    match self.peek() {
                        Some(d) if d.is_ascii_digit() => {
                            code = code * 10 + (d as u32 - '0' as u32);
                            self.advance();
                        }
                        _ => break,
                    }
                }
                if code > 255 {
                    self.report(Problem::error(
                        "Escape sequence out of range; \\ddd must name a byte",
                        Span::new(escape_start, self.current_pos),
                    ));
                } else {
                    value.push(code as u8 as char);
                }
            }
            Some(c) => {
                self.report(Problem::error(
                    format!("Invalid escape sequence '\\{}'", c),
                    Span::new(escape_start, self.current_pos),
                ));
                value.push(c);
            }
            // Backslash at end of input; the string loop reports the unterminated string.
            None => {}
        }
    }

    /// Level of a long-bracket opener whose first `[` has just been consumed: zero or
    /// more `=` followed by a second `[`.
    pub(super) fn long_bracket_level(&self) -> Option<usize> {
        let rest = self.source[self.current_pos..].as_bytes();
        let mut level = 0;
        while rest.get(level) == Some(&b'=') {
            level += 1;
        }
        if rest.get(level) == Some(&b'[') { Some(level) } else { None }
    }

    /// Scan a long-bracket section; the opening `[` has been consumed and a matching
    /// `=*[` is known to follow. Returns the enclosed text.
    ///
    /// On a missing closer the problem is reported and the rest of the input is
    /// consumed, mirroring how the reference lexer treats runaway long brackets.
    pub(super) fn scan_long_bracket(&mut self, start: usize, level: usize, what: &str) -> String {
        for _ in 0..level {
            self.advance();
        }
        self.advance(); // inner '['

        // A line break directly after the opening bracket is not part of the content.
        if self.peek() == Some('\r') {
            self.advance();
        }
        if self.peek() == Some('\n') {
            self.advance();
        }

        let content_start = self.current_pos;
        let close = format!("]{}]", "=".repeat(level));
        match self.source[self.current_pos..].find(&close) {
            Some(offset) => {
                let content_end = self.current_pos + offset;
                while self.current_pos < content_end + close.len() {
                    self.advance();
                }
                self.source[content_start..content_end].to_string()
            }
            None => {
                self.report(Problem::error(
                    format!("Unterminated long {what} before end of file"),
                    Span::new(start, self.source.len()),
                ));
                while self.advance().is_some() {}
                self.source[content_start..].to_string()
            }
        }
    }
}
