//! Lexer for Lua source text
//!
//! Handles tokenization including:
//! - Keywords, identifiers, and numeric literals
//! - Short strings (escapes) and long-bracket strings (`[[...]]`, `[=[...]=]`)
//! - Line comments and long-bracket block comments
//! - Operators and punctuation (including `..`, `...`, `~=`)
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and long-bracket scanning
//! - `numbers` - Numeric literal scanning
//!
//! Lexical errors (unterminated strings or comments, malformed numerals, stray
//! characters) are pushed to the caller's [`ProblemReporter`]; the lexer resynchronizes
//! and always delivers an `Eof`-terminated stream so the parser can proceed.

mod numbers;
mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Span;
use crate::diagnostics::{Problem, ProblemReporter};
use ldt_core::lang::operators::OperatorId;
use ldt_core::lang::punctuation::PunctuationId;

/// Lexer for Lua source code.
///
/// Converts source text into a flat token stream. Whitespace is discarded (its extent
/// still advances offsets); comments are kept as trivia tokens for highlighting
/// consumers.
pub struct Lexer<'a, 'r> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    tokens: Vec<Token>,
    reporter: &'r mut dyn ProblemReporter,
}

impl<'a, 'r> Lexer<'a, 'r> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str, reporter: &'r mut dyn ProblemReporter) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            tokens: Vec::new(),
            reporter,
        }
    }

    /// Tokenize the entire source.
    ///
    /// The stream always ends with an `Eof` token, whatever problems were reported
    /// along the way.
    pub fn tokenize(mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.scan_token();
        }

        self.tokens.push(Token::new(
            TokenKind::Eof,
            Span::new(self.current_pos, self.current_pos),
        ));
        self.tokens
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn advance(&mut self) -> Option<char> {
        if let Some((pos, c)) = self.chars.next() {
            self.current_pos = pos + c.len_utf8();
            Some(c)
        } else {
            None
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(super) fn report(&mut self, problem: Problem) {
        self.reporter.report_problem(problem);
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        // Skip whitespace and newlines; their extent still advances offsets.
        while let Some(c) = self.peek() {
            if c == ' ' || c == '\t' || c == '\r' || c == '\n' {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.current_pos;

        let Some(c) = self.advance() else {
            return;
        };

        match c {
            // Comments and subtraction
            '-' => {
                if self.match_char('-') {
                    self.scan_comment(start);
                } else {
                    self.add_op(OperatorId::Minus, start);
                }
            }

            // Single-character operators
            '+' => self.add_op(OperatorId::Plus, start),
            '*' => self.add_op(OperatorId::Star, start),
            '/' => self.add_op(OperatorId::Slash, start),
            '%' => self.add_op(OperatorId::Percent, start),
            '^' => self.add_op(OperatorId::Caret, start),
            '#' => self.add_op(OperatorId::Len, start),

            // Compound operators
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start);
                } else {
                    self.add_punct(PunctuationId::Assign, start);
                }
            }
            '~' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::NotEq, start);
                } else {
                    self.report(Problem::error(
                        "Unexpected character '~'; only '~=' is a valid token",
                        Span::new(start, self.current_pos),
                    ));
                }
            }
            '<' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::LtEq, start);
                } else {
                    self.add_op(OperatorId::Lt, start);
                }
            }
            '>' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::GtEq, start);
                } else {
                    self.add_op(OperatorId::Gt, start);
                }
            }

            // Punctuation
            '(' => self.add_punct(PunctuationId::LParen, start),
            ')' => self.add_punct(PunctuationId::RParen, start),
            '{' => self.add_punct(PunctuationId::LBrace, start),
            '}' => self.add_punct(PunctuationId::RBrace, start),
            ']' => self.add_punct(PunctuationId::RBracket, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start),
            ':' => self.add_punct(PunctuationId::Colon, start),
            ',' => self.add_punct(PunctuationId::Comma, start),

            // '[' opens either an index bracket or a long string
            '[' => {
                if let Some(level) = self.long_bracket_level() {
                    let text = self.scan_long_bracket(start, level, "string");
                    self.add_token(TokenKind::Str(text), start);
                } else {
                    self.add_punct(PunctuationId::LBracket, start);
                }
            }

            // '.' is field access, concat, ellipsis, or the start of a number
            '.' => {
                if self.match_char('.') {
                    if self.match_char('.') {
                        self.add_punct(PunctuationId::Ellipsis, start);
                    } else {
                        self.add_op(OperatorId::Concat, start);
                    }
                } else if matches!(self.peek(), Some('0'..='9')) {
                    self.scan_number(start, c);
                } else {
                    self.add_punct(PunctuationId::Dot, start);
                }
            }

            // Strings
            '"' | '\'' => self.scan_string(start, c),

            // Numbers
            '0'..='9' => self.scan_number(start, c),

            // Identifiers and keywords
            _ if is_ident_start(c) => self.scan_identifier(start),

            _ => {
                self.report(Problem::error(
                    format!("Unexpected character '{}'", c),
                    Span::new(start, self.current_pos),
                ));
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    pub(super) fn add_token(&mut self, kind: TokenKind, start: usize) {
        self.tokens.push(Token::new(kind, Span::new(start, self.current_pos)));
    }

    fn add_op(&mut self, id: OperatorId, start: usize) {
        self.add_token(TokenKind::Operator(id), start);
    }

    fn add_punct(&mut self, id: PunctuationId, start: usize) {
        self.add_token(TokenKind::Punctuation(id), start);
    }

    // ========================================================================
    // Comments
    // ========================================================================

    /// Scan a comment; the leading `--` has been consumed.
    fn scan_comment(&mut self, start: usize) {
        let text_start = self.current_pos;
        if self.peek() == Some('[') {
            self.advance();
            if let Some(level) = self.long_bracket_level() {
                let text = self.scan_long_bracket(start, level, "comment");
                self.add_token(TokenKind::Comment(text), start);
                return;
            }
            // Not a long bracket after all; the '[' is ordinary comment text.
        }
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let text = self.source[text_start..self.current_pos].to_string();
        self.add_token(TokenKind::Comment(text), start);
    }

    // ========================================================================
    // Identifier scanning
    // ========================================================================

    fn scan_identifier(&mut self, start: usize) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start..self.current_pos];

        // Look up the spelling in the reserved-word registry (no allocation for keywords).
        if let Some(id) = keyword_id(spelling) {
            self.add_token(TokenKind::Keyword(id), start);
        } else {
            let name = spelling.to_string();
            self.add_token(TokenKind::Name(name), start);
        }
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier.
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source, reporter).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str, reporter: &mut dyn ProblemReporter) -> Vec<Token> {
    Lexer::new(source, reporter).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================
