//! Token types for the Lua lexer.
//!
//! The lexer uses **registry-backed IDs** for language vocabulary:
//! - `Keyword(KeywordId)` for reserved words
//! - `Operator(OperatorId)` for symbol operators
//! - `Punctuation(PunctuationId)` for punctuation tokens
//!
//! ## Notes
//! - Word operators (`and`, `or`, `not`) lex as keywords; the parser maps them to
//!   operator ids when precedence is needed.
//! - ID-bearing tokens avoid stringly-typed checks in the parser. Use
//!   `crate::token_helpers` for ergonomic token matching at call sites.

use crate::ast::Span;
use ldt_core::lang::keywords::{self, KeywordId};
use ldt_core::lang::operators::OperatorId;
use ldt_core::lang::punctuation::PunctuationId;

// ============================================================================
// TOKEN TYPES
// ============================================================================

/// Kind of token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ========== Keyword / operator / punctuation (ID-based) ==========
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    // ========== Identifiers and Literals ==========
    Name(String),
    Number(f64),
    Str(String),

    // ========== Trivia ==========
    /// Comment body, leading `--` and any long brackets stripped. Kept in the stream
    /// for highlighting consumers; the parser discards these up front.
    Comment(String),

    // ========== Special ==========
    Eof,
}

/// A token with its kind and source span.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    /// Construct a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
