//! Define the reserved keyword vocabulary for Lua 5.1.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) recording canonical spellings
//! and categories.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**; `End` is an identifier, `end` is not.
//! - Word operators (`and`, `or`, `not`) are reserved words too. When operator semantics
//!   (precedence, fixity) are needed, use [`crate::lang::operators`].
//!
//! ## Examples
//! ```rust
//! use ldt_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::End), "end");
//! assert_eq!(keywords::from_str("End"), None);
//! ```

/// Stable identifier for every reserved word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow
    If,
    Then,
    Else,
    Elseif,
    While,
    Do,
    For,
    In,
    Repeat,
    Until,
    End,
    Break,
    Return,

    // Declarations
    Function,
    Local,

    // Literals
    Nil,
    True,
    False,

    // Word operators
    And,
    Or,
    Not,
}

/// High-level grouping for documentation and tooling.
///
/// Categories are metadata only; they do not enforce parsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Literal,
    Operator,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub category: KeywordCategory,
}

/// Registry of all reserved words.
///
/// The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow
    info(KeywordId::If, "if", KeywordCategory::ControlFlow),
    info(KeywordId::Then, "then", KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", KeywordCategory::ControlFlow),
    info(KeywordId::Elseif, "elseif", KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", KeywordCategory::ControlFlow),
    info(KeywordId::Do, "do", KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", KeywordCategory::ControlFlow),
    info(KeywordId::In, "in", KeywordCategory::ControlFlow),
    info(KeywordId::Repeat, "repeat", KeywordCategory::ControlFlow),
    info(KeywordId::Until, "until", KeywordCategory::ControlFlow),
    info(KeywordId::End, "end", KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", KeywordCategory::ControlFlow),
    // Declarations
    info(KeywordId::Function, "function", KeywordCategory::Declaration),
    info(KeywordId::Local, "local", KeywordCategory::Declaration),
    // Literals
    info(KeywordId::Nil, "nil", KeywordCategory::Literal),
    info(KeywordId::True, "true", KeywordCategory::Literal),
    info(KeywordId::False, "false", KeywordCategory::Literal),
    // Word operators
    info(KeywordId::And, "and", KeywordCategory::Operator),
    info(KeywordId::Or, "or", KeywordCategory::Operator),
    info(KeywordId::Not, "not", KeywordCategory::Operator),
];

/// Return the canonical spelling for a keyword.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a keyword.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return the full metadata entry for a keyword.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Resolve a spelling to a keyword id, if reserved.
///
/// Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    KEYWORDS.iter().find(|k| k.canonical == s).map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(id: KeywordId, canonical: &'static str, category: KeywordCategory) -> KeywordInfo {
    KeywordInfo { id, canonical, category }
}
