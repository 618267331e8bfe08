//! Punctuation vocabulary.
//!
//! This module defines the canonical set of non-operator punctuation tokens used by the
//! lexer/parser: delimiters, separators, access markers, and the vararg marker.
//!
//! ## Notes
//! - `=` lives here rather than in the operator registry: Lua has no assignment
//!   expression, so the token never takes part in precedence climbing.
//! - This module is vocabulary only (spellings + metadata). It does not tokenize source
//!   text.
//!
//! ## Examples
//! ```rust
//! use ldt_core::lang::punctuation::{self, PunctuationId};
//!
//! assert_eq!(punctuation::from_str("..."), Some(PunctuationId::Ellipsis));
//! assert_eq!(punctuation::as_str(PunctuationId::Semicolon), ";");
//! ```

/// Broad syntactic grouping for punctuation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationCategory {
    /// Brackets and braces.
    Delimiter,
    /// Separators like `,` and `;`.
    Separator,
    /// Access markers like `.` and `:`.
    Access,
    /// Misc markers like `=` and `...`.
    Marker,
}

/// Stable identifier for punctuation tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PunctuationId {
    // Separators
    Comma,
    Semicolon,

    // Access
    Dot,
    Colon,

    // Markers
    Assign,
    Ellipsis,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// Metadata for a punctuation token.
#[derive(Debug, Clone, Copy)]
pub struct PunctuationInfo {
    pub id: PunctuationId,
    pub canonical: &'static str,
    pub category: PunctuationCategory,
}

/// Registry of all punctuation tokens.
pub const PUNCTUATION: &[PunctuationInfo] = &[
    // Separators
    info(PunctuationId::Comma, ",", PunctuationCategory::Separator),
    info(PunctuationId::Semicolon, ";", PunctuationCategory::Separator),
    // Access
    info(PunctuationId::Dot, ".", PunctuationCategory::Access),
    info(PunctuationId::Colon, ":", PunctuationCategory::Access),
    // Markers
    info(PunctuationId::Assign, "=", PunctuationCategory::Marker),
    info(PunctuationId::Ellipsis, "...", PunctuationCategory::Marker),
    // Delimiters
    info(PunctuationId::LParen, "(", PunctuationCategory::Delimiter),
    info(PunctuationId::RParen, ")", PunctuationCategory::Delimiter),
    info(PunctuationId::LBracket, "[", PunctuationCategory::Delimiter),
    info(PunctuationId::RBracket, "]", PunctuationCategory::Delimiter),
    info(PunctuationId::LBrace, "{", PunctuationCategory::Delimiter),
    info(PunctuationId::RBrace, "}", PunctuationCategory::Delimiter),
];

/// Return the canonical spelling for a punctuation token.
pub fn as_str(id: PunctuationId) -> &'static str {
    info_for(id).canonical
}

/// Return the category for a punctuation token.
pub fn category(id: PunctuationId) -> PunctuationCategory {
    info_for(id).category
}

/// Return the full metadata entry for a punctuation token.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: PunctuationId) -> &'static PunctuationInfo {
    PUNCTUATION
        .iter()
        .find(|p| p.id == id)
        .expect("punctuation info missing")
}

/// Resolve a punctuation spelling to its identifier.
///
/// Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<PunctuationId> {
    PUNCTUATION.iter().find(|p| p.canonical == s).map(|p| p.id)
}

const fn info(id: PunctuationId, canonical: &'static str, category: PunctuationCategory) -> PunctuationInfo {
    PunctuationInfo { id, canonical, category }
}
