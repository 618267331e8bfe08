//! Operator vocabulary.
//!
//! This module defines the canonical Lua 5.1 operator set (symbol operators like `+` and
//! word operators like `and`) along with precedence, associativity, and fixity metadata.
//! The parser's precedence climbing is driven entirely by this table, so the table *is*
//! the grammar's operator-precedence contract:
//!
//! `or` < `and` < comparison < `..` < `+ -` < `* / %` < unary (`not # -`) < `^`
//!
//! with `..` and `^` associating to the right.
//!
//! ## Notes
//! - Word operators (`and`, `or`, `not`) are spelled with reserved words; their entries
//!   have [`OperatorInfo::is_keyword_spelling`] set. The lexer produces keyword tokens for
//!   them, and the parser maps those to operator ids via this registry.
//! - `-` appears once, as the infix subtraction entry; unary minus binds at
//!   [`UNARY_PRECEDENCE`] like the other prefix operators.
//!
//! ## Examples
//! ```rust
//! use ldt_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str(".."), Some(OperatorId::Concat));
//! assert!(operators::info_for(OperatorId::Star).precedence
//!     > operators::info_for(OperatorId::Plus).precedence);
//! ```

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
}

/// Define whether an operator is infix (binary) or prefix (unary).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // String
    Concat,

    // Prefix-only
    Len,

    // Word operators
    And,
    Or,
    Not,
}

/// Binding strength of the prefix operators (`not`, `#`, unary `-`): tighter than every
/// binary operator except `^`, so `-x^2` reads as `-(x^2)`.
pub const UNARY_PRECEDENCE: u8 = 60;

/// Metadata for an operator.
///
/// `precedence` is a relative ordering where higher binds tighter. The absolute scale is
/// an implementation detail, but must be consistent across the parser.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spelling: &'static str,
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub is_keyword_spelling: bool,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Word operators (weakest binding)
    op(OperatorId::Or, "or", 10, Associativity::Left, Fixity::Infix, true),
    op(OperatorId::And, "and", 20, Associativity::Left, Fixity::Infix, true),
    // Comparison
    op(OperatorId::EqEq, "==", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::NotEq, "~=", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Lt, "<", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::LtEq, "<=", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Gt, ">", 30, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::GtEq, ">=", 30, Associativity::Left, Fixity::Infix, false),
    // String
    op(OperatorId::Concat, "..", 35, Associativity::Right, Fixity::Infix, false),
    // Arithmetic
    op(OperatorId::Plus, "+", 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Minus, "-", 40, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Star, "*", 50, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Slash, "/", 50, Associativity::Left, Fixity::Infix, false),
    op(OperatorId::Percent, "%", 50, Associativity::Left, Fixity::Infix, false),
    // Prefix operators
    op(OperatorId::Not, "not", UNARY_PRECEDENCE, Associativity::Left, Fixity::Prefix, true),
    op(OperatorId::Len, "#", UNARY_PRECEDENCE, Associativity::Left, Fixity::Prefix, false),
    // Exponentiation (tightest binding)
    op(OperatorId::Caret, "^", 70, Associativity::Right, Fixity::Infix, false),
];

/// Return the canonical spelling for an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spelling
}

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Resolve an operator spelling to its identifier.
///
/// Matching is **case-sensitive**.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS.iter().find(|o| o.spelling == spelling).map(|o| o.id)
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spelling: &'static str,
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
    is_keyword_spelling: bool,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spelling,
        precedence,
        associativity,
        fixity,
        is_keyword_spelling,
    }
}
