//! Parser for Lua source text
//!
//! Converts a token stream into an AST by recursive descent. The parser never fails for
//! malformed user input: problems are pushed to the caller's reporter, parsing
//! resynchronizes at the next statement boundary, and the caller always receives a
//! well-formed [`Module`].
//!
//! ## Examples
//!
//! ```rust,no_run
//! use ldt_syntax::diagnostics::CollectingReporter;
//! use ldt_syntax::parser;
//!
//! let mut reporter = CollectingReporter::new();
//! let module = parser::parse("init.lua", "print('hello')", &mut reporter);
//! assert!(!module.is_empty());
//! ```

use crate::ast::*;
use crate::diagnostics::{Problem, ProblemReporter, SyntaxError};
use crate::lexer::{Token, TokenKind};
use ldt_core::lang::keywords::{self, KeywordId};
use ldt_core::lang::operators::{self, Associativity, OperatorId, UNARY_PRECEDENCE};
use ldt_core::lang::punctuation::{self, PunctuationId};

// NOTE: This module is split across multiple files using `include!` to keep all parser
// methods in the same Rust module (preserving privacy + call patterns) while avoiding
// a single large source file.

include!("parser/core.rs");
include!("parser/helpers.rs");
include!("parser/stmts.rs");
include!("parser/expr.rs");
include!("parser/api.rs");
include!("parser/tests.rs");
