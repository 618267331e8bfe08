//! Shared syntax frontend for Lua: lexer, parser, AST, diagnostics.
//!
//! This crate is dependency-light and intended for reuse across editors, language
//! servers, and other source tooling. It turns raw source text into a typed syntax tree
//! plus an ordered list of problems, and it never gives up on malformed input: a parse
//! call always returns a [`ast::Module`], recovering at statement boundaries and closing
//! unfinished constructs at end of file, so downstream consumers keep working on files
//! that are mid-edit.
//!
//! ## Notes
//! - This crate is intentionally “syntax-only”: it does no scope resolution, type
//!   inference, or execution.
//! - Vocabulary identity (keywords/operators/punctuation) comes from `ldt_core::lang`
//!   registries.
//!
//! ## Examples
//! ```rust,no_run
//! use ldt_syntax::diagnostics::CollectingReporter;
//! use ldt_syntax::parser;
//!
//! let mut reporter = CollectingReporter::new();
//! let module = parser::parse("init.lua", "local x = 1", &mut reporter);
//! assert!(!module.is_empty());
//! assert!(reporter.problems.is_empty());
//! ```
//!
//! ## See also
//! - `ldt_core::lang` for registry-backed language vocabulary.

pub mod ast;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
