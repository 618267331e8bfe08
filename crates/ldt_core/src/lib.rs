//! Provide the canonical Lua language vocabulary for the LDT toolchain.
//!
//! This crate is intentionally small and dependency-free. It contains the registry-backed
//! vocabularies (reserved words, operators, punctuation) that the lexer, parser, and any
//! downstream tooling share, so that spellings, precedence, and token identity are defined
//! in exactly one place.
//!
//! ## Notes
//!
//! - This is a vocabulary crate: **no IO**, no global state, and no AST or parser types.
//! - The target dialect is Lua 5.1.

pub mod lang;
