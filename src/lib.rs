//! Easy - lexical front end and value model for a small scripting language
//!
//! This crate re-exports all layers of the Easy system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 1: easy_language   - Origins, tokens, indentation-aware lexer, syntax nodes
//! Layer 0: easy_foundation - Values, tables, forms, the metatable registry
//! ```

pub use easy_foundation as foundation;
pub use easy_language as language;
