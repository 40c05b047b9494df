//! Lexer, tokens, and syntax nodes for Easy.
//!
//! This crate provides:
//! - [`Lexer`] - Indentation-sensitive tokenization of Easy source
//! - [`Token`] - Positioned lexical units with typed literals
//! - [`SourceOrigin`] - Provenance for diagnostics
//! - [`SyntaxNode`] - The tree shape a parser builds from tokens
//! - [`LexError`] - Fatal lexical errors

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod error;
pub mod lexer;
pub mod node;
pub mod origin;
pub mod token;


pub use config::LexerConfig;
pub use error::{LexError, LexErrorKind};
pub use lexer::{Lexer, tokenize};
pub use node::{SyntaxNode, Walk, kinds};
pub use origin::{Position, SourceOrigin};
pub use token::{Keyword, Symbol, Token, TokenKind};
