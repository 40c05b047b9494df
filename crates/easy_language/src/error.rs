//! Lexical errors.

use thiserror::Error;

use crate::origin::SourceOrigin;

/// A lexical error, fatal to the scan that produced it.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}\n{}", .origin.location_message())]
pub struct LexError {
    /// What went wrong.
    pub kind: LexErrorKind,
    /// Where the failing token's scan began.
    pub origin: SourceOrigin,
}

impl LexError {
    /// Creates a lexical error.
    #[must_use]
    pub const fn new(kind: LexErrorKind, origin: SourceOrigin) -> Self {
        Self { kind, origin }
    }
}

/// Categorized lexical error kinds.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A character starts no symbol, word, number, or string.
    #[error("unknown symbol: {0:?}")]
    UnknownSymbol(char),

    /// A string literal has no closing quote before the end of its line.
    #[error("unterminated string literal")]
    UnterminatedString,

    /// A dedent lands on a width that no open block has.
    #[error("inconsistent indentation: width {width} matches no enclosing block")]
    BadIndent {
        /// The measured width of the offending line.
        width: usize,
    },
}

/// Result type for lexing.
pub type Result<T> = std::result::Result<T, LexError>;
