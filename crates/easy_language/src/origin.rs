//! Source provenance.
//!
//! `SourceOrigin` records where a token or syntax node came from: the
//! file name, the byte offset at which its scan began, and the full source
//! text. Line and column are derived on demand for diagnostics.

use std::fmt;
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use easy_foundation::ErrorContext;

/// Provenance of a token or syntax node.
///
/// Cloning is O(1): the file name and source text are shared.
#[derive(Clone, PartialEq, Eq)]
pub struct SourceOrigin {
    filename: Arc<str>,
    offset: usize,
    source: Arc<str>,
}

/// A 1-based line and column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in bytes from the line start.
    pub column: usize,
}

impl SourceOrigin {
    /// Creates an origin.
    ///
    /// `offset` is clamped to the length of `source`, then moved back to
    /// the start of the character it falls inside.
    #[must_use]
    pub fn new(filename: Arc<str>, offset: usize, source: Arc<str>) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        Self {
            filename,
            offset,
            source,
        }
    }

    /// Returns the file name.
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Returns the byte offset at which the scan began.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the full source text.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub fn line(&self) -> usize {
        1 + self.source.as_bytes()[..self.offset]
            .iter()
            .filter(|&&b| b == b'\n')
            .count()
    }

    /// Returns the 1-based column.
    #[must_use]
    pub fn column(&self) -> usize {
        1 + self.offset - self.line_start()
    }

    /// Returns line and column together.
    #[must_use]
    pub fn position(&self) -> Position {
        Position {
            line: self.line(),
            column: self.column(),
        }
    }

    /// Returns the text of the line containing the offset, without its
    /// terminator.
    #[must_use]
    pub fn line_text(&self) -> &str {
        let line = &self.source[self.line_start()..self.line_end()];
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Returns the source text from the offset up to `end`.
    ///
    /// `end` is clamped to the source length; an `end` before the offset
    /// yields an empty slice.
    #[must_use]
    pub fn text_to(&self, end: usize) -> &str {
        let end = end.clamp(self.offset, self.source.len());
        self.source.get(self.offset..end).unwrap_or_default()
    }

    /// Formats a diagnostic pointing at this origin:
    ///
    /// ```text
    /// in main.easy on line 2 column 5
    ///     x = @
    ///     *
    /// ```
    #[must_use]
    pub fn location_message(&self) -> String {
        let column = self.column();
        format!(
            "in {} on line {} column {}\n{}\n{}*\n",
            self.filename,
            self.line(),
            column,
            self.line_text(),
            " ".repeat(column - 1)
        )
    }

    /// Converts this origin into context for a runtime error.
    #[must_use]
    pub fn error_context(&self) -> ErrorContext {
        ErrorContext::new()
            .with_source(self.filename.as_ref())
            .with_position(self.line(), self.column())
    }

    fn line_start(&self) -> usize {
        self.source[..self.offset].rfind('\n').map_or(0, |i| i + 1)
    }

    fn line_end(&self) -> usize {
        self.source[self.offset..]
            .find('\n')
            .map_or(self.source.len(), |i| self.offset + i)
    }
}

// The source text is omitted: it can be arbitrarily large.
impl fmt::Debug for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceOrigin")
            .field("filename", &self.filename)
            .field("offset", &self.offset)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for SourceOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.filename, self.line(), self.column())
    }
}
