//! Configuration for the lexer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the lexer.
///
/// Controls how leading whitespace is measured and which lexical
/// conveniences are enabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LexerConfig {
    /// Tab stop used when measuring indentation. A tab advances the width
    /// to the next multiple of this value; 0 or 1 counts a tab as 1.
    pub tab_width: usize,

    /// Treat line terminators inside `(`..`)` and `[`..`]` as whitespace.
    pub bracket_continuation: bool,

    /// Treat `#` as the start of a comment running to end of line.
    pub comments: bool,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            tab_width: 8,
            bracket_continuation: true,
            comments: true,
        }
    }
}

impl LexerConfig {
    /// Creates a configuration with every convenience disabled: each
    /// character of leading whitespace counts as one column, `#` is an
    /// ordinary (unknown) character, and brackets do not join lines.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            tab_width: 1,
            bracket_continuation: false,
            comments: false,
        }
    }

    /// Builder method to set the tab width.
    #[must_use]
    pub fn with_tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    /// Builder method to set bracket continuation.
    #[must_use]
    pub fn with_bracket_continuation(mut self, enabled: bool) -> Self {
        self.bracket_continuation = enabled;
        self
    }

    /// Builder method to enable or disable comments.
    #[must_use]
    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.comments = enabled;
        self
    }

    /// Returns the width after a whitespace character at `width`.
    pub(crate) fn advance_width(&self, width: usize, c: char) -> usize {
        if c == '\t' && self.tab_width > 1 {
            (width / self.tab_width + 1) * self.tab_width
        } else {
            width + 1
        }
    }
}
