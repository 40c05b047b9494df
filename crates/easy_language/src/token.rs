//! Token types for Easy.
//!
//! Tokens are the output of the lexer and input to the parser.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use easy_foundation::Value;

use crate::origin::SourceOrigin;

/// A token from lexical analysis.
///
/// Tokens are immutable. A literal is present exactly when the kind is
/// [`TokenKind::Identifier`], [`TokenKind::Number`] or [`TokenKind::String`].
#[derive(Clone, Debug)]
pub struct Token {
    kind: TokenKind,
    literal: Option<Value>,
    origin: SourceOrigin,
}

impl Token {
    /// Creates a token without a literal.
    pub(crate) fn new(kind: TokenKind, origin: SourceOrigin) -> Self {
        debug_assert!(!kind.has_literal(), "{kind:?} requires a literal");
        Self {
            kind,
            literal: None,
            origin,
        }
    }

    /// Creates a token carrying a literal.
    pub(crate) fn with_literal(kind: TokenKind, literal: Value, origin: SourceOrigin) -> Self {
        debug_assert!(kind.has_literal(), "{kind:?} cannot carry a literal");
        Self {
            kind,
            literal: Some(literal),
            origin,
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub const fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the literal payload, if this kind carries one.
    #[must_use]
    pub const fn literal(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    /// Returns where the scan of this token began.
    #[must_use]
    pub const fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Tokens compare by kind and literal; origins are ignored.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {}", self.kind.name(), literal.repr()),
            None => write!(f, "{}", self.kind.name()),
        }
    }
}

/// Token kinds for Easy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TokenKind {
    /// A fixed punctuation symbol.
    Symbol(Symbol),
    /// A reserved word.
    Keyword(Keyword),
    /// A word that is not a keyword; literal is its text.
    Identifier,
    /// Numeric literal; literal is the parsed number.
    Number,
    /// String literal; literal is the decoded text.
    String,
    /// Opens a block: the line is indented deeper than the enclosing one.
    Indent,
    /// Closes the innermost open block.
    Dedent,
    /// End of a logical line.
    Newline,
    /// End of input.
    Eof,
}

impl TokenKind {
    /// Returns true if tokens of this kind carry a literal.
    #[must_use]
    pub const fn has_literal(self) -> bool {
        matches!(self, Self::Identifier | Self::Number | Self::String)
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Symbol(symbol) => symbol.quoted(),
            Self::Keyword(keyword) => keyword.spelling(),
            Self::Identifier => "identifier",
            Self::Number => "number",
            Self::String => "string",
            Self::Indent => "indent",
            Self::Dedent => "dedent",
            Self::Newline => "newline",
            Self::Eof => "end of input",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

macro_rules! symbols {
    ($($(#[$doc:meta])* $variant:ident => $spelling:literal,)*) => {
        /// Punctuation symbols.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Symbol {
            $($(#[$doc])* $variant,)*
        }

        impl Symbol {
            /// Every symbol, longest spelling first.
            ///
            /// Scanning tries candidates in this order so that no shorter
            /// spelling shadows a longer one at the same position.
            pub const ALL: &'static [Symbol] = &[$(Symbol::$variant,)*];

            /// Returns the exact source spelling.
            #[must_use]
            pub const fn spelling(self) -> &'static str {
                match self {
                    $(Self::$variant => $spelling,)*
                }
            }

            const fn quoted(self) -> &'static str {
                match self {
                    $(Self::$variant => concat!("'", $spelling, "'"),)*
                }
            }
        }
    };
}

symbols! {
    /// `...`
    Ellipsis => "...",
    /// `==`
    EqEq => "==",
    /// `<=`
    LtEq => "<=",
    /// `>=`
    GtEq => ">=",
    /// `!=`
    NotEq => "!=",
    /// `\`
    Backslash => "\\",
    /// `.`
    Dot => ".",
    /// `:`
    Colon => ":",
    /// `+`
    Plus => "+",
    /// `-`
    Minus => "-",
    /// `*`
    Star => "*",
    /// `/`
    Slash => "/",
    /// `%`
    Percent => "%",
    /// `(`
    LParen => "(",
    /// `)`
    RParen => ")",
    /// `[`
    LBracket => "[",
    /// `]`
    RBracket => "]",
    /// `,`
    Comma => ",",
    /// `=`
    Eq => "=",
    /// `<`
    Lt => "<",
    /// `>`
    Gt => ">",
    /// `;`
    Semicolon => ";",
}

impl Symbol {
    /// Returns the symbol spelled exactly `text`.
    #[must_use]
    pub fn from_spelling(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.spelling() == text)
    }

    /// Returns the longest symbol that `text` starts with.
    #[must_use]
    pub fn longest_prefix_of(text: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| text.starts_with(s.spelling()))
    }

    /// Returns true if this symbol opens a bracketed group.
    #[must_use]
    pub const fn is_open_bracket(self) -> bool {
        matches!(self, Self::LParen | Self::LBracket)
    }

    /// Returns true if this symbol closes a bracketed group.
    #[must_use]
    pub const fn is_close_bracket(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket)
    }
}

/// Reserved words.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Keyword {
    /// `is`
    Is,
    /// `while`
    While,
    /// `if`
    If,
    /// `else`
    Else,
    /// `and`
    And,
    /// `or`
    Or,
    /// `return`
    Return,
}

impl Keyword {
    /// Every keyword.
    pub const ALL: [Keyword; 7] = [
        Keyword::Is,
        Keyword::While,
        Keyword::If,
        Keyword::Else,
        Keyword::And,
        Keyword::Or,
        Keyword::Return,
    ];

    /// Returns the exact source spelling.
    #[must_use]
    pub const fn spelling(self) -> &'static str {
        match self {
            Self::Is => "is",
            Self::While => "while",
            Self::If => "if",
            Self::Else => "else",
            Self::And => "and",
            Self::Or => "or",
            Self::Return => "return",
        }
    }

    /// Classifies a whole word; case-sensitive.
    #[must_use]
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "is" => Some(Self::Is),
            "while" => Some(Self::While),
            "if" => Some(Self::If),
            "else" => Some(Self::Else),
            "and" => Some(Self::And),
            "or" => Some(Self::Or),
            "return" => Some(Self::Return),
            _ => None,
        }
    }
}
