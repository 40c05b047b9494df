//! Lexer for Easy.
//!
//! The lexer converts source text into a stream of tokens. Blocks are
//! delimited by indentation: the lexer keeps a stack of open block widths
//! and synthesizes `Indent` and `Dedent` tokens where the width of a
//! logical line changes. A dedent must land exactly on a width that is
//! still open; anything else is a [`LexErrorKind::BadIndent`].
//!
//! Every token carries a [`SourceOrigin`] whose offset is where that
//! token's scan began.

use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::sync::Arc;

use easy_foundation::{Metatables, Value};
use tracing::{debug, trace};

use crate::config::LexerConfig;
use crate::error::{LexError, LexErrorKind, Result};
use crate::origin::SourceOrigin;
use crate::token::{Keyword, Symbol, Token, TokenKind};

/// Lexer for Easy source code.
///
/// Produce tokens with [`Lexer::next_token`] or by iterating. The stream
/// ends with exactly one [`TokenKind::Eof`]; after that `next_token` keeps
/// returning `Eof` and the iterator returns `None`. An error ends the scan:
/// `next_token` keeps returning it and the iterator returns `None`.
pub struct Lexer<'m> {
    /// Source text being tokenized.
    source: Arc<str>,
    /// File name recorded in every origin.
    filename: Arc<str>,
    /// Registry used to build literal values.
    metatables: &'m Metatables,
    config: LexerConfig,
    /// Current byte offset in source.
    position: usize,
    /// Byte offset where the token being built began.
    token_start: usize,
    /// Widths of the open blocks; the base entry 0 is never popped.
    indent_stack: Vec<usize>,
    /// Tokens already scanned but not yet returned (runs of dedents).
    pending: VecDeque<Token>,
    /// True at the start of input and right after a `Newline` token.
    at_line_start: bool,
    /// Nesting depth of open `(` and `[`.
    depth: usize,
    state: State,
}

enum State {
    Scanning,
    Finished,
    Failed(LexError),
}

impl<'m> Lexer<'m> {
    /// Creates a lexer with the default configuration.
    ///
    /// The default enables `#` comments and line joining inside brackets.
    /// Use [`Lexer::with_config`] with [`LexerConfig::strict`] for a lexer
    /// where `#` is an unknown symbol, every line terminator outside a
    /// string is a `Newline`, and each whitespace character counts as one
    /// column of indentation.
    #[must_use]
    pub fn new(
        source: impl Into<Arc<str>>,
        filename: impl Into<Arc<str>>,
        metatables: &'m Metatables,
    ) -> Self {
        Self::with_config(source, filename, metatables, LexerConfig::default())
    }

    /// Creates a lexer with an explicit configuration.
    #[must_use]
    pub fn with_config(
        source: impl Into<Arc<str>>,
        filename: impl Into<Arc<str>>,
        metatables: &'m Metatables,
        config: LexerConfig,
    ) -> Self {
        Self {
            source: source.into(),
            filename: filename.into(),
            metatables,
            config,
            position: 0,
            token_start: 0,
            indent_stack: vec![0],
            pending: VecDeque::new(),
            at_line_start: true,
            depth: 0,
            state: State::Scanning,
        }
    }

    /// Returns the number of currently open indentation blocks.
    #[must_use]
    pub fn indent_depth(&self) -> usize {
        self.indent_stack.len() - 1
    }

    /// Returns the next token from the source.
    ///
    /// # Errors
    /// Returns a [`LexError`] on an unknown character, an unterminated
    /// string, or an inconsistent dedent. Once an error is returned the
    /// lexer is stuck on it.
    pub fn next_token(&mut self) -> Result<Token> {
        match &self.state {
            State::Failed(err) => return Err(err.clone()),
            State::Finished => return Ok(self.eof_token()),
            State::Scanning => {}
        }

        let result = match self.pending.pop_front() {
            Some(token) => Ok(token),
            None => self.scan(),
        };

        match result {
            Ok(token) => {
                trace!(kind = %token.kind(), offset = token.origin().offset(), "token");
                if token.is_eof() {
                    self.state = State::Finished;
                }
                Ok(token)
            }
            Err(err) => {
                debug!(error = %err.kind, at = %err.origin, "lexical error");
                self.state = State::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Scans one token, handling indentation at line starts.
    fn scan(&mut self) -> Result<Token> {
        if self.at_line_start {
            self.at_line_start = false;
            if let Some(token) = self.scan_indentation()? {
                return Ok(token);
            }
        }

        self.skip_whitespace();
        self.token_start = self.position;

        let Some(c) = self.peek_char() else {
            return Ok(self.finish());
        };

        match c {
            '\n' => {
                self.advance();
                self.at_line_start = true;
                Ok(Token::new(TokenKind::Newline, self.origin()))
            }
            c if c.is_ascii_digit() => Ok(self.scan_number()),
            '.' if self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.scan_number())
            }
            '"' | '\'' => self.scan_string(false),
            'r' if matches!(self.peek_char_n(1), Some('"' | '\'')) => self.scan_string(true),
            c if is_word_start(c) => Ok(self.scan_word()),
            c => self.scan_symbol(c),
        }
    }

    /// Measures the leading whitespace of the next non-blank line and
    /// emits the first indentation token it implies, if any.
    ///
    /// Blank and comment-only lines are consumed without producing tokens.
    /// At end of input nothing is measured; [`Lexer::finish`] unwinds the
    /// stack instead.
    fn scan_indentation(&mut self) -> Result<Option<Token>> {
        loop {
            let line_start = self.position;
            let mut width = 0;
            while let Some(c) = self.peek_char() {
                if c == '\n' || !c.is_whitespace() {
                    break;
                }
                width = self.config.advance_width(width, c);
                self.advance();
            }
            if self.config.comments && self.peek_char() == Some('#') {
                self.skip_comment();
            }

            match self.peek_char() {
                None => return Ok(None),
                Some('\n') => self.advance(),
                Some(_) => {
                    self.token_start = line_start;
                    return self.apply_indentation(width);
                }
            }
        }
    }

    /// Compares `width` with the open blocks, pushing or popping as needed.
    fn apply_indentation(&mut self, width: usize) -> Result<Option<Token>> {
        let current = self.current_indent();

        if width > current {
            trace!(width, "indent");
            self.indent_stack.push(width);
            return Ok(Some(Token::new(TokenKind::Indent, self.origin())));
        }

        if width < current {
            if !self.indent_stack.contains(&width) {
                return Err(self.error(LexErrorKind::BadIndent { width }));
            }
            while self.current_indent() > width {
                self.indent_stack.pop();
                trace!(width, "dedent");
                let dedent = Token::new(TokenKind::Dedent, self.origin());
                self.pending.push_back(dedent);
            }
            return Ok(self.pending.pop_front());
        }

        Ok(None)
    }

    /// Closes every open block, then ends the stream.
    fn finish(&mut self) -> Token {
        while self.indent_stack.len() > 1 {
            self.indent_stack.pop();
            trace!("dedent at end of input");
            let dedent = Token::new(TokenKind::Dedent, self.origin());
            self.pending.push_back(dedent);
        }
        let eof = self.eof_token();
        self.pending.push_back(eof);
        self.pending
            .pop_front()
            .unwrap_or_else(|| self.eof_token())
    }

    fn eof_token(&self) -> Token {
        let origin = SourceOrigin::new(
            Arc::clone(&self.filename),
            self.source.len(),
            Arc::clone(&self.source),
        );
        Token::new(TokenKind::Eof, origin)
    }

    /// Scans a number: digits with at most one interior `.`.
    ///
    /// A `.` is consumed only when a digit follows it, so `1...` is the
    /// number `1` followed by `...`.
    fn scan_number(&mut self) -> Token {
        let mut has_dot = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                self.advance();
            } else if c == '.'
                && !has_dot
                && self.peek_char_n(1).is_some_and(|c| c.is_ascii_digit())
            {
                has_dot = true;
                self.advance();
            } else {
                break;
            }
        }

        let origin = self.origin();
        // Digits with at most one interior dot always parse.
        let n: f64 = origin.text_to(self.position).parse().unwrap_or_default();
        Token::with_literal(TokenKind::Number, self.metatables.make_number(n), origin)
    }

    /// Scans a quoted string, optionally raw (`r"..."`).
    ///
    /// Escapes `\n \t \r \0 \\ \" \'` are decoded; any other escape is kept
    /// verbatim. In a raw string every backslash is kept, though it still
    /// stops the next character from closing the string.
    fn scan_string(&mut self, raw: bool) -> Result<Token> {
        if raw {
            self.advance(); // consume 'r'
        }
        let Some(quote) = self.peek_char() else {
            return Err(self.error(LexErrorKind::UnterminatedString));
        };
        self.advance(); // consume opening quote

        let mut text = String::new();
        loop {
            match self.peek_char() {
                None | Some('\n') => return Err(self.error(LexErrorKind::UnterminatedString)),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek_char() {
                        None | Some('\n') => {
                            return Err(self.error(LexErrorKind::UnterminatedString));
                        }
                        Some(c) => c,
                    };
                    self.advance();
                    match (raw, escaped) {
                        (false, 'n') => text.push('\n'),
                        (false, 't') => text.push('\t'),
                        (false, 'r') => text.push('\r'),
                        (false, '0') => text.push('\0'),
                        (false, '\\' | '"' | '\'') => text.push(escaped),
                        _ => {
                            text.push('\\');
                            text.push(escaped);
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }

        Ok(Token::with_literal(
            TokenKind::String,
            self.metatables.make_string(text),
            self.origin(),
        ))
    }

    /// Scans a word and classifies it as keyword or identifier.
    fn scan_word(&mut self) -> Token {
        while self.peek_char().is_some_and(is_word_char) {
            self.advance();
        }

        let origin = self.origin();
        let word = origin.text_to(self.position);
        match Keyword::from_word(word) {
            Some(keyword) => Token::new(TokenKind::Keyword(keyword), origin),
            None => {
                let literal: Value = self.metatables.make_string(word);
                Token::with_literal(TokenKind::Identifier, literal, origin)
            }
        }
    }

    /// Scans the longest symbol at the current position.
    fn scan_symbol(&mut self, c: char) -> Result<Token> {
        let Some(symbol) = Symbol::longest_prefix_of(&self.source[self.position..]) else {
            return Err(self.error(LexErrorKind::UnknownSymbol(c)));
        };
        self.position += symbol.spelling().len();

        if symbol.is_open_bracket() {
            self.depth += 1;
        } else if symbol.is_close_bracket() {
            self.depth = self.depth.saturating_sub(1);
        }

        Ok(Token::new(TokenKind::Symbol(symbol), self.origin()))
    }

    /// Skips intra-line whitespace and comments. Inside brackets, line
    /// terminators are skipped too when continuation is enabled.
    fn skip_whitespace(&mut self) {
        let joins_lines = self.config.bracket_continuation && self.depth > 0;
        while let Some(c) = self.peek_char() {
            if c == '\n' && !joins_lines {
                break;
            } else if c.is_whitespace() {
                self.advance();
            } else if c == '#' && self.config.comments {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    /// Skips a comment up to, not including, the line terminator.
    fn skip_comment(&mut self) {
        while self.peek_char().is_some_and(|c| c != '\n') {
            self.advance();
        }
    }

    fn current_indent(&self) -> usize {
        self.indent_stack.last().copied().unwrap_or(0)
    }

    fn origin(&self) -> SourceOrigin {
        SourceOrigin::new(
            Arc::clone(&self.filename),
            self.token_start,
            Arc::clone(&self.source),
        )
    }

    fn error(&self, kind: LexErrorKind) -> LexError {
        LexError::new(kind, self.origin())
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.source[self.position..].chars().next()
    }

    /// Peeks `n` characters past the next one.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.source[self.position..].chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.position += c.len_utf8();
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Scanning => Some(self.next_token()),
            State::Finished | State::Failed(_) => None,
        }
    }
}

impl FusedIterator for Lexer<'_> {}

/// Tokenizes all of `source`, including the final `Eof`.
///
/// # Errors
/// Returns the first lexical error encountered.
pub fn tokenize(
    source: impl Into<Arc<str>>,
    filename: impl Into<Arc<str>>,
    metatables: &Metatables,
) -> Result<Vec<Token>> {
    Lexer::new(source, filename, metatables).collect()
}

/// Returns true if `c` can start a word.
fn is_word_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Returns true if `c` can continue a word.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
