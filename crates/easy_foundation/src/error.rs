//! Error types for the Easy value model.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::types::{Arity, Kind};

/// Result type for value-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for value-model operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Records that the error unwound through the call frame `frame`.
    ///
    /// Frames are added while unwinding, so each new frame is an outer one.
    #[must_use]
    pub fn in_frame(mut self, frame: impl Into<String>) -> Self {
        self.context
            .get_or_insert_with(ErrorContext::default)
            .stack
            .insert(0, frame.into());
        self
    }

    /// Creates a type mismatch error.
    #[must_use]
    pub fn type_mismatch(expected: Kind, actual: Kind) -> Self {
        Self::new(ErrorKind::TypeMismatch { expected, actual })
    }

    /// Creates an undefined name error.
    #[must_use]
    pub fn undefined_name(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UndefinedName(name.into()))
    }

    /// Creates an arity mismatch error.
    #[must_use]
    pub fn arity_mismatch(expected: Arity, actual: usize) -> Self {
        Self::new(ErrorKind::ArityMismatch { expected, actual })
    }

    /// Creates a not-callable error.
    #[must_use]
    pub fn not_callable(kind: Kind) -> Self {
        Self::new(ErrorKind::NotCallable(kind))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A value of one kind was used where another was required.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The expected kind.
        expected: Kind,
        /// The actual kind encountered.
        actual: Kind,
    },

    /// Wrong number of arguments to a function.
    #[error("arity mismatch: expected {expected}, got {actual}")]
    ArityMismatch {
        /// The arity the function declares.
        expected: Arity,
        /// Actual number of arguments.
        actual: usize,
    },

    /// Name was not found in a table or any of its parents.
    #[error("undefined name: {0}")]
    UndefinedName(String),

    /// Tried to invoke a value that has no invocable body.
    #[error("value of kind {0} is not callable")]
    NotCallable(Kind),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source (1-based).
    pub line: Option<usize>,
    /// Column number in source (1-based).
    pub column: Option<usize>,
    /// Stack of call frames, innermost last.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source location.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line and column.
    #[must_use]
    pub fn with_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let (Some(line), Some(col)) = (self.line, self.column) {
                write!(f, ":{line}:{col}")?;
            }
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in self.stack.iter().rev() {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
