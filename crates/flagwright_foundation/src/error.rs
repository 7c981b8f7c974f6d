//! Error types for flagwright.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Engine diagnostics are data, not errors; these types cover failures
//! outside the deterministic pass (I/O, malformed trees, providers).

use std::fmt;

use thiserror::Error;

/// The main error type for flagwright operations.
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

    /// Creates an invalid declaration error.
    #[must_use]
    pub fn invalid_declaration(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidDeclaration {
            path: path.into(),
            message: message.into(),
        })
    }

    /// Creates an unknown capability error.
    #[must_use]
    pub fn unknown_capability(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownCapability(name.into()))
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Config(message.into()))
    }

    /// Creates a remote provider error.
    #[must_use]
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Provider(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A declaration tree violates a structural invariant.
    #[error("invalid declaration {path}: {message}")]
    InvalidDeclaration {
        /// Dotted path of the offending declaration.
        path: String,
        /// What is wrong with it.
        message: String,
    },

    /// A capability identifier was not recognized.
    #[error("unknown capability: {0}")]
    UnknownCapability(String),

    /// Encoding or decoding a declaration tree failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// File system access failed.
    #[error("i/o error: {0}")]
    Io(String),

    /// Generator configuration is malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The remote configuration provider failed.
    #[error("provider error: {0}")]
    Provider(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<usize>,
    /// Column number in source.
    pub column: Option<usize>,
    /// Declarations enclosing the failure, outermost first.
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

    /// Adds an enclosing declaration.
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
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
