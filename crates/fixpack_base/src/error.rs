use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;

use crate::pal::FilePath;

/// Error variants that can occur in fixpack operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A requested fixture path has no definition in the corpus
    PathNotFound { path: FilePath },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/// Error type wrapping [`ErrorKind`] with an optional chain of context strings.
///
/// The two-layer design keeps structural variants (file paths, io sources)
/// pattern-matchable while still allowing ergonomic context attachment
/// during propagation.
#[derive(Debug)]
pub struct FixpackError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl FixpackError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a catch-all message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a PathNotFound error for the given fixture path.
    pub fn path_not_found(path: FilePath) -> Self {
        Self::new(ErrorKind::PathNotFound { path })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    /// Useful to avoid expensive string construction for successful paths.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    /// Allows pattern matching on specific error variants.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if this error is a missing-fixture lookup failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, ErrorKind::PathNotFound { .. })
    }

    /// Returns the innermost error in the chain.
    /// Traverses the error source chain to find the root cause.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for FixpackError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for FixpackError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::PathNotFound { .. } => None,
            ErrorKind::Message { .. } => None,
        }
    }
}

impl fmt::Display for FixpackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Display context first if present
        for (i, ctx) in self.context.iter().enumerate() {
            if i == 0 {
                write!(f, "{}", ctx)?;
            } else {
                write!(f, ": {}", ctx)?;
            }
        }

        if !self.context.is_empty() {
            write!(f, ": ")?;
        }

        match &self.kind {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::PathNotFound { path } => {
                write!(f, "Fixture not found: {}", path)
            }
            ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/// Standard result type for fixpack operations.
///
/// Boxing the error keeps the result type small in the common Ok case.
pub type FixpackResult<T> = std::result::Result<T, Box<FixpackError>>;

/// Constructs a boxed message error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::error::FixpackError::message(format!($($arg)*)))
    };
}

/// Extension trait for attaching context to Results.
/// Provides ergonomic error context attachment during error propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> FixpackResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> FixpackResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for FixpackResult<T> {
    fn context(self, context: impl Into<String>) -> FixpackResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> FixpackResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
