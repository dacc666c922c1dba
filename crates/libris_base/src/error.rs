use std::error::Error as StdError;
use std::fmt;

/* # Why a custom error type and not use anyhow/eyre/thiserror etc?

- Better control over error handling
- No dependencies to compile and integrate
- More transparency into error handling logic
 */

/// Error variants that can occur in libris operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// A required input field was missing or empty
    Validation { message: String },

    /// A referenced record does not exist
    NotFound { message: String },

    /// Catch-all for other errors with a message
    Message { message: String },
}

/* # Why separate ErrorKind and LibrisError?
This two-layer design provides a clear separation of concerns:
- ErrorKind: structural variants the HTTP layer can pattern match on
- LibrisError: wraps ErrorKind with additional runtime context strings

Users can match on ErrorKind for specific handling (e.g. mapping Validation
to HTTP 400), while LibrisError provides ergonomic context attachment for
propagation.
*/

/// Error type wrapping ErrorKind with optional context.
/// Implements the standard Error trait and supports context attachment.
#[derive(Debug)]
pub struct LibrisError {
    kind: ErrorKind,
    context: Vec<String>,
}

impl LibrisError {
    /// Creates a new error from an ErrorKind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
        }
    }

    /// Creates a validation error with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation {
            message: message.into(),
        })
    }

    /// Creates a not-found error with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound {
            message: message.into(),
        })
    }

    /// Creates a generic message error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
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

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }
}

impl From<ErrorKind> for LibrisError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for LibrisError {}

impl fmt::Display for LibrisError {
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
            ErrorKind::Validation { message }
            | ErrorKind::NotFound { message }
            | ErrorKind::Message { message } => {
                write!(f, "{}", message)
            }
        }
    }
}

/* # Why use Box<LibrisError> in the result type?

Boxing the error reduces the size of the result type, making it more efficient
to return in the common case.
*/

/// Standard result type for libris operations.
pub type LibrisResult<T> = std::result::Result<T, Box<LibrisError>>;

/// Creates a boxed message error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        Box::new($crate::error::LibrisError::message(format!($($arg)*)))
    };
}

/* # Why provide ResultExt for context attachment?
The ResultExt trait provides ergonomic methods to add context to errors during
propagation. Using `.context("message")` is more readable than manually mapping
and wrapping errors.
*/

/// Extension trait for attaching context to Results.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    /// Eager evaluation: context is evaluated immediately.
    fn context(self, context: impl Into<String>) -> LibrisResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    /// Prefer this to avoid expensive string formatting in the success path.
    fn with_context<F>(self, f: F) -> LibrisResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for LibrisResult<T> {
    fn context(self, context: impl Into<String>) -> LibrisResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> LibrisResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}
