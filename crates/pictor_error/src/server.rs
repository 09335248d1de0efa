//! Errors raised while running the bot server.

/// Error conditions for the bot server.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// The listen address could not be bound
    #[display("Failed to bind {}: {}", addr, reason)]
    Bind {
        /// Requested listen address
        addr: String,
        /// Underlying I/O error
        reason: String,
    },

    /// The accept loop stopped with an error
    #[display("Server stopped: {}", _0)]
    Serve(String),
}

/// Server error with location tracking.
///
/// # Examples
///
/// ```
/// use pictor_error::{ServerError, ServerErrorKind};
///
/// let err = ServerError::new(ServerErrorKind::Bind {
///     addr: "0.0.0.0:80".to_string(),
///     reason: "permission denied".to_string(),
/// });
/// assert!(format!("{}", err).contains("0.0.0.0:80"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The specific error condition
    pub kind: ServerErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
