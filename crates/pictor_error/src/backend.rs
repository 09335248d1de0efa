//! Errors raised while talking to a hosted bot backend.

/// Error conditions for backend bot calls.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum BackendErrorKind {
    /// Transport failure before a response arrived
    #[display("HTTP request failed: {}", _0)]
    Http(String),

    /// Non-success status from the backend
    #[display("API error (status {}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or reason
        message: String,
    },

    /// Failure while reading the event stream
    #[display("Stream error: {}", _0)]
    Stream(String),

    /// An event payload could not be decoded
    #[display("Failed to deserialize response: {}", _0)]
    Deserialization(String),

    /// The backend bot sent an `error` event
    #[display("Bot {} reported an error: {}", bot, text)]
    BotReported {
        /// Name of the backend bot
        bot: String,
        /// Error text sent by the bot
        text: String,
        /// Whether the bot allows a retry
        allow_retry: bool,
    },

    /// The bot closed the stream without sending anything
    #[display("Bot {} sent no response", _0)]
    Empty(String),
}

/// Backend error with location tracking.
///
/// # Examples
///
/// ```
/// use pictor_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::Api {
///     status: 503,
///     message: "overloaded".to_string(),
/// });
/// assert!(format!("{}", err).contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The error kind
    pub kind: BackendErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &BackendErrorKind {
        &self.kind
    }
}
