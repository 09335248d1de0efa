//! Pipeline orchestration errors.

/// Error conditions raised by the pipeline itself rather than a backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// The inbound turn carried no messages
    #[display("Conversation contains no messages")]
    EmptyConversation,
    /// A template referenced a placeholder with no value
    #[display("Template placeholder '{}' has no value", _0)]
    Template(String),
    /// The output receiver went away mid-turn
    #[display("Output channel closed")]
    ChannelClosed,
    /// No bot profile with this name exists
    #[display("Unknown bot: {}", _0)]
    UnknownBot(String),
    /// A bot profile is missing required settings
    #[display("Invalid bot profile: {}", _0)]
    InvalidProfile(String),
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }
}
