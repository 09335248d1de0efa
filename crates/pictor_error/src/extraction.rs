//! Errors from pulling structured data out of LLM replies.

/// Specific extraction failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ExtractionErrorKind {
    /// Neither a fenced block nor a bracketed span was present
    #[display("No JSON found in response (length: {})", _0)]
    NoJsonFound(usize),
    /// The located payload is not valid JSON of the expected shape
    #[display("Invalid JSON: {}", _0)]
    InvalidJson(String),
    /// The segment array has the wrong arity
    #[display("Expected {} segments, got {}", expected, actual)]
    WrongSegmentCount {
        /// Required number of segments
        expected: usize,
        /// Number of segments found
        actual: usize,
    },
    /// A segment is not an object carrying the required fields
    #[display("Segment {} is invalid: {}", index, reason)]
    InvalidSegment {
        /// Zero-based segment index
        index: usize,
        /// What is wrong with it
        reason: String,
    },
}

/// Extraction error with location tracking.
///
/// # Examples
///
/// ```
/// use pictor_error::{ExtractionError, ExtractionErrorKind};
///
/// let err = ExtractionError::new(ExtractionErrorKind::WrongSegmentCount {
///     expected: 4,
///     actual: 3,
/// });
/// assert!(format!("{}", err).contains("Expected 4 segments, got 3"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Extraction Error: {} at line {} in {}", kind, line, file)]
pub struct ExtractionError {
    /// The specific error condition
    pub kind: ExtractionErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ExtractionError {
    /// Create a new ExtractionError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ExtractionErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ExtractionErrorKind {
        &self.kind
    }
}
