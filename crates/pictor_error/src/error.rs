//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, ExtractionError, PipelineError, PipelineErrorKind, ServerError,
};

/// The foundation error enum every Pictor crate converts into.
///
/// # Examples
///
/// ```
/// use pictor_error::{BackendError, BackendErrorKind, PictorError};
///
/// let backend_err = BackendError::new(BackendErrorKind::Empty("Imagen-3-Fast".into()));
/// let err: PictorError = backend_err.into();
/// assert!(format!("{}", err).contains("Imagen-3-Fast"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum PictorErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Hosted bot backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Structured-data extraction error
    #[from(ExtractionError)]
    Extraction(ExtractionError),
    /// Pipeline orchestration error
    #[from(PipelineError)]
    Pipeline(PipelineError),
    /// Bot server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Coarse failure class used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorClass {
    /// Network or backend bot failure
    #[display("backend")]
    Backend,
    /// LLM output could not be coerced into the expected shape
    #[display("extraction")]
    Extraction,
    /// Anything else: configuration, templates, programming errors
    #[display("internal")]
    Internal,
}

/// Pictor error with kind discrimination.
///
/// # Examples
///
/// ```
/// use pictor_error::{ConfigError, PictorResult};
///
/// fn might_fail() -> PictorResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Pictor Error: {}", _0)]
pub struct PictorError(Box<PictorErrorKind>);

impl PictorError {
    /// Create a new error from a kind.
    pub fn new(kind: PictorErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PictorErrorKind {
        &self.0
    }

    /// Classify the error for observability.
    ///
    /// A closed output channel counts as a backend-side failure: the caller
    /// hung up, nothing inside the pipeline went wrong.
    pub fn class(&self) -> ErrorClass {
        match self.kind() {
            PictorErrorKind::Backend(_) => ErrorClass::Backend,
            PictorErrorKind::Extraction(_) => ErrorClass::Extraction,
            PictorErrorKind::Pipeline(e) if e.kind == PipelineErrorKind::ChannelClosed => {
                ErrorClass::Backend
            }
            PictorErrorKind::Config(_)
            | PictorErrorKind::Pipeline(_)
            | PictorErrorKind::Server(_) => ErrorClass::Internal,
        }
    }
}

// Generic From implementation for any type that converts to PictorErrorKind
impl<T> From<T> for PictorError
where
    T: Into<PictorErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Pictor operations.
pub type PictorResult<T> = std::result::Result<T, PictorError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BackendErrorKind, ExtractionErrorKind};

    #[test]
    fn test_class_backend() {
        let err: PictorError = BackendError::new(BackendErrorKind::Http("timeout".into())).into();
        assert_eq!(err.class(), ErrorClass::Backend);
    }

    #[test]
    fn test_class_extraction() {
        let err: PictorError = ExtractionError::new(ExtractionErrorKind::NoJsonFound(12)).into();
        assert_eq!(err.class(), ErrorClass::Extraction);
    }

    #[test]
    fn test_class_internal() {
        let err: PictorError = PipelineError::new(PipelineErrorKind::Template("x".into())).into();
        assert_eq!(err.class(), ErrorClass::Internal);
        let err: PictorError = ConfigError::new("bad").into();
        assert_eq!(err.class(), ErrorClass::Internal);
    }

    #[test]
    fn test_channel_closed_is_backend() {
        let err: PictorError = PipelineError::new(PipelineErrorKind::ChannelClosed).into();
        assert_eq!(err.class(), ErrorClass::Backend);
    }
}
