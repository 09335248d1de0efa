//! Configuration error types.

/// Configuration error with source location.
///
/// `key` names the setting at fault when one is known.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Setting the error concerns
    pub key: Option<String>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use pictor_error::ConfigError;
    ///
    /// let err = ConfigError::new("configuration file is not valid TOML");
    /// assert!(err.key.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            key: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Create an error about one setting.
    ///
    /// ```
    /// use pictor_error::ConfigError;
    ///
    /// let err = ConfigError::for_key("access_key", "not set");
    /// assert_eq!(err.key.as_deref(), Some("access_key"));
    /// assert!(err.to_string().contains("access_key: not set"));
    /// ```
    #[track_caller]
    pub fn for_key(key: impl Into<String>, message: impl AsRef<str>) -> Self {
        let key = key.into();
        let location = std::panic::Location::caller();
        Self {
            message: format!("{}: {}", key, message.as_ref()),
            key: Some(key),
            line: location.line(),
            file: location.file(),
        }
    }
}
