//! User-supplied file references.

use serde::{Deserialize, Serialize};

/// A file attached to a message.
///
/// Attachments are read-only: they are validated and forwarded, never
/// rewritten.
///
/// # Examples
///
/// ```
/// use pictor_core::Attachment;
///
/// let photo = Attachment::new("https://cdn.example.com/cat.png", "image/png");
/// assert!(photo.is_image());
///
/// let report = Attachment::new("https://cdn.example.com/q3.pdf", "application/pdf");
/// assert!(!report.is_image());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Attachment {
    /// Where the content can be fetched
    pub url: String,
    /// Declared media type, e.g. "image/png"
    pub content_type: String,
    /// Original file name
    #[serde(default)]
    pub name: String,
    /// Text the platform extracted from the file, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_content: Option<String>,
}

impl Attachment {
    /// Create an attachment with an empty name.
    pub fn new(url: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content_type: content_type.into(),
            name: String::new(),
            parsed_content: None,
        }
    }

    /// Set the file name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Whether the declared media type starts with `image`.
    ///
    /// Only the declared type is consulted; content is never sniffed.
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image")
    }
}
