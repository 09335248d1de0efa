//! Output chunks streamed back to the caller.

use serde::{Deserialize, Serialize};

/// One incremental piece of a bot reply.
///
/// Chunks are emitted in presentation order and never retracted.
///
/// # Examples
///
/// ```
/// use pictor_core::OutgoingChunk;
///
/// let image = OutgoingChunk::image("Section 1", "https://cdn.example.com/1.png");
/// assert_eq!(image.to_markdown(), "![Section 1](https://cdn.example.com/1.png)\n\n");
///
/// let text = OutgoingChunk::text("Hello");
/// assert_eq!(text.to_markdown(), "Hello");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OutgoingChunk {
    /// Markdown text
    Text(String),
    /// Reference to a generated image
    Image {
        /// Alt text
        alt: String,
        /// Image location
        url: String,
    },
}

impl OutgoingChunk {
    /// Create a text chunk.
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// Create an image chunk.
    pub fn image(alt: impl Into<String>, url: impl Into<String>) -> Self {
        Self::Image {
            alt: alt.into(),
            url: url.into(),
        }
    }

    /// Render as markdown for a text-only transport.
    pub fn to_markdown(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Image { alt, url } => format!("![{}]({})\n\n", alt, url),
        }
    }

    /// Whether this chunk is an image reference.
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}
