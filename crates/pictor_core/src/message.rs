//! Message types for conversation history.

use crate::{Attachment, Role};
use serde::{Deserialize, Serialize};

/// Content type the platform assumes when none is given.
pub const DEFAULT_CONTENT_TYPE: &str = "text/markdown";

fn default_content_type() -> String {
    DEFAULT_CONTENT_TYPE.to_string()
}

/// One chat message.
///
/// `content` is rewritten in place while a turn is processed, so each
/// outbound prompt is staged on the same message the user sent.
///
/// # Examples
///
/// ```
/// use pictor_core::{Attachment, Message, Role};
///
/// let message = Message::user("make me a cartoon")
///     .with_attachment(Attachment::new("https://cdn.example.com/me.jpg", "image/jpeg"));
///
/// assert_eq!(message.role, Role::User);
/// assert_eq!(message.attachments.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// Text content
    pub content: String,
    /// Media type of `content`
    #[serde(default = "default_content_type")]
    pub content_type: String,
    /// Platform-assigned identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Platform timestamp in microseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    /// Files attached to the message
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

impl Message {
    /// Create a message with the given role and text.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            content_type: default_content_type(),
            message_id: None,
            timestamp: None,
            attachments: Vec::new(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create a bot message.
    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(Role::Bot, content)
    }

    /// Attach a file.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}
