//! Core type definitions for the backend interface.

use pictor_core::Attachment;
use serde::{Deserialize, Serialize};

/// One partial reply from a hosted bot.
///
/// A reply carries text, an attachment, or both.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BotReply {
    /// Incremental text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// A file the bot produced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    /// Whether `text` replaces everything received so far
    #[serde(default)]
    pub replace: bool,
}

impl BotReply {
    /// A text increment.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// A text replacement.
    pub fn replace(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            attachment: None,
            replace: true,
        }
    }

    /// A file reply.
    pub fn attachment(attachment: Attachment) -> Self {
        Self {
            attachment: Some(attachment),
            ..Default::default()
        }
    }
}
