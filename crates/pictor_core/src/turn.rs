//! A single inbound request.

use crate::Message;
use serde::{Deserialize, Serialize};

/// One inbound conversational turn.
///
/// Holds the ordered conversation the platform sent. Most bots keep only the
/// latest message (see [`ConversationTurn::retain_latest`]) before any backend
/// call is made.
///
/// # Examples
///
/// ```
/// use pictor_core::{ConversationTurn, Message};
///
/// let mut turn = ConversationTurn::new(vec![
///     Message::user("once upon a time"),
///     Message::bot("there was a fox"),
///     Message::user("continue"),
/// ]);
///
/// let latest = turn.retain_latest().unwrap();
/// assert_eq!(latest.content, "continue");
/// assert_eq!(turn.query.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Conversation so far, oldest first
    pub query: Vec<Message>,
    /// Platform user identifier
    #[serde(default)]
    pub user_id: String,
    /// Platform conversation identifier
    #[serde(default)]
    pub conversation_id: String,
    /// Identifier of the reply being produced
    #[serde(default)]
    pub message_id: String,
    /// Opaque platform metadata
    #[serde(default)]
    pub metadata: String,
}

impl ConversationTurn {
    /// Create a turn from messages with empty identifiers.
    pub fn new(query: Vec<Message>) -> Self {
        Self {
            query,
            ..Default::default()
        }
    }

    /// The most recent message.
    pub fn latest(&self) -> Option<&Message> {
        self.query.last()
    }

    /// The most recent message, mutably.
    pub fn latest_mut(&mut self) -> Option<&mut Message> {
        self.query.last_mut()
    }

    /// Drop all but the most recent message and return it.
    ///
    /// Returns `None` when the conversation is empty.
    pub fn retain_latest(&mut self) -> Option<&mut Message> {
        let keep_from = self.query.len().checked_sub(1)?;
        self.query.drain(..keep_from);
        self.query.last_mut()
    }

    /// A copy of this turn holding only `message`, identifiers preserved.
    pub fn with_single(&self, message: Message) -> Self {
        Self {
            query: vec![message],
            user_id: self.user_id.clone(),
            conversation_id: self.conversation_id.clone(),
            message_id: self.message_id.clone(),
            metadata: self.metadata.clone(),
        }
    }
}
