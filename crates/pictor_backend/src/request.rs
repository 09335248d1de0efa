//! Outbound query body.

use pictor_core::ConversationTurn;
use serde::Serialize;

/// Protocol version sent with outbound queries.
pub const PROTOCOL_VERSION: &str = "1.1";

/// The JSON body posted to a hosted bot.
///
/// # Examples
///
/// ```
/// use pictor_backend::OutgoingQuery;
/// use pictor_core::{ConversationTurn, Message};
///
/// let turn = ConversationTurn::new(vec![Message::user("hello")]);
/// let json = serde_json::to_value(OutgoingQuery::new(&turn)).unwrap();
///
/// assert_eq!(json["type"], "query");
/// assert_eq!(json["query"][0]["content"], "hello");
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingQuery<'a> {
    /// Protocol version
    pub version: &'static str,
    /// Request type, always "query"
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The conversation and its identifiers
    #[serde(flatten)]
    pub turn: &'a ConversationTurn,
    /// Ask the bot not to prepend its own system prompt
    pub skip_system_prompt: bool,
}

impl<'a> OutgoingQuery<'a> {
    /// Wrap a turn as a query request.
    pub fn new(turn: &'a ConversationTurn) -> Self {
        Self {
            version: PROTOCOL_VERSION,
            kind: "query",
            turn,
            skip_system_prompt: false,
        }
    }
}
