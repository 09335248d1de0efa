//! Inbound request envelope.

use pictor_core::ConversationTurn;
use serde::Deserialize;
use serde_json::Value;

/// Request types the platform sends, named by the body's `type` field.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum RequestKind {
    /// A conversational turn to answer
    Query,
    /// A request for the bot's settings
    Settings,
    /// User feedback on a reply
    ReportFeedback,
    /// The platform reporting a protocol error
    ReportError,
    /// A user reaction on a reply
    ReportReaction,
}

impl RequestKind {
    /// Read the request type from a JSON body.
    ///
    /// Returns `None` when the field is absent or names an unknown type.
    pub fn of(body: &Value) -> Option<Self> {
        body.get("type")?.as_str()?.parse().ok()
    }

    /// Whether this request is a fire-and-forget report.
    pub fn is_report(self) -> bool {
        matches!(
            self,
            Self::ReportFeedback | Self::ReportError | Self::ReportReaction
        )
    }
}

/// A `query` request body.
///
/// Extra protocol fields the pipeline does not use are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct QueryRequest {
    /// Protocol version
    #[serde(default)]
    pub version: String,
    /// The conversation to answer
    #[serde(flatten)]
    pub turn: ConversationTurn,
}
