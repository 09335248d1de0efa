//! Bot settings descriptor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a bot tells the platform about itself.
///
/// # Examples
///
/// ```
/// use pictor_core::SettingsResponse;
///
/// let settings = SettingsResponse::new("Welcome!")
///     .with_dependency("GPT-4o", 1)
///     .with_dependency("Playground-v2.5", 1)
///     .with_attachments(true);
///
/// let json = serde_json::to_value(&settings).unwrap();
/// assert_eq!(json["server_bot_dependencies"]["GPT-4o"], 1);
/// assert_eq!(json["allow_attachments"], true);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsResponse {
    /// Backend bots this bot calls, with a per-turn call-count hint
    pub server_bot_dependencies: BTreeMap<String, u32>,
    /// Message shown to first-time users
    pub introduction_message: String,
    /// Whether users may attach files
    pub allow_attachments: bool,
}

impl SettingsResponse {
    /// Settings with no dependencies and attachments disabled.
    pub fn new(introduction_message: impl Into<String>) -> Self {
        Self {
            server_bot_dependencies: BTreeMap::new(),
            introduction_message: introduction_message.into(),
            allow_attachments: false,
        }
    }

    /// Declare a backend dependency. Repeated names accumulate their hints.
    pub fn with_dependency(mut self, bot: impl Into<String>, calls: u32) -> Self {
        *self.server_bot_dependencies.entry(bot.into()).or_insert(0) += calls;
        self
    }

    /// Allow or forbid attachments.
    pub fn with_attachments(mut self, allow: bool) -> Self {
        self.allow_attachments = allow;
        self
    }
}
