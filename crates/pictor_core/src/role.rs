//! Role types for conversation participants.

use serde::{Deserialize, Serialize};

/// Who sent a message, as named by the hosting platform.
///
/// # Examples
///
/// ```
/// use pictor_core::Role;
///
/// let role: Role = serde_json::from_str("\"bot\"").unwrap();
/// assert_eq!(role, Role::Bot);
/// assert_eq!(format!("{}", Role::User), "user");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System messages provide context and instructions
    #[display("system")]
    System,
    /// User messages are from the human
    #[display("user")]
    User,
    /// Bot messages are earlier replies
    #[display("bot")]
    Bot,
}
