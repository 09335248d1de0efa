//! Core data types for the Pictor prompt-pipeline bots.
//!
//! This crate provides the conversation, attachment and output types shared by
//! the backend client, the pipelines and the server.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod attachment;
mod chunk;
mod message;
mod role;
mod settings;
mod turn;

pub use attachment::Attachment;
pub use chunk::OutgoingChunk;
pub use message::{DEFAULT_CONTENT_TYPE, Message};
pub use role::Role;
pub use settings::SettingsResponse;
pub use turn::ConversationTurn;
