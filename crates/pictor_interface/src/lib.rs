//! Trait definitions for the Pictor prompt-pipeline bots.
//!
//! This crate defines the boundary between a pipeline and the hosted bots it
//! calls: the [`BotBackend`] trait and the [`BotReply`] items it streams.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;
mod types;

pub use traits::{BotBackend, ReplyStream};
pub use types::BotReply;
