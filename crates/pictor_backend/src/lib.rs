//! Hosted bot backend client for Pictor.
//!
//! Pipelines reach the LLM and text-to-image bots through the Poe bot query
//! protocol: a JSON query is posted to `{base_url}/{bot}` and the reply comes
//! back as a server-sent event stream.
//!
//! ```no_run
//! use pictor_backend::{BackendConfig, PoeClient};
//! use pictor_core::{ConversationTurn, Message};
//! use pictor_interface::BotBackend;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PoeClient::new(BackendConfig::new("my-access-key"));
//! let turn = ConversationTurn::new(vec![Message::user("Describe a red fox")]);
//! let reply = client.send_and_await_final(&turn, "GPT-4o").await?;
//! println!("{}", reply);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod request;
mod sse;

pub use client::PoeClient;
pub use config::{BackendConfig, DEFAULT_BASE_URL};
pub use request::{OutgoingQuery, PROTOCOL_VERSION};
pub use sse::{BackendEvent, MAX_PENDING_BYTES, SseDecoder, SseEvent};
