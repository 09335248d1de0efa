//! HTTP server for Pictor bots.
//!
//! Exposes one bot over the Poe server-bot protocol: `query` requests stream
//! the pipeline's chunks back as server-sent events, `settings` requests
//! return the bot's dependency hints.
//!
//! ```no_run
//! use pictor_server::{ConfigOverrides, ServerConfig, init_logging, serve};
//!
//! # async fn run() -> pictor_error::PictorResult<()> {
//! let config = ServerConfig::load(None, &ConfigOverrides::default())?;
//! init_logging(*config.json_logs())?;
//! serve(config).await
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod logging;
mod request;
mod response;
mod server;

pub use api::{ApiState, CHUNK_BUFFER, create_router};
pub use config::{ConfigOverrides, DEFAULT_BIND, DEFAULT_BOT, ENV_PREFIX, ServerConfig};
pub use logging::{DEFAULT_FILTER, init_logging};
pub use request::{QueryRequest, RequestKind};
pub use response::{done_event, meta_event, text_event};
pub use server::serve;
