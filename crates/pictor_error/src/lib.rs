//! Error types for the Pictor workspace.
//!
//! This crate provides the foundation error types used by every Pictor crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use pictor_error::{BackendError, BackendErrorKind, PictorResult};
//!
//! fn fetch_reply() -> PictorResult<String> {
//!     Err(BackendError::new(BackendErrorKind::Http("Connection refused".into())))?
//! }
//!
//! match fetch_reply() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod extraction;
mod pipeline;
mod server;

pub use backend::{BackendError, BackendErrorKind};
pub use config::ConfigError;
pub use error::{ErrorClass, PictorError, PictorErrorKind, PictorResult};
pub use extraction::{ExtractionError, ExtractionErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use server::{ServerError, ServerErrorKind};
