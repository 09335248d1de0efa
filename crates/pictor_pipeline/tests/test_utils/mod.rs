//! Test utilities for pipeline tests.
//!
//! This module provides a scripted backend and turn helpers.

pub mod mock_backend;

#[allow(unused_imports)]
pub use mock_backend::{MockBackend, MockBehavior, RecordedCall};

use pictor_core::{Attachment, ConversationTurn, Message};

/// A single-message turn.
#[allow(dead_code)]
pub fn turn(content: &str) -> ConversationTurn {
    ConversationTurn::new(vec![Message::user(content)])
}

/// A single-message turn carrying one attachment.
#[allow(dead_code)]
pub fn turn_with_attachment(content: &str, content_type: &str) -> ConversationTurn {
    let attachment = Attachment::new("https://cdn.test/upload", content_type).with_name("upload");
    ConversationTurn::new(vec![Message::user(content).with_attachment(attachment)])
}
