//! Server-sent events for query responses.

use axum::response::sse::Event;
use pictor_core::OutgoingChunk;
use serde_json::json;

/// The `meta` event that opens every response.
pub fn meta_event() -> Event {
    Event::default().event("meta").data(
        json!({
            "content_type": "text/markdown",
            "suggested_replies": false,
            "linkify": true,
            "refetch_settings": false,
        })
        .to_string(),
    )
}

/// A `text` event carrying one chunk as markdown.
pub fn text_event(chunk: &OutgoingChunk) -> Event {
    Event::default()
        .event("text")
        .data(json!({ "text": chunk.to_markdown() }).to_string())
}

/// The `done` event that closes every response.
pub fn done_event() -> Event {
    Event::default().event("done").data("{}")
}
