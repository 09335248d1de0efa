//! Incremental server-sent event decoding.

use pictor_core::Attachment;
use pictor_error::{BackendError, BackendErrorKind};
use pictor_interface::BotReply;
use serde::Deserialize;

/// One complete server-sent event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SseEvent {
    /// Event name, "message" when the block names none
    pub event: String,
    /// Data lines joined with `\n`
    pub data: String,
}

impl SseEvent {
    /// Parse one event block (the text between blank lines).
    fn parse(block: &str) -> Option<Self> {
        let mut event = None;
        let mut data: Vec<&str> = Vec::new();

        for line in block.lines() {
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with(':') {
                continue;
            }
            let (field, value) = match line.split_once(':') {
                Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
                None => (line, ""),
            };
            match field {
                "event" => event = Some(value.to_string()),
                "data" => data.push(value),
                _ => {}
            }
        }

        if event.is_none() && data.is_empty() {
            return None;
        }

        Some(Self {
            event: event.unwrap_or_else(|| "message".to_string()),
            data: data.join("\n"),
        })
    }
}

/// Largest partial event the decoder buffers before giving up.
pub const MAX_PENDING_BYTES: usize = 4 * 1024 * 1024;

/// Buffers raw bytes and yields events as their blocks complete.
///
/// Blocks may be split across network chunks in any position, including the
/// middle of a multi-byte character. Bytes already searched for a delimiter
/// are not searched again.
///
/// # Examples
///
/// ```
/// use pictor_backend::SseDecoder;
///
/// let mut decoder = SseDecoder::default();
/// assert!(decoder.push(b"event: text\ndata: {\"te").unwrap().is_empty());
///
/// let events = decoder.push(b"xt\": \"hi\"}\n\nevent: done\ndata: {}\n\n").unwrap();
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].event, "text");
/// assert_eq!(events[1].event, "done");
/// ```
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    scanned: usize,
}

impl SseDecoder {
    /// Feed a chunk and return every event it completes.
    ///
    /// # Errors
    ///
    /// Returns [`BackendErrorKind::Stream`] when an unfinished event grows
    /// past [`MAX_PENDING_BYTES`].
    pub fn push(&mut self, chunk: &[u8]) -> Result<Vec<SseEvent>, BackendError> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        let mut start = 0;
        // A delimiter may straddle the previous chunk, so back up three bytes.
        let mut from = self.scanned.saturating_sub(3);
        while let Some((end, delimiter)) = find_boundary(&self.buffer[start..], from) {
            let text = String::from_utf8_lossy(&self.buffer[start..start + end]);
            if let Some(event) = SseEvent::parse(&text) {
                events.push(event);
            }
            start += end + delimiter;
            from = 0;
        }

        self.buffer.drain(..start);
        self.scanned = self.buffer.len();

        if self.buffer.len() > MAX_PENDING_BYTES {
            tracing::error!(pending = self.buffer.len(), "Event exceeds the pending limit");
            self.buffer.clear();
            self.scanned = 0;
            return Err(BackendError::new(BackendErrorKind::Stream(format!(
                "event larger than {} bytes",
                MAX_PENDING_BYTES
            ))));
        }

        Ok(events)
    }

    /// Whether a partial block is still buffered.
    pub fn has_pending(&self) -> bool {
        self.buffer.iter().any(|b| !b.is_ascii_whitespace())
    }
}

/// Position and length of the first blank-line delimiter at or after `from`.
fn find_boundary(buffer: &[u8], from: usize) -> Option<(usize, usize)> {
    let tail = buffer.get(from..)?;
    let lf = tail.windows(2).position(|w| w == b"\n\n").map(|p| (p, 2));
    let crlf = tail.windows(4).position(|w| w == b"\r\n\r\n").map(|p| (p, 4));
    let (position, length) = match (lf, crlf) {
        (Some(a), Some(b)) => if a.0 <= b.0 { a } else { b },
        (a, b) => a.or(b)?,
    };
    Some((from + position, length))
}

#[derive(Debug, Deserialize)]
struct TextPayload {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    text: String,
    #[serde(default)]
    allow_retry: bool,
}

#[derive(Debug, Deserialize)]
struct FilePayload {
    url: String,
    content_type: String,
    #[serde(default)]
    name: String,
}

/// What a decoded event means for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendEvent {
    /// A partial reply to hand on
    Reply(BotReply),
    /// The bot finished
    Done,
    /// Metadata or an event this client does not use
    Ignored,
}

impl BackendEvent {
    /// Interpret an event received from `bot`.
    ///
    /// An `error` event becomes [`BackendErrorKind::BotReported`].
    pub fn decode(event: &SseEvent, bot: &str) -> Result<Self, BackendError> {
        match event.event.as_str() {
            "text" => Ok(Self::Reply(BotReply::text(parse::<TextPayload>(event)?.text))),
            "replace_response" => Ok(Self::Reply(BotReply::replace(
                parse::<TextPayload>(event)?.text,
            ))),
            "file" => {
                let file = parse::<FilePayload>(event)?;
                let attachment = Attachment::new(file.url, file.content_type).with_name(file.name);
                Ok(Self::Reply(BotReply::attachment(attachment)))
            }
            "error" => {
                let payload = parse::<ErrorPayload>(event)?;
                tracing::warn!(bot, text = %payload.text, allow_retry = payload.allow_retry, "Bot reported an error");
                Err(BackendError::new(BackendErrorKind::BotReported {
                    bot: bot.to_string(),
                    text: payload.text,
                    allow_retry: payload.allow_retry,
                }))
            }
            "done" => Ok(Self::Done),
            other => {
                tracing::trace!(bot, event = other, "Ignoring event");
                Ok(Self::Ignored)
            }
        }
    }
}

fn parse<T: serde::de::DeserializeOwned>(event: &SseEvent) -> Result<T, BackendError> {
    serde_json::from_str(&event.data).map_err(|e| {
        tracing::error!(event = %event.event, error = %e, "Failed to parse event payload");
        BackendError::new(BackendErrorKind::Deserialization(format!(
            "Failed to parse {} event: {}",
            event.event, e
        )))
    })
}
