//! Ordered delivery of output chunks.

use pictor_core::OutgoingChunk;
use pictor_error::{PipelineError, PipelineErrorKind};
use tokio::sync::mpsc;

/// Sends chunks to the caller as they are produced and keeps a copy.
#[derive(Debug, Default)]
pub struct ChunkEmitter {
    sink: Option<mpsc::Sender<OutgoingChunk>>,
    emitted: Vec<OutgoingChunk>,
}

impl ChunkEmitter {
    /// Stream chunks into `sink`.
    pub fn new(sink: mpsc::Sender<OutgoingChunk>) -> Self {
        Self {
            sink: Some(sink),
            emitted: Vec::new(),
        }
    }

    /// Record chunks without streaming them anywhere.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Emit one chunk.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::ChannelClosed`] once the receiver is gone.
    pub async fn emit(&mut self, chunk: OutgoingChunk) -> Result<(), PipelineError> {
        tracing::trace!(image = chunk.is_image(), "Emitting chunk");
        if let Some(sink) = &self.sink {
            sink.send(chunk.clone())
                .await
                .map_err(|_| PipelineError::new(PipelineErrorKind::ChannelClosed))?;
        }
        self.emitted.push(chunk);
        Ok(())
    }

    /// Chunks emitted so far.
    pub fn emitted(&self) -> &[OutgoingChunk] {
        &self.emitted
    }

    /// Take the emitted chunks.
    pub fn into_chunks(self) -> Vec<OutgoingChunk> {
        self.emitted
    }
}
