//! Trait definitions for hosted bot backends.

use crate::BotReply;
use async_trait::async_trait;
use futures_util::stream::{Stream, StreamExt};
use pictor_core::ConversationTurn;
use pictor_error::{BackendError, BackendErrorKind, PictorResult};
use std::pin::Pin;

/// Stream of partial replies from one backend call.
pub type ReplyStream = Pin<Box<dyn Stream<Item = PictorResult<BotReply>> + Send>>;

/// A hosted bot service reachable by name.
///
/// Implementations only need [`BotBackend::stream_responses`]; the
/// single-result call folds the stream the way the platform does.
#[async_trait]
pub trait BotBackend: Send + Sync {
    /// Send `query` to `bot` and stream its partial replies.
    async fn stream_responses(
        &self,
        query: &ConversationTurn,
        bot: &str,
    ) -> PictorResult<ReplyStream>;

    /// Send `query` to `bot` and wait for the complete reply text.
    ///
    /// Text increments are appended, replacements reset the text. Fails when
    /// the bot sends nothing at all.
    async fn send_and_await_final(&self, query: &ConversationTurn, bot: &str) -> PictorResult<String> {
        let mut stream = self.stream_responses(query, bot).await?;
        let mut text = String::new();
        let mut received = false;

        while let Some(reply) = stream.next().await {
            let reply = reply?;
            received = true;
            if let Some(chunk) = reply.text {
                if reply.replace {
                    text = chunk;
                } else {
                    text.push_str(&chunk);
                }
            }
        }

        if !received {
            tracing::error!(bot, "Backend bot closed the stream without replying");
            return Err(BackendError::new(BackendErrorKind::Empty(bot.to_string())).into());
        }

        tracing::debug!(bot, length = text.len(), "Received final response");
        Ok(text)
    }

    /// Provider name (e.g., "poe").
    fn provider_name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pictor_core::Message;

    struct Scripted(Vec<BotReply>);

    #[async_trait]
    impl BotBackend for Scripted {
        async fn stream_responses(
            &self,
            _query: &ConversationTurn,
            _bot: &str,
        ) -> PictorResult<ReplyStream> {
            let items: Vec<PictorResult<BotReply>> = self.0.iter().cloned().map(Ok).collect();
            Ok(Box::pin(futures::stream::iter(items)))
        }

        fn provider_name(&self) -> &'static str {
            "scripted"
        }
    }

    fn turn() -> ConversationTurn {
        ConversationTurn::new(vec![Message::user("hi")])
    }

    #[tokio::test]
    async fn test_final_response_concatenates_text() {
        let backend = Scripted(vec![BotReply::text("Hello, "), BotReply::text("world")]);
        let text = backend.send_and_await_final(&turn(), "GPT-4o").await.unwrap();
        assert_eq!(text, "Hello, world");
    }

    #[tokio::test]
    async fn test_final_response_honours_replace() {
        let backend = Scripted(vec![
            BotReply::text("Generating..."),
            BotReply::replace("![image](https://x/1.png)"),
        ]);
        let text = backend.send_and_await_final(&turn(), "Playground-v2.5").await.unwrap();
        assert_eq!(text, "![image](https://x/1.png)");
    }

    #[tokio::test]
    async fn test_final_response_empty_stream_fails() {
        let backend = Scripted(vec![]);
        let err = backend.send_and_await_final(&turn(), "GPT-4o").await.unwrap_err();
        assert!(format!("{}", err).contains("sent no response"));
    }
}
