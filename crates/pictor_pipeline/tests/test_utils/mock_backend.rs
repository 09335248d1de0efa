//! Scripted backend for pipeline tests.

use async_trait::async_trait;
use pictor_core::{Attachment, ConversationTurn};
use pictor_error::{BackendError, BackendErrorKind, PictorResult};
use pictor_interface::{BotBackend, BotReply, ReplyStream};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// What one call to a bot produces.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Stream these replies, then finish
    Replies(Vec<BotReply>),
    /// Fail the call before streaming
    Error(BackendErrorKind),
}

/// A call the pipeline made.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub bot: String,
    pub turn: ConversationTurn,
}

impl RecordedCall {
    /// Content of the last message sent.
    pub fn content(&self) -> &str {
        self.turn
            .latest()
            .map(|message| message.content.as_str())
            .unwrap_or_default()
    }
}

/// Mock backend with a queue of behaviors per bot.
///
/// Each call to a bot takes the next queued behavior. A bot with an empty
/// queue fails with a 404, so unexpected calls show up as backend failures.
#[derive(Debug, Default)]
pub struct MockBackend {
    scripts: Mutex<HashMap<String, VecDeque<MockBehavior>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockBackend {
    /// Create a backend with no scripts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a behavior for `bot`.
    pub fn with_behavior(self, bot: &str, behavior: MockBehavior) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .entry(bot.to_string())
            .or_default()
            .push_back(behavior);
        self
    }

    /// Queue a single text reply for `bot`.
    pub fn with_text(self, bot: &str, text: &str) -> Self {
        self.with_behavior(bot, MockBehavior::Replies(vec![BotReply::text(text)]))
    }

    /// Queue a streamed reply carrying one image attachment per URL.
    pub fn with_images(self, bot: &str, urls: &[&str]) -> Self {
        let mut replies = vec![BotReply::text("Generating image...")];
        replies.extend(
            urls.iter()
                .map(|url| BotReply::attachment(Attachment::new(*url, "image/png"))),
        );
        self.with_behavior(bot, MockBehavior::Replies(replies))
    }

    /// Queue a failure for `bot`.
    pub fn with_error(self, bot: &str, kind: BackendErrorKind) -> Self {
        self.with_behavior(bot, MockBehavior::Error(kind))
    }

    /// Number of calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made to `bot`, in order.
    pub fn calls_to(&self, bot: &str) -> Vec<RecordedCall> {
        self.calls()
            .into_iter()
            .filter(|call| call.bot == bot)
            .collect()
    }
}

#[async_trait]
impl BotBackend for MockBackend {
    async fn stream_responses(
        &self,
        query: &ConversationTurn,
        bot: &str,
    ) -> PictorResult<ReplyStream> {
        self.calls.lock().unwrap().push(RecordedCall {
            bot: bot.to_string(),
            turn: query.clone(),
        });

        let behavior = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(bot)
            .and_then(VecDeque::pop_front);

        match behavior {
            Some(MockBehavior::Replies(replies)) => {
                let items: Vec<PictorResult<BotReply>> = replies.into_iter().map(Ok).collect();
                Ok(Box::pin(futures::stream::iter(items)))
            }
            Some(MockBehavior::Error(kind)) => Err(BackendError::new(kind).into()),
            None => Err(BackendError::new(BackendErrorKind::Api {
                status: 404,
                message: format!("no script for {}", bot),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
