//! Test utilities for server tests.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, header};
use pictor_core::ConversationTurn;
use pictor_error::{BackendError, BackendErrorKind, PictorResult};
use pictor_interface::{BotBackend, BotReply, ReplyStream};
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Access key the test router accepts.
pub const TEST_KEY: &str = "test-access-key";

/// Backend answering each bot with queued texts.
///
/// A bot with nothing queued fails with a 503.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    replies: Mutex<HashMap<String, VecDeque<String>>>,
    calls: Mutex<Vec<(String, ConversationTurn)>>,
}

impl ScriptedBackend {
    /// Queue a text reply for `bot`.
    pub fn with_text(self, bot: &str, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(bot.to_string())
            .or_default()
            .push_back(text.to_string());
        self
    }

    /// Bots called so far, in order.
    pub fn called_bots(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(bot, _)| bot.clone())
            .collect()
    }
}

#[async_trait]
impl BotBackend for ScriptedBackend {
    async fn stream_responses(
        &self,
        query: &ConversationTurn,
        bot: &str,
    ) -> PictorResult<ReplyStream> {
        self.calls
            .lock()
            .unwrap()
            .push((bot.to_string(), query.clone()));

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(bot)
            .and_then(VecDeque::pop_front);

        match reply {
            Some(text) => Ok(Box::pin(futures::stream::iter(vec![Ok(BotReply::text(
                text,
            ))]))),
            None => Err(BackendError::new(BackendErrorKind::Api {
                status: 503,
                message: format!("{} is unavailable", bot),
            })
            .into()),
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }
}

/// An authorized `POST /` request carrying `body`.
pub fn post(body: &Value) -> Request<Body> {
    post_with_key(body, Some(TEST_KEY))
}

/// A `POST /` request with an optional bearer key.
pub fn post_with_key(body: &Value, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = key {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", key));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Split a server-sent event body into `(event, data)` pairs.
pub fn parse_events(body: &str) -> Vec<(String, Value)> {
    body.split("\n\n")
        .filter(|block| !block.trim().is_empty())
        .filter_map(|block| {
            let mut event = None;
            let mut data = None;
            for line in block.lines() {
                if let Some(name) = line.strip_prefix("event: ") {
                    event = Some(name.to_string());
                } else if let Some(payload) = line.strip_prefix("data: ") {
                    data = serde_json::from_str(payload).ok();
                }
            }
            Some((event?, data?))
        })
        .collect()
}
