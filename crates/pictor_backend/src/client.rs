use crate::{BackendConfig, BackendEvent, OutgoingQuery, SseDecoder};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use pictor_core::ConversationTurn;
use pictor_error::{BackendError, BackendErrorKind, PictorError, PictorResult};
use pictor_interface::{BotBackend, BotReply, ReplyStream};
use tracing::instrument;

/// Client for hosted bots speaking the Poe query protocol.
#[derive(Debug, Clone)]
pub struct PoeClient {
    config: BackendConfig,
    client: reqwest::Client,
}

impl PoeClient {
    /// Create a new client
    #[instrument(skip(config), fields(base_url = %config.base_url))]
    pub fn new(config: BackendConfig) -> Self {
        tracing::debug!("Creating backend client");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Get the backend configuration
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Post a query and return the raw streaming response.
    #[instrument(skip(self, query), fields(messages = query.query.len()))]
    async fn post_query(
        &self,
        query: &ConversationTurn,
        bot: &str,
    ) -> Result<reqwest::Response, BackendError> {
        let url = self.config.endpoint(bot);
        tracing::debug!("Sending query to {}", url);

        let response = self
            .client
            .post(&url)
            .json(&OutgoingQuery::new(query))
            .header("Accept", "text/event-stream")
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Request failed: {}", e);
                BackendError::new(BackendErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), "Backend returned error");
            return Err(BackendError::new(BackendErrorKind::Api {
                status: status.as_u16(),
                message,
            }));
        }

        Ok(response)
    }
}

#[async_trait]
impl BotBackend for PoeClient {
    #[instrument(skip(self, query))]
    async fn stream_responses(
        &self,
        query: &ConversationTurn,
        bot: &str,
    ) -> PictorResult<ReplyStream> {
        let response = self.post_query(query, bot).await?;
        tracing::debug!("Streaming request accepted, decoding events");
        Ok(Box::pin(reply_stream(response, bot.to_string())))
    }

    fn provider_name(&self) -> &'static str {
        "poe"
    }
}

/// Decode a response body into partial replies, stopping at `done`.
fn reply_stream(
    response: reqwest::Response,
    bot: String,
) -> impl Stream<Item = PictorResult<BotReply>> + Send {
    async_stream::try_stream! {
        let mut decoder = SseDecoder::default();
        let mut body = response.bytes_stream();

        'read: while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| {
                tracing::error!(bot = %bot, "Stream error: {}", e);
                PictorError::from(BackendError::new(BackendErrorKind::Stream(e.to_string())))
            })?;

            for event in decoder.push(&chunk).map_err(PictorError::from)? {
                match BackendEvent::decode(&event, &bot).map_err(PictorError::from)? {
                    BackendEvent::Reply(reply) => yield reply,
                    BackendEvent::Done => break 'read,
                    BackendEvent::Ignored => {}
                }
            }
        }

        if decoder.has_pending() {
            tracing::warn!(bot = %bot, "Stream ended with an incomplete event");
        }
    }
}
