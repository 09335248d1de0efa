//! Building backend requests from the user's turn.

use crate::RequestStaging;
use futures_util::StreamExt;
use pictor_core::{Attachment, ConversationTurn, Message};
use pictor_error::PictorResult;
use pictor_interface::BotBackend;

/// The LLM request for `turn` carrying `content`.
///
/// Reusing the message keeps the conversation and the latest message's
/// attachments, with its content replaced. A fresh message is sent alone.
pub(crate) fn restage(
    policy: RequestStaging,
    turn: &ConversationTurn,
    content: String,
) -> ConversationTurn {
    match policy {
        RequestStaging::ReuseMessage => {
            let mut staged = turn.clone();
            if let Some(message) = staged.latest_mut() {
                message.content = content;
            }
            staged
        }
        RequestStaging::FreshMessage => turn.with_single(Message::user(content)),
    }
}

/// A one-message turn carrying `prompt` for the image bot.
pub(crate) fn image_turn(
    policy: RequestStaging,
    turn: &ConversationTurn,
    latest: &Message,
    prompt: String,
) -> ConversationTurn {
    match policy {
        RequestStaging::ReuseMessage => {
            let mut message = latest.clone();
            message.content = prompt;
            turn.with_single(message)
        }
        RequestStaging::FreshMessage => turn.with_single(Message::user(prompt)),
    }
}

/// Stream one call to completion and keep every attachment, in order.
pub(crate) async fn collect_attachments<B>(
    backend: &B,
    turn: &ConversationTurn,
    bot: &str,
) -> PictorResult<Vec<Attachment>>
where
    B: BotBackend + ?Sized,
{
    let mut stream = backend.stream_responses(turn, bot).await?;
    let mut attachments = Vec::new();

    while let Some(reply) = stream.next().await {
        if let Some(attachment) = reply?.attachment {
            attachments.push(attachment);
        }
    }

    tracing::debug!(bot, count = attachments.len(), "Collected attachments");
    Ok(attachments)
}
