//! One turn of a prompt-pipeline bot.

use crate::staging::{collect_attachments, image_turn, restage};
use crate::{
    BotProfile, ChunkEmitter, FieldPlan, HistoryPolicy, ImageDelivery, Plan, SegmentLoop,
    extract_fields, parse_story_segments, validate_image_attachment,
};
use pictor_core::{ConversationTurn, Message, OutgoingChunk, SettingsResponse};
use pictor_error::{ErrorClass, PictorResult, PipelineError, PipelineErrorKind};
use pictor_interface::BotBackend;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::instrument;

/// Text sent to the user when a turn fails.
pub const APOLOGY: &str = "Something went wrong. Please try again or contact the admin.";

/// How a turn ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Every chunk was produced, in emission order
    Success(Vec<OutgoingChunk>),
    /// The guard rejected the input; carries the message sent
    InputRejected(String),
    /// The turn failed after the guard; carries the apology sent
    BackendFailure(String),
}

impl TurnOutcome {
    /// Whether the turn completed normally.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Drives one bot profile against a backend.
///
/// Calls within a turn are strictly sequential. The pipeline holds no
/// per-turn state, so one instance serves concurrent turns.
#[derive(Debug)]
pub struct PromptPipeline<B: ?Sized> {
    profile: BotProfile,
    backend: Arc<B>,
}

impl<B> Clone for PromptPipeline<B>
where
    B: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            profile: self.profile.clone(),
            backend: Arc::clone(&self.backend),
        }
    }
}

impl<B> PromptPipeline<B>
where
    B: BotBackend + ?Sized,
{
    /// Create a pipeline for `profile`.
    pub fn new(profile: BotProfile, backend: Arc<B>) -> Self {
        Self { profile, backend }
    }

    /// The bot profile.
    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    /// The settings descriptor advertised to the platform.
    pub fn settings(&self) -> SettingsResponse {
        self.profile.settings()
    }

    /// Handle one turn, streaming chunks into `sink` as they are produced.
    ///
    /// Never fails: input rejections and errors are turned into a single text
    /// chunk. Chunks already sent are not retracted.
    #[instrument(
        skip_all,
        fields(
            bot = %self.profile.name(),
            conversation_id = %turn.conversation_id,
            messages = turn.query.len()
        )
    )]
    pub async fn handle(
        &self,
        turn: ConversationTurn,
        sink: mpsc::Sender<OutgoingChunk>,
    ) -> TurnOutcome {
        self.drive(turn, ChunkEmitter::new(sink)).await
    }

    /// Handle one turn and return the chunks instead of streaming them.
    #[instrument(skip_all, fields(bot = %self.profile.name()))]
    pub async fn collect(&self, turn: ConversationTurn) -> TurnOutcome {
        self.drive(turn, ChunkEmitter::detached()).await
    }

    async fn drive(&self, mut turn: ConversationTurn, mut emitter: ChunkEmitter) -> TurnOutcome {
        if *self.profile.history() == HistoryPolicy::LatestOnly {
            turn.retain_latest();
        }

        let Some(latest) = turn.latest().cloned() else {
            let err = PipelineError::new(PipelineErrorKind::EmptyConversation);
            tracing::error!(class = %ErrorClass::Internal, error = %err, "Turn failed");
            return self.apologize(APOLOGY, &mut emitter).await;
        };

        if *self.profile.requires_image_attachment() {
            if let Err(rejection) = validate_image_attachment(&latest) {
                tracing::info!(reason = %rejection, "Input rejected");
                let message = rejection.message();
                if let Err(e) = emitter.emit(OutgoingChunk::text(message)).await {
                    tracing::debug!(error = %e, "Receiver gone before rejection was sent");
                }
                return TurnOutcome::InputRejected(message.to_string());
            }
        }

        match self.respond(&turn, &latest, &mut emitter).await {
            Ok(()) => {
                tracing::info!(chunks = emitter.emitted().len(), "Turn complete");
                TurnOutcome::Success(emitter.into_chunks())
            }
            Err(err) => {
                tracing::error!(class = %err.class(), error = %err, "Turn failed");
                let apology = match (self.profile.plan(), err.class()) {
                    (Plan::Segments(plan), ErrorClass::Extraction) => plan.parse_failure,
                    _ => APOLOGY,
                };
                self.apologize(apology, &mut emitter).await
            }
        }
    }

    async fn apologize(&self, apology: &str, emitter: &mut ChunkEmitter) -> TurnOutcome {
        if let Err(e) = emitter.emit(OutgoingChunk::text(apology)).await {
            tracing::debug!(error = %e, "Receiver gone before apology was sent");
        }
        TurnOutcome::BackendFailure(apology.to_string())
    }

    /// Everything inside the fault boundary.
    async fn respond(
        &self,
        turn: &ConversationTurn,
        latest: &Message,
        emitter: &mut ChunkEmitter,
    ) -> PictorResult<()> {
        let content = latest.content.as_str();
        let instruction = self
            .profile
            .instruction()
            .render(&[("content", content)])?;

        let llm_model = self.profile.llm_model();
        tracing::debug!(model = %llm_model, "Calling LLM");
        let reply = self
            .backend
            .send_and_await_final(
                &restage(*self.profile.llm_request(), turn, instruction),
                llm_model,
            )
            .await?;

        match self.profile.plan() {
            Plan::Fields(plan) => self.run_fields(plan, turn, latest, &reply, emitter).await,
            Plan::Segments(plan) => {
                let segments = parse_story_segments(&reply)?;
                SegmentLoop::new(
                    self.backend.as_ref(),
                    self.profile.image_model(),
                    plan,
                    *self.profile.image_request(),
                )
                .run(&segments, turn, latest, emitter)
                .await
            }
        }
    }

    async fn run_fields(
        &self,
        plan: &FieldPlan,
        turn: &ConversationTurn,
        latest: &Message,
        reply: &str,
        emitter: &mut ChunkEmitter,
    ) -> PictorResult<()> {
        let fields = extract_fields(reply, &plan.fields);
        for field in fields.missing() {
            tracing::warn!(field, "Field missing from LLM response, substituting sentinel");
        }

        let content = latest.content.as_str();
        let mut values: Vec<(&str, &str)> = fields.values().collect();
        values.push(("content", content));

        let prompt = plan.image_prompt.render(content, &values)?;

        if let Some(lead) = &plan.lead {
            emitter.emit(OutgoingChunk::text(lead.render(&values)?)).await?;
        }

        let image_model = self.profile.image_model();
        let request = image_turn(*self.profile.image_request(), turn, latest, prompt);
        tracing::debug!(model = %image_model, "Calling image model");

        match &plan.delivery {
            ImageDelivery::Final { body } => {
                let image = self
                    .backend
                    .send_and_await_final(&request, image_model)
                    .await?;
                let mut values = values.clone();
                values.push(("image", image.as_str()));
                let text = body.render(&values)?;
                if !text.is_empty() {
                    emitter.emit(OutgoingChunk::text(text)).await?;
                }
            }
            ImageDelivery::Attachments { alt } => {
                let attachments =
                    collect_attachments(self.backend.as_ref(), &request, image_model).await?;
                for attachment in attachments {
                    emitter
                        .emit(OutgoingChunk::image(*alt, attachment.url))
                        .await?;
                }
            }
        }

        Ok(())
    }
}
