//! Prompt pipelines for Pictor bots.
//!
//! A pipeline handles one conversational turn: it stages an instruction for
//! a hosted LLM, pulls structured fields out of the reply, renders an image
//! prompt, calls a hosted text-to-image bot and streams text and images back.
//!
//! Each bot is a [`BotProfile`] value; [`BotKind`] lists the shipped ones.
//!
//! ```no_run
//! use pictor_pipeline::{BotKind, PromptPipeline, TurnOutcome};
//! use pictor_core::{ConversationTurn, Message};
//! # use pictor_interface::BotBackend;
//! # use std::sync::Arc;
//!
//! # async fn run<B: BotBackend>(backend: Arc<B>) -> Result<(), Box<dyn std::error::Error>> {
//! let pipeline = PromptPipeline::new(BotKind::MemesCreator.profile()?, backend);
//! let turn = ConversationTurn::new(vec![Message::user("mondays")]);
//!
//! if let TurnOutcome::Success(chunks) = pipeline.collect(turn).await {
//!     for chunk in chunks {
//!         print!("{}", chunk.to_markdown());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod catalog;
mod emitter;
mod extraction;
mod guard;
mod pipeline;
mod profile;
mod segments;
mod staging;
mod template;

pub use catalog::BotKind;
pub use emitter::ChunkEmitter;
pub use extraction::{
    ExtractedField, FieldSet, MISSING_SENTINEL, extract_field, extract_fields, extract_json_block,
    parse_json,
};
pub use guard::{REJECTION_MESSAGE, Rejection, validate_image_attachment};
pub use pipeline::{APOLOGY, PromptPipeline, TurnOutcome};
pub use profile::{
    BotProfile, BotProfileBuilder, FieldPlan, HistoryPolicy, ImageDelivery, ImagePrompt,
    Plan, RequestStaging, SegmentPlan, StyleRule, StyleRules,
};
pub use segments::{SEGMENT_COUNT, SegmentLoop, StorySegment, parse_story_segments};
pub use template::Template;
