//! Multi-segment stories: parse a fixed-arity array, illustrate each part.

use crate::staging::{collect_attachments, image_turn};
use crate::{ChunkEmitter, RequestStaging, SegmentPlan, extract_json_block, parse_json};
use pictor_core::{ConversationTurn, Message, OutgoingChunk};
use pictor_error::{ExtractionError, ExtractionErrorKind, PictorResult};
use pictor_interface::BotBackend;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of segments a story must have.
pub const SEGMENT_COUNT: usize = 4;

/// One part of a story and its illustration prompt.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
pub struct StorySegment {
    /// Narrative text
    story_text: String,
    /// Prompt for the illustration
    image_prompt: String,
}

impl StorySegment {
    /// Create a segment.
    pub fn new(story_text: impl Into<String>, image_prompt: impl Into<String>) -> Self {
        Self {
            story_text: story_text.into(),
            image_prompt: image_prompt.into(),
        }
    }
}

/// Parse exactly [`SEGMENT_COUNT`] segments out of an LLM response.
///
/// The array is read from the first ```` ```json ```` block, or else from the
/// span between the first `[` and the last `]`. Every element must be an
/// object with `story_text` and `image_prompt` keys. A `null` value reads as
/// empty text and other non-string values are kept in their JSON form.
///
/// # Errors
///
/// - [`ExtractionErrorKind::NoJsonFound`] when neither a block nor a span exists
/// - [`ExtractionErrorKind::InvalidJson`] when the text is not a JSON array
/// - [`ExtractionErrorKind::WrongSegmentCount`] for any other length
/// - [`ExtractionErrorKind::InvalidSegment`] for a malformed element
///
/// # Examples
///
/// ```
/// use pictor_pipeline::parse_story_segments;
///
/// let reply = r#"Here you go: [
///   {"story_text": "A fox wakes.", "image_prompt": "fox in a den"},
///   {"story_text": "It finds a map.", "image_prompt": "fox holding a map"},
///   {"story_text": "It crosses a river.", "image_prompt": "fox on a log raft"},
///   {"story_text": "It finds home.", "image_prompt": "fox at a cottage door"}
/// ]"#;
///
/// let segments = parse_story_segments(reply).unwrap();
/// assert_eq!(segments.len(), 4);
/// assert_eq!(segments[2].story_text(), "It crosses a river.");
/// ```
pub fn parse_story_segments(text: &str) -> Result<Vec<StorySegment>, ExtractionError> {
    let json = extract_json_block(text)
        .or_else(|| bracket_span(text))
        .ok_or_else(|| {
            tracing::error!(response_length = text.len(), "No story array found in LLM response");
            ExtractionError::new(ExtractionErrorKind::NoJsonFound(text.len()))
        })?;

    let items = match parse_json::<Value>(json)? {
        Value::Array(items) => items,
        other => {
            return Err(ExtractionError::new(ExtractionErrorKind::InvalidJson(
                format!("expected an array, got {}", json_type(&other)),
            )));
        }
    };

    if items.len() != SEGMENT_COUNT {
        tracing::error!(count = items.len(), "Story has the wrong number of segments");
        return Err(ExtractionError::new(ExtractionErrorKind::WrongSegmentCount {
            expected: SEGMENT_COUNT,
            actual: items.len(),
        }));
    }

    items
        .iter()
        .enumerate()
        .map(|(index, item)| segment_from(index, item))
        .collect()
}

fn segment_from(index: usize, item: &Value) -> Result<StorySegment, ExtractionError> {
    let invalid = |reason: &str| {
        ExtractionError::new(ExtractionErrorKind::InvalidSegment {
            index,
            reason: reason.to_string(),
        })
    };

    let object = item.as_object().ok_or_else(|| invalid("not an object"))?;
    let story_text = object
        .get("story_text")
        .map(field_text)
        .ok_or_else(|| invalid("missing field story_text"))?;
    let image_prompt = object
        .get("image_prompt")
        .map(field_text)
        .ok_or_else(|| invalid("missing field image_prompt"))?;

    Ok(StorySegment::new(story_text, image_prompt))
}

/// A segment value as text; `null` reads as empty so the caller can skip it.
fn field_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Text from the first `[` through the last `]`.
fn bracket_span(text: &str) -> Option<&str> {
    let start = text.find('[')?;
    let end = text.rfind(']')?;
    (start < end).then(|| &text[start..=end])
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Emits a parsed story segment by segment, one image call at a time.
///
/// Segment `n + 1` is not started until the image stream of segment `n` has
/// been drained and its images emitted.
#[derive(Debug)]
pub struct SegmentLoop<'a, B: ?Sized> {
    backend: &'a B,
    image_model: &'a str,
    plan: &'a SegmentPlan,
    image_request: RequestStaging,
}

impl<'a, B> SegmentLoop<'a, B>
where
    B: BotBackend + ?Sized,
{
    /// Create a loop calling `image_model` on `backend`.
    pub fn new(
        backend: &'a B,
        image_model: &'a str,
        plan: &'a SegmentPlan,
        image_request: RequestStaging,
    ) -> Self {
        Self {
            backend,
            image_model,
            plan,
            image_request,
        }
    }

    /// Emit the opening, every segment with its images, then the closing.
    #[tracing::instrument(skip_all, fields(segments = segments.len(), model = self.image_model))]
    pub async fn run(
        &self,
        segments: &[StorySegment],
        turn: &ConversationTurn,
        latest: &Message,
        emitter: &mut ChunkEmitter,
    ) -> PictorResult<()> {
        emitter.emit(OutgoingChunk::text(self.plan.opening)).await?;

        for (offset, segment) in segments.iter().enumerate() {
            let index = (offset + 1).to_string();
            let section = self.plan.section.render(&[
                ("index", index.as_str()),
                ("story_text", segment.story_text().as_str()),
            ])?;
            emitter.emit(OutgoingChunk::text(section)).await?;

            if segment.image_prompt().is_empty() {
                tracing::warn!(segment = offset + 1, "Segment has no image prompt");
                emitter.emit(OutgoingChunk::text(self.plan.empty_prompt)).await?;
                continue;
            }

            let prompt = self
                .plan
                .image_prompt
                .render(&[("image_prompt", segment.image_prompt().as_str())])?;
            let request = image_turn(self.image_request, turn, latest, prompt);
            let attachments = collect_attachments(self.backend, &request, self.image_model).await?;
            tracing::info!(segment = offset + 1, images = attachments.len(), "Segment illustrated");

            let alt = self.plan.image_alt.render(&[("index", index.as_str())])?;
            for attachment in attachments {
                emitter
                    .emit(OutgoingChunk::image(alt.clone(), attachment.url))
                    .await?;
            }
        }

        emitter.emit(OutgoingChunk::text(self.plan.closing)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_json(n: usize) -> String {
        let items: Vec<String> = (1..=n)
            .map(|i| format!(r#"{{"story_text": "part {i}", "image_prompt": "scene {i}"}}"#))
            .collect();
        format!("[{}]", items.join(", "))
    }

    #[test]
    fn test_four_segments_parse_in_order() {
        let segments = parse_story_segments(&segment_json(4)).unwrap();
        let texts: Vec<_> = segments.iter().map(|s| s.story_text().as_str()).collect();
        assert_eq!(texts, vec!["part 1", "part 2", "part 3", "part 4"]);
        assert_eq!(segments[3].image_prompt(), "scene 4");
    }

    #[test]
    fn test_fenced_block_preferred_over_brackets() {
        let response = format!(
            "Notes [draft]\n```json\n{}\n```\nMore notes [end]",
            segment_json(4)
        );
        assert_eq!(parse_story_segments(&response).unwrap().len(), 4);
    }

    #[test]
    fn test_three_segments_rejected() {
        let err = parse_story_segments(&segment_json(3)).unwrap_err();
        assert_eq!(
            err.kind(),
            &ExtractionErrorKind::WrongSegmentCount {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_five_segments_rejected() {
        let err = parse_story_segments(&segment_json(5)).unwrap_err();
        assert!(matches!(
            err.kind(),
            ExtractionErrorKind::WrongSegmentCount { actual: 5, .. }
        ));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = parse_story_segments(r#"[{"story_text": "a", "image_prompt": }]"#).unwrap_err();
        assert!(matches!(err.kind(), ExtractionErrorKind::InvalidJson(_)));
    }

    #[test]
    fn test_no_span_rejected() {
        let err = parse_story_segments("Once upon a time there was no JSON.").unwrap_err();
        assert!(matches!(err.kind(), ExtractionErrorKind::NoJsonFound(_)));
    }

    #[test]
    fn test_reversed_brackets_rejected() {
        let err = parse_story_segments("] oops [").unwrap_err();
        assert!(matches!(err.kind(), ExtractionErrorKind::NoJsonFound(_)));
    }

    #[test]
    fn test_missing_field_rejected() {
        let response = r#"[
            {"story_text": "a", "image_prompt": "1"},
            {"story_text": "b"},
            {"story_text": "c", "image_prompt": "3"},
            {"story_text": "d", "image_prompt": "4"}
        ]"#;
        let err = parse_story_segments(response).unwrap_err();
        assert!(matches!(
            err.kind(),
            ExtractionErrorKind::InvalidSegment { index: 1, .. }
        ));
    }

    #[test]
    fn test_non_array_rejected() {
        let err = parse_story_segments("```json\n{\"story_text\": \"a\"}\n```").unwrap_err();
        assert!(matches!(err.kind(), ExtractionErrorKind::InvalidJson(_)));
    }

    #[test]
    fn test_empty_image_prompt_is_still_valid() {
        let response = segment_json(4).replace("scene 2", "");
        let segments = parse_story_segments(&response).unwrap();
        assert!(segments[1].image_prompt().is_empty());
    }

    #[test]
    fn test_null_image_prompt_reads_as_empty() {
        let response = r#"[
            {"story_text": "a", "image_prompt": "1"},
            {"story_text": "b", "image_prompt": null},
            {"story_text": 3, "image_prompt": "3"},
            {"story_text": "d", "image_prompt": "4"}
        ]"#;
        let segments = parse_story_segments(response).unwrap();
        assert!(segments[1].image_prompt().is_empty());
        assert_eq!(segments[2].story_text(), "3");
    }
}
