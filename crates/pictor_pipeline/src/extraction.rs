//! Utilities for extracting structured fields from LLM responses.
//!
//! LLMs are asked to answer inside a ```` ```json ```` block holding one or
//! more `"field": "value"` pairs, but nothing guarantees they do. Extraction
//! is therefore best-effort: a strict JSON decode when the block is valid,
//! and a literal regex scrape otherwise.

use pictor_error::{ExtractionError, ExtractionErrorKind};
use serde_json::{Map, Value};

/// Text substituted for a field the response did not contain.
pub const MISSING_SENTINEL: &str = "ERROR";

/// Result of looking up one field in an LLM response.
///
/// # Examples
///
/// ```
/// use pictor_pipeline::{extract_field, ExtractedField};
///
/// let reply = "```json\n\"image_prompt\": \"a happy dog\"\n```";
/// assert_eq!(extract_field(reply, "image_prompt"), ExtractedField::Found("a happy dog".into()));
/// assert_eq!(extract_field(reply, "caption").as_str(), "ERROR");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ExtractedField {
    /// The captured value
    #[display("{}", _0)]
    Found(String),
    /// No match; renders as the `ERROR` sentinel
    #[display("ERROR")]
    Missing,
}

impl ExtractedField {
    /// The value, or the sentinel for a miss.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Found(value) => value,
            Self::Missing => MISSING_SENTINEL,
        }
    }

    /// Whether the field was absent.
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Scrape the first `"<field>": "<value>"` occurrence from `text`.
///
/// The value is everything up to the next `"` on the same line. Escapes are
/// not interpreted, so a value containing a quote (escaped or not) is cut
/// short at that quote.
///
/// ```
/// use pictor_pipeline::extract_field;
///
/// let reply = r#""caption": "She said \"hi\"""#;
/// assert_eq!(extract_field(reply, "caption").as_str(), r"She said \");
/// ```
pub fn extract_field(text: &str, field: &str) -> ExtractedField {
    let pattern = format!(r#""{}": "(.*?)""#, regex::escape(field));
    let regex = match regex::Regex::new(&pattern) {
        Ok(regex) => regex,
        Err(e) => {
            tracing::error!(field, error = %e, "Field pattern failed to compile");
            return ExtractedField::Missing;
        }
    };

    regex
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|value| ExtractedField::Found(value.as_str().to_string()))
        .unwrap_or(ExtractedField::Missing)
}

/// Fields extracted from one response, in request order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldSet {
    fields: Vec<(String, ExtractedField)>,
}

impl FieldSet {
    /// Look up a field.
    pub fn get(&self, name: &str) -> Option<&ExtractedField> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// The value of a field, or the sentinel when it is missing or unknown.
    pub fn value(&self, name: &str) -> &str {
        self.get(name).map_or(MISSING_SENTINEL, ExtractedField::as_str)
    }

    /// Names of the fields that were not found.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, value)| value.is_missing())
            .map(|(field, _)| field.as_str())
    }

    /// `(name, value)` pairs with misses rendered as the sentinel.
    pub fn values(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

/// Extract several fields, preferring a strict decode of the JSON block.
///
/// When the first ```` ```json ```` block decodes as a JSON object, either
/// as written or wrapped in braces, its string values are used and escaped
/// quotes come through intact. Fields the block does not provide fall back to
/// [`extract_field`] over the whole response.
///
/// ```
/// use pictor_pipeline::extract_fields;
///
/// let reply = "```json\n\"caption\": \"She said \\\"hi\\\"\",\n\"image_prompt\": \"a fox\"\n```";
/// let fields = extract_fields(reply, &["caption", "image_prompt"]);
/// assert_eq!(fields.value("caption"), "She said \"hi\"");
/// assert_eq!(fields.value("image_prompt"), "a fox");
/// ```
pub fn extract_fields(text: &str, fields: &[&str]) -> FieldSet {
    let decoded = extract_json_block(text).and_then(decode_object);
    if decoded.is_some() {
        tracing::debug!("Decoded fields from JSON block");
    }

    let fields = fields
        .iter()
        .map(|&field| {
            let value = decoded
                .as_ref()
                .and_then(|object| object.get(field))
                .and_then(Value::as_str)
                .map(|value| ExtractedField::Found(value.to_string()))
                .unwrap_or_else(|| extract_field(text, field));
            (field.to_string(), value)
        })
        .collect();

    FieldSet { fields }
}

/// Decode a block as an object, accepting a bare `"k": "v"` list.
fn decode_object(block: &str) -> Option<Map<String, Value>> {
    let block = block.trim().trim_end_matches(',');
    serde_json::from_str::<Map<String, Value>>(block)
        .or_else(|_| serde_json::from_str::<Map<String, Value>>(&format!("{{{}}}", block)))
        .ok()
}

/// Contents of the first ```` ```json ```` fenced block.
///
/// Only a fence with both an opening `json` tag and a closing fence counts.
pub fn extract_json_block(text: &str) -> Option<&str> {
    const OPEN: &str = "```json";

    let start = text.find(OPEN)? + OPEN.len();
    let end = text[start..].find("```")?;
    Some(text[start..start + end].trim())
}

/// Parse JSON into a specific type.
///
/// # Errors
///
/// Returns [`ExtractionErrorKind::InvalidJson`] when the text does not decode.
///
/// # Examples
///
/// ```
/// use pictor_pipeline::parse_json;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Panel {
///     prompt: String,
/// }
///
/// let panel: Panel = parse_json(r#"{"prompt": "a cat on a roof"}"#).unwrap();
/// assert_eq!(panel.prompt, "a cat on a roof");
/// ```
pub fn parse_json<T>(json_str: &str) -> Result<T, ExtractionError>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();

        tracing::error!(
            error = %e,
            json_preview = %preview,
            "JSON parsing failed"
        );

        ExtractionError::new(ExtractionErrorKind::InvalidJson(format!(
            "{} (JSON: {}...)",
            e, preview
        )))
    })
}
