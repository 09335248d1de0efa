//! Prompt templates with `{name}` placeholders.

use pictor_error::{PipelineError, PipelineErrorKind};
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"\{([a-z][a-z0-9_]*)\}"));

/// A static prompt text with named placeholders.
///
/// A placeholder is `{` + lowercase identifier + `}`. Any other brace is
/// literal text, so JSON samples inside a prompt need no escaping.
///
/// # Examples
///
/// ```
/// use pictor_pipeline::Template;
///
/// let template = Template::new("{image_prompt}, digital painting");
/// let prompt = template.render(&[("image_prompt", "a cat at a desk")]).unwrap();
/// assert_eq!(prompt, "a cat at a desk, digital painting");
///
/// let literal = Template::new(r#"```json
/// {"story_text": "", "image_prompt": ""}
/// ```"#);
/// assert!(literal.placeholders().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Template(&'static str);

impl Template {
    /// Wrap a static text.
    pub const fn new(text: &'static str) -> Self {
        Self(text)
    }

    /// The raw template text.
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder names in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        match PLACEHOLDER.as_ref() {
            Ok(regex) => regex
                .captures_iter(self.0)
                .filter_map(|captures| captures.get(1))
                .map(|name| name.as_str())
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Substitute every placeholder from `values`.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::Template`] naming the first placeholder
    /// with no value.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PipelineError> {
        let regex = PLACEHOLDER.as_ref().map_err(|e| {
            PipelineError::new(PipelineErrorKind::Template(format!(
                "placeholder pattern: {}",
                e
            )))
        })?;

        let mut rendered = String::with_capacity(self.0.len());
        let mut last = 0;
        for captures in regex.captures_iter(self.0) {
            let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
                continue;
            };
            let value = values
                .iter()
                .rev()
                .find(|(key, _)| *key == name.as_str())
                .map(|(_, value)| *value)
                .ok_or_else(|| {
                    PipelineError::new(PipelineErrorKind::Template(name.as_str().to_string()))
                })?;
            rendered.push_str(&self.0[last..whole.start()]);
            rendered.push_str(value);
            last = whole.end();
        }
        rendered.push_str(&self.0[last..]);
        Ok(rendered)
    }
}

impl From<&'static str> for Template {
    fn from(text: &'static str) -> Self {
        Self::new(text)
    }
}

impl std::fmt::Display for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}
