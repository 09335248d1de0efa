//! Bot profiles: everything that distinguishes one pipeline from another.

use crate::Template;
use pictor_core::SettingsResponse;
use pictor_error::{PipelineError, PipelineErrorKind};

/// How much of the conversation the LLM sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum HistoryPolicy {
    /// Collapse the turn to its latest message before any call
    #[default]
    #[display("latest")]
    LatestOnly,
    /// Send the whole conversation to the LLM; the image call still gets only
    /// the latest message
    #[display("full")]
    FullConversation,
}

/// What message an outbound request is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RequestStaging {
    /// The user's latest message with its content replaced, attachments kept
    #[default]
    ReuseMessage,
    /// A new user message carrying only the prompt
    FreshMessage,
}

/// One `--Flag` a user can start their message with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRule {
    /// Prefix that selects this rule
    pub flag: &'static str,
    /// Template rendered with `{image_prompt}` and `{style}`
    pub template: Template,
}

/// Style selection by message prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleRules {
    /// Checked in order; the first matching prefix wins
    pub rules: Vec<StyleRule>,
    /// Used when no rule matches
    pub default: Template,
}

/// How the image prompt is built from extracted fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePrompt {
    /// One fixed template
    Fixed(Template),
    /// Template chosen by the user's message prefix
    Styled(StyleRules),
}

impl ImagePrompt {
    /// Pick the template for `content` and the `{style}` text that goes with it.
    ///
    /// `{style}` is the message with every occurrence of the matched flag removed.
    pub fn select<'a>(&'a self, content: &str) -> (&'a Template, String) {
        match self {
            Self::Fixed(template) => (template, content.to_string()),
            Self::Styled(styles) => styles
                .rules
                .iter()
                .find(|rule| content.starts_with(rule.flag))
                .map(|rule| (&rule.template, content.replace(rule.flag, "")))
                .unwrap_or((&styles.default, content.to_string())),
        }
    }

    /// Render the prompt for `content` from the extracted `values`.
    pub fn render(&self, content: &str, values: &[(&str, &str)]) -> Result<String, PipelineError> {
        let (template, style) = self.select(content);
        let mut values = values.to_vec();
        values.push(("style", style.as_str()));
        template.render(&values)
    }
}

/// How the image result reaches the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageDelivery {
    /// Await the final reply text and render it into `body` as `{image}`
    Final {
        /// Output template; an empty rendering is not emitted
        body: Template,
    },
    /// Stream the call and emit one image chunk per attachment
    Attachments {
        /// Alt text for every image
        alt: &'static str,
    },
}

/// A plan that scrapes named fields and makes one image call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPlan {
    /// Fields to extract, in order
    pub fields: Vec<&'static str>,
    /// Image prompt construction
    pub image_prompt: ImagePrompt,
    /// Text emitted before the image call
    pub lead: Option<Template>,
    /// Image result delivery
    pub delivery: ImageDelivery,
}

impl FieldPlan {
    /// Extract `fields` and emit the final image reply as-is.
    pub fn new(fields: Vec<&'static str>, image_prompt: ImagePrompt) -> Self {
        Self {
            fields,
            image_prompt,
            lead: None,
            delivery: ImageDelivery::Final {
                body: Template::new("{image}"),
            },
        }
    }

    /// The common case: one `image_prompt` field and a fixed style.
    pub fn single(image_template: &'static str) -> Self {
        Self::new(
            vec!["image_prompt"],
            ImagePrompt::Fixed(Template::new(image_template)),
        )
    }

    /// Emit `lead` before the image call.
    pub fn with_lead(mut self, lead: &'static str) -> Self {
        self.lead = Some(Template::new(lead));
        self
    }

    /// Change the delivery.
    pub fn with_delivery(mut self, delivery: ImageDelivery) -> Self {
        self.delivery = delivery;
        self
    }
}

/// A plan that parses a fixed number of story segments and illustrates each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentPlan {
    /// Emitted before the first segment
    pub opening: &'static str,
    /// Per-segment text, with `{index}` and `{story_text}`
    pub section: Template,
    /// Per-segment image prompt, with `{image_prompt}`
    pub image_prompt: Template,
    /// Alt text for segment images, with `{index}`
    pub image_alt: Template,
    /// Emitted instead of an image when the segment has no prompt
    pub empty_prompt: &'static str,
    /// Emitted after the last segment
    pub closing: &'static str,
    /// Emitted when the segments cannot be parsed
    pub parse_failure: &'static str,
}

/// What happens after the LLM replies.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::From)]
pub enum Plan {
    /// Scrape fields, one image call
    Fields(FieldPlan),
    /// Parse segments, one image call each
    Segments(SegmentPlan),
}

/// Configuration of one prompt-pipeline bot.
///
/// # Examples
///
/// ```
/// use pictor_pipeline::{BotProfileBuilder, FieldPlan};
///
/// let profile = BotProfileBuilder::default()
///     .name("sketcher")
///     .llm_model("GPT-4o")
///     .image_model("Playground-v2.5")
///     .instruction("Describe {content} as an image prompt")
///     .plan(FieldPlan::single("{image_prompt}, pencil sketch"))
///     .introduction("Send me a topic.")
///     .build()
///     .unwrap();
///
/// let settings = profile.settings();
/// assert_eq!(settings.server_bot_dependencies.get("GPT-4o"), Some(&1));
/// assert!(!settings.allow_attachments);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, derive_builder::Builder, derive_getters::Getters)]
#[builder(setter(into), build_fn(private, name = "build_internal"))]
pub struct BotProfile {
    /// Catalog name
    name: String,
    /// Hosted LLM bot
    llm_model: String,
    /// Hosted text-to-image bot
    image_model: String,
    /// LLM instruction, rendered with `{content}`
    instruction: Template,
    /// Extraction and output plan
    plan: Plan,
    /// Run the attachment guard before any call
    #[builder(default)]
    requires_image_attachment: bool,
    /// Conversation sent to the LLM
    #[builder(default)]
    history: HistoryPolicy,
    /// How the LLM request is staged
    #[builder(default)]
    llm_request: RequestStaging,
    /// How the image request is staged
    #[builder(default)]
    image_request: RequestStaging,
    /// Shown to first-time users
    introduction: String,
    /// Whether the platform lets users attach files
    #[builder(default)]
    allow_attachments: bool,
    /// Image calls per turn, advertised in settings
    #[builder(default = "1")]
    image_calls: u32,
    /// Environment variable that historically held this bot's access key
    #[builder(setter(into, strip_option), default)]
    access_key_env: Option<String>,
}

impl BotProfileBuilder {
    /// Build the profile.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::InvalidProfile`] if a required field is missing.
    pub fn build(&self) -> Result<BotProfile, PipelineError> {
        self.build_internal()
            .map_err(|e| PipelineError::new(PipelineErrorKind::InvalidProfile(e.to_string())))
    }
}

impl BotProfile {
    /// The settings descriptor for this bot.
    pub fn settings(&self) -> SettingsResponse {
        SettingsResponse::new(self.introduction.clone())
            .with_dependency(self.llm_model.clone(), 1)
            .with_dependency(self.image_model.clone(), self.image_calls)
            .with_attachments(self.allow_attachments)
    }
}
