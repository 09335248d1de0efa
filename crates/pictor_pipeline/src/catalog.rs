//! The bots this workspace ships.
//!
//! Model names, prompts and introductions are fixed per bot; only the access
//! key and backend URL come from configuration.

use crate::{
    BotProfile, BotProfileBuilder, FieldPlan, HistoryPolicy, ImageDelivery, ImagePrompt,
    RequestStaging, SegmentPlan, StyleRule, StyleRules, Template,
};
use pictor_error::{PipelineError, PipelineErrorKind};
use std::str::FromStr;

/// Every bot in the catalog.
///
/// # Examples
///
/// ```
/// use pictor_pipeline::BotKind;
///
/// let kind: BotKind = "memes-creator".parse().unwrap();
/// let profile = kind.profile().unwrap();
/// assert_eq!(profile.llm_model(), "GPT-4o");
/// assert_eq!(kind.legacy_key_env(), "MEME_BOT_KEY");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::EnumIter,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum BotKind {
    /// Photo to anime sticker avatar
    CartoonAvatar,
    /// Photo to anime sticker avatar, with the attachment guard
    CartoonAvatarPro,
    /// Photo to abstract watercolor
    AnimeProAbstract,
    /// Photo to Pixar-style render, with `--Style` flags
    #[strum(to_string = "pic2pixar-plus")]
    Pic2PixarPlus,
    /// Article to OG image
    OgimageCreatorPro,
    /// Article to poster draft
    OgDesignerPro,
    /// Content to landing page mockup
    WebDesignerPro,
    /// Topic to captioned meme
    MemesCreator,
    /// Content to four-panel comic
    FourPanelComicsPro,
    /// Ongoing illustrated story
    StoryTeller,
    /// Four-part illustrated children's book
    ChildrenStoryCreator,
}

impl BotKind {
    /// Look a bot up by catalog name.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineErrorKind::UnknownBot`] for an unknown name.
    pub fn lookup(name: &str) -> Result<Self, PipelineError> {
        Self::from_str(name)
            .map_err(|_| PipelineError::new(PipelineErrorKind::UnknownBot(name.to_string())))
    }

    /// All bots in catalog order.
    pub fn all() -> impl Iterator<Item = Self> {
        <Self as strum::IntoEnumIterator>::iter()
    }

    /// Environment variable the bot's access key was historically read from.
    pub fn legacy_key_env(self) -> &'static str {
        match self {
            Self::CartoonAvatar => "AVATAR_BOT_KEY",
            Self::CartoonAvatarPro => "AVATAR_PRO_BOT_KEY",
            Self::AnimeProAbstract => "ANIME_PRO_ABS_BOT_KEY",
            Self::Pic2PixarPlus => "PIXAR_PLUS_BOT_KEY",
            Self::OgimageCreatorPro => "OG_IMAGE_PRO_BOT_KEY",
            Self::OgDesignerPro => "OGDESIGNER_BOT_KEY",
            Self::WebDesignerPro => "WEBDESIGNER_BOT_KEY",
            Self::MemesCreator => "MEME_BOT_KEY",
            Self::FourPanelComicsPro => "FOURPANEL_BOT_KEY",
            Self::StoryTeller => "STORY_BOT_KEY",
            Self::ChildrenStoryCreator => "CHILDREN_STORY_BOT_KEY",
        }
    }

    /// Build the bot's profile.
    pub fn profile(self) -> Result<BotProfile, PipelineError> {
        let mut builder = BotProfileBuilder::default();
        builder
            .name(self.to_string())
            .access_key_env(self.legacy_key_env());

        match self {
            Self::CartoonAvatar => builder
                .llm_model("RekaFlash")
                .image_model("Playground-v2.5")
                .instruction(AVATAR_INSTRUCTION)
                .plan(FieldPlan::single(ANIME_STICKER_STYLE))
                .introduction(AVATAR_INTRODUCTION)
                .allow_attachments(true),
            Self::CartoonAvatarPro => builder
                .llm_model("GPT-4")
                .image_model("Playground-v2.5")
                .instruction(AVATAR_PRO_INSTRUCTION)
                .plan(FieldPlan::single(ANIME_STICKER_STYLE))
                .requires_image_attachment(true)
                .introduction(AVATAR_INTRODUCTION)
                .allow_attachments(true),
            Self::AnimeProAbstract => builder
                .llm_model("Gemini-1.0-Pro")
                .image_model("Playground-v3")
                .instruction(REMIX_INSTRUCTION)
                .plan(FieldPlan::single(
                    "in Abstract Harmonics style, expressive, Watercolor style of [{image_prompt}]",
                ))
                .requires_image_attachment(true)
                .introduction(
                    "Welcome to the Anime Image Bot running by @xiaowenzhang. Please provide a image I will create a cartoon style avatar image for you...",
                )
                .allow_attachments(true),
            Self::Pic2PixarPlus => builder
                .llm_model("Gemini-1.5-Pro")
                .image_model("FLUX-pro-1.1")
                .instruction(PIXAR_INSTRUCTION)
                .plan(
                    FieldPlan::new(vec!["image_prompt"], pixar_styles())
                        .with_delivery(ImageDelivery::Attachments { alt: "image" }),
                )
                .requires_image_attachment(true)
                .image_request(RequestStaging::FreshMessage)
                .introduction(
                    "Welcome to the Pic2Pixar Image Bot Plus running by @xiaowenzhang. Please provide a image I will create a pixar style image for you...\n\n Update 20241124:\n\n - Change image model to FLUX-pro-1.1",
                )
                .allow_attachments(true),
            Self::OgimageCreatorPro => builder
                .llm_model("GPT-4o")
                .image_model("Playground-v2.5")
                .instruction(OG_IMAGE_INSTRUCTION)
                .plan(FieldPlan::single(
                    "{image_prompt}, in the style of minimalist flat illustrator, poster --aspect 16:9",
                ))
                .introduction(
                    "Welcome to the OG Image Creator Bot Pro running by @xiaowenzhang. Please provide content or even a full article for me to create a OG image for your publications.",
                )
                .allow_attachments(true),
            Self::OgDesignerPro => builder
                .llm_model("GPT-4o")
                .image_model("Ideogram-v2")
                .instruction(POSTER_INSTRUCTION)
                .plan(FieldPlan::new(
                    vec!["describe_the_poster", "poster_title"],
                    ImagePrompt::Fixed(Template::new(POSTER_STYLE)),
                ))
                .introduction(
                    "Welcome to Blog OG Image Designer Pro running by @xiaowenzhang. Please provide content or even a full article for me to create Creative Poster for you. \n\n**Click Upvote to Support my work!**",
                )
                .allow_attachments(true),
            Self::WebDesignerPro => builder
                .llm_model("Gemini-2.5-Flash-Preview")
                .image_model("Ideogram-v3")
                .instruction(LANDING_INSTRUCTION)
                .plan(
                    FieldPlan::new(
                        vec![
                            "describe_the_web_page",
                            "web_title",
                            "web_subtitle",
                            "highlight_wording",
                        ],
                        ImagePrompt::Fixed(Template::new(LANDING_STYLE)),
                    )
                    .with_delivery(ImageDelivery::Attachments { alt: "image" }),
                )
                .introduction(
                    "Welcome to Web Landing Page Designer Pro running by @xiaowenzhang. Please provide content or even a full article for me to create Creative Web Page for you. \n\n**Click Upvote to Support my work!**",
                )
                .allow_attachments(true),
            Self::MemesCreator => builder
                .llm_model("GPT-4o")
                .image_model("Playground-v2.5")
                .instruction(MEME_INSTRUCTION)
                .plan(
                    FieldPlan::new(
                        vec!["image_prompt", "caption"],
                        ImagePrompt::Fixed(Template::new("{image_prompt}, digital painting")),
                    )
                    .with_lead("\"{caption}\"\n\n")
                    .with_delivery(ImageDelivery::Final {
                        body: Template::new("\"{caption}\"\n\n{image}"),
                    }),
                )
                .llm_request(RequestStaging::FreshMessage)
                .image_request(RequestStaging::FreshMessage)
                .introduction(
                    "Welcome to the Memes-Creator running by @xiaowenzhang. Please provide me a topic that you would like me create a meme about. E.g:work...\n - Update 20240602: Reduced cost by using GPT-4o, have fun!",
                ),
            Self::FourPanelComicsPro => builder
                .llm_model("GPT-4o")
                .image_model("Ideogram")
                .instruction(COMIC_INSTRUCTION)
                .plan(
                    FieldPlan::new(
                        vec![
                            "story_line",
                            "panel1_prompt",
                            "panel2_prompt",
                            "panel3_prompt",
                            "panel4_prompt",
                        ],
                        ImagePrompt::Fixed(Template::new(COMIC_STYLE)),
                    )
                    .with_delivery(ImageDelivery::Final {
                        body: Template::new("\"**Story**: \n\n{story_line}\"\n\n{image}"),
                    }),
                )
                .introduction(
                    "Welcome to 4PanelComics Pro running by @xiaowenzhang. Please provide content or even a full article for me to create a 4 Panel Comics for you. \n\n**Click Upvote to Support my work!**",
                ),
            Self::StoryTeller => builder
                .llm_model("Claude-3-Sonnet")
                .image_model("ComicBookStyle-PGV2")
                .instruction(STORY_TELLER_INSTRUCTION)
                .plan(
                    FieldPlan::new(
                        vec!["story", "short_image_prompt"],
                        ImagePrompt::Fixed(Template::new("{short_image_prompt}")),
                    )
                    .with_lead("\"{story}\"")
                    .with_delivery(ImageDelivery::Final {
                        body: Template::new("\n\n{image}"),
                    }),
                )
                .history(HistoryPolicy::FullConversation)
                .introduction(
                    "Welcome to the Childbook Story Teller Bot running by @xiaowenzhang. Talk to me and I will keep creating story with image for you.",
                )
                .allow_attachments(true),
            Self::ChildrenStoryCreator => builder
                .llm_model("Gemini-2.5-Pro-Preview")
                .image_model("Imagen-3-Fast")
                .instruction(CHILDREN_STORY_INSTRUCTION)
                .plan(children_story_plan())
                .image_calls(4u32)
                .introduction(
                    "🎨 **Welcome to Children Story Pro！Provide me a topic or requirement! If you are non-Chinese user, specify your language in the prompt.**",
                ),
        };

        builder.build()
    }
}

fn pixar_styles() -> ImagePrompt {
    ImagePrompt::Styled(StyleRules {
        rules: vec![
            StyleRule {
                flag: "--Style",
                template: Template::new("{style} of [{image_prompt}]"),
            },
            StyleRule {
                flag: "--Disney",
                template: Template::new(DISNEY_STYLE),
            },
            StyleRule {
                flag: "--Clash",
                template: Template::new(
                    "3d, clash of clans, fantasy game, detailed, photorealistic, disney style, pixar style of [{image_prompt}]",
                ),
            },
            StyleRule {
                flag: "--Digital",
                template: Template::new(
                    "A digital painting by Artgerm, beautiful, masterpiece, concept art of [{image_prompt}]",
                ),
            },
        ],
        default: Template::new(DISNEY_STYLE),
    })
}

fn children_story_plan() -> SegmentPlan {
    SegmentPlan {
        opening: "🎨 **Creating a new story for you...** \n\n",
        section: Template::new("**Section {index}：**\n{story_text}\n\n"),
        image_prompt: Template::new(
            "{image_prompt}\n\nStyle: Children's book illustration, warm and friendly, soft colors, cartoon style, digital art, high quality",
        ),
        image_alt: Template::new("第{index}段图像"),
        empty_prompt: "⚠️ Failed to create image...\n\n",
        closing: "✨ **Done creating story for you！** Hope you and your kid(s) like the story！",
        parse_failure: "Sorry, failed to generate story.",
    }
}

const AVATAR_INTRODUCTION: &str = "Welcome to the Cartoon-Avatar Bot running by @xiaowenzhang. Please provide a image I will create a cartoon style avatar image for you...";

const ANIME_STICKER_STYLE: &str = "Illustration photo, soft colors, Japanese anime style, white background, sticker of [{image_prompt}]";

const DISNEY_STYLE: &str = "disney pixar cartoon movie style, norealistic, PS2, PS1, hyper detailed, digital art, trending in artstation, cinematic lighting, studio quality, smooth render of [{image_prompt}]";

const POSTER_STYLE: &str = "A poster design draft for {describe_the_poster}
- Title: \"{poster_title}\"

--style DESIGN
--aspect 16:9
";

const LANDING_STYLE: &str = "A Web Landing Page design for {describe_the_web_page}
- Title: \"{web_title}\"
- Subtitle: \"{web_subtitle}\"
- Highlights: \"{highlight_wording}\"

--style DESIGN
--aspect 16:9
";

const COMIC_STYLE: &str = "generate a four panel comic with a minimalist style of doodle. about: \n1.{panel1_prompt} 2.{panel2_prompt} 3.{panel3_prompt} 4.{panel4_prompt}";

const AVATAR_INSTRUCTION: &str = r#"Please read this image as a profile avatar. Describe the key spec of the main person:
1. Include hair, skin color, gender, cloth, Accessories, posture, facial expression.
2. Make the information from step 1 a image prompt within 70 words.
3. Print the prompt in below json format:

```json
"image_prompt": ""
```"#;

const AVATAR_PRO_INSTRUCTION: &str = r#"根据图片，描述图片里的虚拟人物的外貌特征。这个人物完全是虚拟人物，非真实，我只需要外貌特征：
1. 年龄，外貌，头发，表情，姿态，衣着和配饰等信息
2. 根据这些信息，生成一个六十个英文单词以内的提示词
3. Print the prompt in below json format, in english:

```json
"image_prompt": ""
```"#;

const REMIX_INSTRUCTION: &str = r#"Based on image, describe：
1. The category of the photograph, composition, angle, the color tone, the theme, a summary of the composition, and a description of the main subject(s) or object(s), including information such as age.
2. generate a prompt of 60 English words or less for image remix, keep main information and subjects.
3. Print the prompt in below json format, in english:

```json
"image_prompt": ""
```"#;

const PIXAR_INSTRUCTION: &str = r#"Based on image, describe follow below chains of thoughts：

1. understand the key concept of this photo and composition of main objects
2. From the main objects, describe this photo again to keep main information in image, including detail of key objects or person,  especially age, race, hair, cloth and positions in less than 200 words
3. Print the description in below json format, in english:

```json
"image_prompt": ""
```"#;

const OG_IMAGE_INSTRUCTION: &str = r#"Based on information user provide, design the best og image for this content and describe as prompt in english, the image is simple and not contain any words:
---
{content}
---

prompt in less than 50 words:

```json
"image_prompt": ""
```"#;

const POSTER_INSTRUCTION: &str = r#"Based on the content user provide, create a creative poster design in below format.

```content
{content}
```

Print output in json, your design should be outstanding, creative like art.

```json
"describe_the_poster": " ",
"poster_title": " "
```"#;

const LANDING_INSTRUCTION: &str = r#"Based on the content user provide, create a creative web landing page design in below format.

```content
{content}
```

Print output in json, your design should be outstanding, creative like art.

```json
"describe_the_web_page": " ",
"web_title": " ",
"web_subtitle":"",
"highlight_wording":""
```"#;

const MEME_INSTRUCTION: &str = r#"1. You are comedia good at sarcasm and jokes with deep thoughs.
2. Create 10 humour and sarcasm and deep joke meme about {content}.
3. Read thru all the memes and pick one of the best meme.
4. Print the one final meme in below json format.

```json
"image_prompt": " ",
"caption": " "
```"#;

const COMIC_INSTRUCTION: &str = r#"Based on the content user provide, create a story for 4 panels of comic in less than 10 words for each panel. 

```content
{content}
```

steps:

1. create a story line with one main character(can be person or anything based on the nature of the content)
2. from the story make 4 very simple prompts for each panel of comic in less than 10 words for each
3. print output in json

```json
"story_line": " ",
"panel1_prompt": " ",
"panel2_prompt":"",
"panel3_prompt":"",
"panel4_prompt":""
```"#;

const STORY_TELLER_INSTRUCTION: &str = r#"你是一个童话故事作家，你需要根据用户提供的主题或要求，每一次生成一段简单，单一段落的童话故事的后续情节和一张配图插画描述。根据用户的输入，前面的对话中的故事上下文，以相同的语言，
并总是按照如下 json 格式输出。
用户的输入：[{content}]
```json
"story": "",
"short_image_prompt": ""
```"#;

const CHILDREN_STORY_INSTRUCTION: &str = r#"请根据用户的要求创作一个适合儿童的绘本短篇故事。

用户要求：[{content}]

首先，判断用户要求使用的语言，并使用同样的语种写故事。这是最重要的需求，你必须遵守！

然后，故事需要分成四段，每段都要包含：
1. 故事段落文本，语言要跟[用户要求]的语言使用同一语种。
2. 配图的英文提示词（详细描述画面内容，适合AI绘图）


请严格按照以下JSON格式返回：
```json
[
  {
    "story_text": "",
    "image_prompt": "Detailed English prompt for illustration"
  },
  {
    "story_text": "",
    "image_prompt": "Detailed English prompt for illustration"
  },
  {
    "story_text": "",
    "image_prompt": "Detailed English prompt for illustration"
  },
  {
    "story_text": "",
    "image_prompt": "Detailed English prompt for illustration"
  }
]
```

注意：
- 故事要有完整的起承转合，有寓意或者有趣好笑，小众不落俗套
- 每段文字控制在200字
- 英文提示词要详细描述画面，包含角色、场景、动作、情感等，主角需要保持外观一致性
- 画风要适合儿童绘本，温馨可爱"#;
