//! Attachment validation for image-input bots.

use pictor_core::{Attachment, Message};

/// Text sent to the user when the guard rejects a message.
pub const REJECTION_MESSAGE: &str = "Please send an image.";

/// Why a message was rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum Rejection {
    /// Not exactly one attachment
    #[display("expected exactly one attachment, got {}", _0)]
    AttachmentCount(usize),
    /// The single attachment is not declared as an image
    #[display("attachment has content type {}", _0)]
    NotAnImage(String),
}

impl Rejection {
    /// The fixed user-facing message.
    pub fn message(&self) -> &'static str {
        REJECTION_MESSAGE
    }
}

/// Accept a message carrying exactly one image attachment.
///
/// Only the declared content type is checked.
///
/// # Examples
///
/// ```
/// use pictor_core::{Attachment, Message};
/// use pictor_pipeline::validate_image_attachment;
///
/// let photo = Message::user("").with_attachment(Attachment::new("https://x/me.png", "image/png"));
/// assert!(validate_image_attachment(&photo).is_ok());
///
/// let rejection = validate_image_attachment(&Message::user("hi")).unwrap_err();
/// assert_eq!(rejection.message(), "Please send an image.");
/// ```
pub fn validate_image_attachment(message: &Message) -> Result<&Attachment, Rejection> {
    match message.attachments.as_slice() {
        [attachment] if attachment.is_image() => Ok(attachment),
        [attachment] => Err(Rejection::NotAnImage(attachment.content_type.clone())),
        attachments => Err(Rejection::AttachmentCount(attachments.len())),
    }
}
