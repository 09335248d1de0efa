use pictor_core::{Attachment, ConversationTurn, Message, OutgoingChunk, Role};

#[test]
fn test_retain_latest_on_empty_turn_is_none() {
    let mut turn = ConversationTurn::default();
    assert!(turn.retain_latest().is_none());
    assert!(turn.query.is_empty());
}

#[test]
fn test_retain_latest_keeps_attachments() {
    let mut turn = ConversationTurn::new(vec![
        Message::user("first"),
        Message::user("second").with_attachment(Attachment::new("https://x/y.png", "image/png")),
    ]);

    let latest = turn.retain_latest().unwrap();
    assert_eq!(latest.content, "second");
    assert_eq!(latest.attachments.len(), 1);
    assert_eq!(turn.query.len(), 1);
}

#[test]
fn test_with_single_preserves_identifiers() {
    let mut turn = ConversationTurn::new(vec![Message::user("a"), Message::bot("b")]);
    turn.conversation_id = "c-1".to_string();
    turn.user_id = "u-1".to_string();

    let single = turn.with_single(Message::user("prompt"));
    assert_eq!(single.query.len(), 1);
    assert_eq!(single.conversation_id, "c-1");
    assert_eq!(single.user_id, "u-1");
    assert_eq!(turn.query.len(), 2);
}

#[test]
fn test_deserializes_platform_query() {
    let json = r#"{
        "query": [
            {"role": "user", "content": "hi", "content_type": "text/markdown",
             "timestamp": 1700000000000000, "message_id": "m-1", "feedback": [],
             "attachments": [{"url": "https://x/a.png", "content_type": "image/png", "name": "a.png"}]}
        ],
        "user_id": "u", "conversation_id": "c", "message_id": "m-2"
    }"#;

    let turn: ConversationTurn = serde_json::from_str(json).unwrap();
    let latest = turn.latest().unwrap();
    assert_eq!(latest.role, Role::User);
    assert_eq!(latest.attachments[0].name, "a.png");
    assert!(latest.attachments[0].is_image());
}

#[test]
fn test_message_defaults_content_type() {
    let message: Message = serde_json::from_str(r#"{"role": "bot", "content": "ok"}"#).unwrap();
    assert_eq!(message.content_type, "text/markdown");
    assert!(message.attachments.is_empty());
}

#[test]
fn test_image_chunk_is_not_text() {
    assert!(OutgoingChunk::image("image", "https://x/1.png").is_image());
    assert!(!OutgoingChunk::text("caption").is_image());
}
