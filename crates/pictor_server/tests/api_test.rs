//! Router tests for the bot protocol endpoint.

mod test_utils;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pictor_interface::BotBackend;
use pictor_pipeline::{APOLOGY, BotKind, PromptPipeline};
use pictor_server::{ApiState, create_router};
use serde_json::{Value, json};
use std::sync::Arc;
use test_utils::{ScriptedBackend, TEST_KEY, parse_events, post, post_with_key};
use tower::ServiceExt;

fn app(kind: BotKind, backend: Arc<ScriptedBackend>) -> anyhow::Result<Router> {
    let backend: Arc<dyn BotBackend> = backend;
    let pipeline = PromptPipeline::new(kind.profile()?, backend);
    Ok(create_router(ApiState::new(pipeline, TEST_KEY)))
}

async fn body_text(response: axum::response::Response) -> anyhow::Result<String> {
    let bytes = response.into_body().collect().await?.to_bytes();
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn query(content: &str) -> Value {
    json!({
        "version": "1.1",
        "type": "query",
        "query": [{"role": "user", "content": content, "content_type": "text/markdown"}],
        "user_id": "u-1",
        "conversation_id": "c-1",
        "message_id": "m-1",
        "metadata": ""
    })
}

#[tokio::test]
async fn test_health_check() -> anyhow::Result<()> {
    let app = app(BotKind::CartoonAvatar, Arc::new(ScriptedBackend::default()))?;

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty())?)
        .await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(body, json!({"status": "ok", "bot": "cartoon-avatar"}));
    Ok(())
}

#[tokio::test]
async fn test_missing_or_wrong_key_is_unauthorized() -> anyhow::Result<()> {
    let backend = Arc::new(ScriptedBackend::default());
    let app = app(BotKind::CartoonAvatar, Arc::clone(&backend))?;

    let response = app
        .clone()
        .oneshot(post_with_key(&query("hi"), None))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(post_with_key(&query("hi"), Some("not-the-key")))
        .await?;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    assert!(backend.called_bots().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_settings_lists_dependencies() -> anyhow::Result<()> {
    let app = app(BotKind::ChildrenStoryCreator, Arc::new(ScriptedBackend::default()))?;

    let response = app.oneshot(post(&json!({"version": "1.1", "type": "settings"}))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_text(response).await?)?;
    assert_eq!(
        body["server_bot_dependencies"],
        json!({"Gemini-2.5-Pro-Preview": 1, "Imagen-3-Fast": 4})
    );
    Ok(())
}

#[tokio::test]
async fn test_query_streams_meta_text_done() -> anyhow::Result<()> {
    let backend = Arc::new(
        ScriptedBackend::default()
            .with_text("RekaFlash", "```json\n\"image_prompt\": \"a red fox\"\n```")
            .with_text("Playground-v2.5", "![image](https://cdn.test/fox.png)"),
    );
    let app = app(BotKind::CartoonAvatar, Arc::clone(&backend))?;

    let response = app.oneshot(post(&query("my fox"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()["content-type"]
            .to_str()?
            .starts_with("text/event-stream")
    );

    let events = parse_events(&body_text(response).await?);
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["meta", "text", "done"]);
    assert_eq!(events[0].1["content_type"], "text/markdown");
    assert_eq!(events[1].1["text"], "![image](https://cdn.test/fox.png)");
    assert_eq!(events[2].1, json!({}));

    assert_eq!(backend.called_bots(), vec!["RekaFlash", "Playground-v2.5"]);
    Ok(())
}

#[tokio::test]
async fn test_backend_failure_streams_apology() -> anyhow::Result<()> {
    let app = app(BotKind::CartoonAvatar, Arc::new(ScriptedBackend::default()))?;

    let response = app.oneshot(post(&query("my fox"))).await?;

    assert_eq!(response.status(), StatusCode::OK);
    let events = parse_events(&body_text(response).await?);
    let names: Vec<&str> = events.iter().map(|(name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["meta", "text", "done"]);
    assert_eq!(events[1].1["text"], APOLOGY);
    Ok(())
}

#[tokio::test]
async fn test_reports_are_acknowledged() -> anyhow::Result<()> {
    let app = app(BotKind::CartoonAvatar, Arc::new(ScriptedBackend::default()))?;

    for kind in ["report_feedback", "report_error", "report_reaction"] {
        let response = app
            .clone()
            .oneshot(post(&json!({"version": "1.1", "type": kind, "message_id": "m-1"})))
            .await?;
        assert_eq!(response.status(), StatusCode::OK, "{}", kind);
        let body: Value = serde_json::from_str(&body_text(response).await?)?;
        assert_eq!(body, json!({}));
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_type_is_not_implemented() -> anyhow::Result<()> {
    let app = app(BotKind::CartoonAvatar, Arc::new(ScriptedBackend::default()))?;

    let response = app
        .oneshot(post(&json!({"version": "1.1", "type": "subscribe"})))
        .await?;

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    Ok(())
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() -> anyhow::Result<()> {
    let app = app(BotKind::CartoonAvatar, Arc::new(ScriptedBackend::default()))?;

    let response = app
        .clone()
        .oneshot(post(&json!({"version": "1.1", "type": "query"})))
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("authorization", format!("Bearer {}", TEST_KEY))
        .body(Body::from("{not json"))?;
    let response = app.oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    Ok(())
}
