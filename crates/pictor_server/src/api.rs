//! HTTP API for one bot.

use crate::request::{QueryRequest, RequestKind};
use crate::response::{done_event, meta_event, text_event};
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header::AUTHORIZATION},
    response::{
        IntoResponse, Response,
        sse::{KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures_util::{StreamExt, stream};
use pictor_interface::BotBackend;
use pictor_pipeline::PromptPipeline;
use serde_json::{Value, json};
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, info, instrument, warn};

/// Chunks buffered between a running turn and its response stream.
pub const CHUNK_BUFFER: usize = 16;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct ApiState {
    pipeline: Arc<PromptPipeline<dyn BotBackend>>,
    access_key: Arc<str>,
}

impl ApiState {
    /// Create API state serving `pipeline` to callers presenting `access_key`.
    pub fn new(pipeline: PromptPipeline<dyn BotBackend>, access_key: impl Into<Arc<str>>) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            access_key: access_key.into(),
        }
    }

    fn authorized(&self, headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|key| key == &*self.access_key)
    }
}

/// Create the API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/", post(handle_request))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "bot": state.pipeline.profile().name(),
        })),
    )
}

/// Protocol endpoint; dispatches on the body's `type`.
#[instrument(skip_all)]
async fn handle_request(
    State(state): State<ApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    if !state.authorized(&headers) {
        warn!("Rejected request with a bad access key");
        return error_response(StatusCode::UNAUTHORIZED, "Invalid access key");
    }

    let body: Value = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &format!("Invalid JSON: {}", e)),
    };

    let Some(kind) = RequestKind::of(&body) else {
        let kind = body.get("type").cloned().unwrap_or(Value::Null);
        info!(%kind, "Unsupported request type");
        return error_response(StatusCode::NOT_IMPLEMENTED, "Unsupported request type");
    };
    debug!(%kind, "Request received");

    match kind {
        RequestKind::Query => match serde_json::from_value::<QueryRequest>(body) {
            Ok(request) => stream_query(&state, request),
            Err(e) => error_response(StatusCode::BAD_REQUEST, &format!("Invalid query: {}", e)),
        },
        RequestKind::Settings => Json(state.pipeline.settings()).into_response(),
        kind if kind.is_report() => {
            let message_id = body
                .get("message_id")
                .and_then(serde_json::Value::as_str)
                .unwrap_or_default();
            info!(%kind, message_id, "Report received");
            (StatusCode::OK, Json(json!({}))).into_response()
        }
        kind => {
            info!(%kind, "Unhandled request type");
            error_response(StatusCode::NOT_IMPLEMENTED, "Unsupported request type")
        }
    }
}

/// Run the turn in its own task and stream its chunks as they arrive.
fn stream_query(state: &ApiState, request: QueryRequest) -> Response {
    debug!(
        version = %request.version,
        conversation_id = %request.turn.conversation_id,
        "Query received"
    );
    let (tx, rx) = mpsc::channel(CHUNK_BUFFER);
    let pipeline = Arc::clone(&state.pipeline);

    tokio::spawn(async move {
        let outcome = pipeline.handle(request.turn, tx).await;
        debug!(success = outcome.is_success(), "Query finished");
    });

    let chunks = ReceiverStream::new(rx).map(|chunk| text_event(&chunk));
    let events = stream::once(async { meta_event() })
        .chain(chunks)
        .chain(stream::once(async { done_event() }))
        .map(Ok::<_, Infallible>);

    Sse::new(events)
        .keep_alive(KeepAlive::default())
        .into_response()
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
