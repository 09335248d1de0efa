//! Serving a configured bot.

use crate::api::{ApiState, create_router};
use crate::config::ServerConfig;
use pictor_backend::PoeClient;
use pictor_error::{PictorResult, ServerError, ServerErrorKind};
use pictor_interface::BotBackend;
use pictor_pipeline::PromptPipeline;
use std::sync::Arc;
use tracing::{info, instrument};

/// Serve the configured bot until interrupted.
///
/// # Errors
///
/// Returns an error when the bot profile is invalid or the listen address
/// cannot be bound.
#[instrument(skip_all, fields(bot = %config.bot(), bind = %config.bind()))]
pub async fn serve(config: ServerConfig) -> PictorResult<()> {
    let profile = config.bot_kind()?.profile()?;
    let backend: Arc<dyn BotBackend> = Arc::new(PoeClient::new(config.backend_config()));
    let state = ApiState::new(PromptPipeline::new(profile, backend), config.key());
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(config.bind())
        .await
        .map_err(|e| {
            ServerError::new(ServerErrorKind::Bind {
                addr: config.bind().clone(),
                reason: e.to_string(),
            })
        })?;
    info!("Bot server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::new(ServerErrorKind::Serve(e.to_string())))?;

    info!("Bot server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
