//! Vybe analytics bot server
//!
//! Axum transport in front of the dialog engine. Each incoming text is
//! routed to the sender's session; the replies come back as JSON, with
//! chart images inlined as base64.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vybe_analytics::{ApiConfig, HttpDataProvider, VybeGateway};
use vybe_charts::QuickChartRenderer;
use vybe_core::{Dialog, DialogConfig};

use crate::handlers::{health_check, message_handler, message_stream_handler};
use crate::state::AppState;

/// Build the router for `state`
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/message", post(message_handler))
        .route("/api/message/stream", get(message_stream_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment before reading RUST_LOG
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let api_config = ApiConfig::from_env();
    if api_config.api_key.is_none() {
        tracing::warn!("⚠ VYBE_API_KEY not set - analytics calls will be rejected upstream");
    }
    tracing::info!("✓ Analytics API: {}", api_config.base_url);
    let provider = Arc::new(HttpDataProvider::new(api_config)?);

    let renderer = Arc::new(QuickChartRenderer::from_env()?);
    tracing::info!("✓ Chart service: {}", renderer.config().url);

    let gateway = Arc::new(VybeGateway::new(provider, renderer));
    let dialog_config = DialogConfig::from_env();
    tracing::info!(
        "✓ Message limit {} chars, charts in {}",
        dialog_config.message_limit,
        dialog_config.chart_dir.display()
    );
    let dialog = Dialog::builder().gateway(gateway).config(dialog_config).build()?;

    let app = app(AppState::new(dialog));

    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 vybe-bot server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health             - Health check");
    tracing::info!("  POST /api/message        - Send one message");
    tracing::info!("  GET  /api/message/stream - WebSocket conversation");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;

    Ok(())
}
