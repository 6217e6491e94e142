//! Casual Causality - let a language model explain causality
//!
//! An HTTP service that asks a chat completion endpoint what causes a
//! given effect, then keeps pressing it with follow-up questions. Each
//! effect string owns an independent in-memory conversation.

mod api;
mod config;
mod conversation;
mod llm;
mod registry;

use api::{create_router, AppState};
use config::{LlmConfig, DEFAULT_CONFIG_PATH};
use registry::TopicRegistry;
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "casual_causality=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    tracing::info!("Starting CASUAL CAUSALITY!!");

    // Configuration
    let config_path =
        std::env::var("CAUSALITY_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let port: u16 = std::env::var("CAUSALITY_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    tracing::info!(path = %config_path, "Using configuration file");
    let llm_config = LlmConfig::load_or_none(&config_path);
    let registry = TopicRegistry::new(llm::service_from_config(llm_config.as_ref()));

    if !registry.is_configured() {
        tracing::warn!(
            path = %config_path,
            "No usable LLM configuration. Every causes request will fail until the service is restarted with one."
        );
    }

    let state = AppState::new(registry);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Casual causality server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
