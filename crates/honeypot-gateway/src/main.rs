//! Honeypot Gateway - HTTP entry point

use std::sync::Arc;

use clap::Parser;
use honeypot_context::{EngagementEngine, InMemoryConversationStore};
use honeypot_gateway::{build_routes, metrics, ApiKey, AppState, GatewayConfig, GATEWAY_VERSION};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = GatewayConfig::parse();
    config.validate()?;

    init_tracing(config.log_json);
    tracing::info!("Starting Honeypot Gateway v{}", GATEWAY_VERSION);
    metrics::init_metrics();

    let store = Arc::new(InMemoryConversationStore::new());
    let state = AppState::new(EngagementEngine::new(store), ApiKey::new(config.api_key));

    let app = build_routes(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Gateway stopped");
    Ok(())
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("honeypot_gateway=debug,honeypot_context=debug,tower_http=debug")
    });
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
