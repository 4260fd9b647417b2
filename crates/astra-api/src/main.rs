//! astra-api - HTTP API server for the Astra vision API

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use astra_api::{build_router, services::InMemoryHistory, AppState, ServerConfig};
use astra_inference::{InferenceGateway, LlamaBackend, LlamaConfig, VisionBackend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "astra_api=debug,astra_inference=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "astra_api=debug,astra_inference=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("astra-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        // Console-only output
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ServerConfig::from_env();
    let llama_config = LlamaConfig::from_env();
    if llama_config.api_key.is_none() {
        warn!(
            "LLAMA_API_KEY is not set; analysis requests will return fallback text until it is configured"
        );
    }

    let backend = Arc::new(LlamaBackend::new(llama_config)?);

    // Check the upstream once in the background; startup never waits on it.
    {
        let backend = backend.clone();
        tokio::spawn(async move {
            match backend.health_check().await {
                Ok(true) => info!(model = backend.model_name(), "Llama API reachable"),
                Ok(false) | Err(_) => warn!(
                    model = backend.model_name(),
                    "Llama API health check failed; requests will use fallback text if it stays down"
                ),
            }
        });
    }

    let history = Arc::new(InMemoryHistory::new(config.history_max_entries));
    let state = AppState::new(InferenceGateway::new(backend), history);

    info!(
        max_body_bytes = config.max_body_bytes,
        history_max_entries = config.history_max_entries,
        cors = if config.cors_allowed_origins.is_some() {
            "allow-list"
        } else {
            "any origin"
        },
        "Server configuration loaded"
    );

    let app = build_router(state, &config);

    // Start server
    let addr: SocketAddr = config.bind_addr().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}
