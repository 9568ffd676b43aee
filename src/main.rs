use std::sync::Arc;

use note_maker::{config, repository, server, service::NoteService};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    tracing::info!("Successfully loaded note maker config");

    // Repository creation and migration
    let repo = repository::connect(&cfg).await.unwrap_or_else(|e| {
        tracing::error!("Failed to set up note storage: {e}");
        panic!("failed to set up note storage: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(repo));
    let router = server::build_router(service);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", cfg.port))
        .await
        .expect("Failed to bind to address");
    let addr = listener.local_addr().expect("listener has no local address");

    tracing::info!("REST server starting, listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Failed to start server");

    tracing::info!("Server stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    tracing::info!("Shutdown signal received");
}
