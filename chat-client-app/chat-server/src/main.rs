use std::sync::Arc;

use chat_api::{build_router, view::PageRenderer, AppState};
use chat_core::{repositories::SessionRepository, services::ChatService};
use chat_infrastructure::{build_responder, spawn_sweeper, InMemorySessionStore};
use chat_shared::AppConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env
    dotenvy::dotenv().ok();

    // Initialize telemetry
    chat_shared::telemetry::init_telemetry();

    info!("Chat server starting...");

    // Load configuration
    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    info!("Environment: {}", config.app.env);

    // Answer backend; a missing credential stops startup here
    let responder = match build_responder(&config.llm) {
        Ok(r) => r,
        Err(e) => {
            error!("Failed to configure answer backend: {}", e);
            std::process::exit(1);
        }
    };

    // Session store + expiry sweeper
    let store: Arc<dyn SessionRepository> = Arc::new(InMemorySessionStore::new(config.session.clone()));
    let sweeper = spawn_sweeper(Arc::clone(&store), config.session.sweep_interval());

    // Create App State
    let chat = ChatService::new(store, responder);
    let pages = PageRenderer::new()?;
    let state = AppState::new(Arc::new(chat), Arc::new(pages));

    // Build router
    let app = build_router(state);

    // Bind address
    let addr = config.bind_address();
    info!("Listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweeper.abort();
    info!("Chat server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
