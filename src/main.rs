//! Python tutor chat service
//!
//! A Rust backend hosting a single-page Python Q&A chatbot over the OpenAI
//! chat-completions API.

mod api;
mod conversation;
mod llm;
mod session;
mod system_prompt;

use api::{create_router, AppState};
use llm::{API_KEY_ENV_VAR, CompletionClient, LoggingClient, OpenAIClient};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pytutor=info,tower_http=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false),
        )
        .init();

    // Configuration
    let port: u16 = std::env::var("PYTUTOR_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);

    // The credential is read again on every completion call; this check only
    // surfaces a misconfiguration at startup.
    if std::env::var(API_KEY_ENV_VAR).is_err() {
        tracing::warn!("OPENAI_API_KEY is not set. Completion requests will fail until it is.");
    }

    let client: Arc<dyn CompletionClient> =
        Arc::new(LoggingClient::new(Arc::new(OpenAIClient::from_env())));

    // Create application state
    let state = AppState::new(client);

    // Create router
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state).layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Python tutor server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
