//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::types::{
    ChatRequest, ChatResponse, ConversationView, ErrorResponse, ModelInfo, ModelsResponse,
    SettingsRequest,
};
use super::AppState;
use crate::conversation::Model;
use crate::session::{submit, SessionError, Submission};
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Root serves the page
        .route("/", get(serve_page))
        // Static assets
        .route("/assets/*path", get(serve_static))
        // Render source for the page
        .route("/api/conversation", get(get_conversation))
        // One full submit/reply cycle
        .route("/api/chat", post(post_chat))
        // New conversation
        .route("/api/reset", post(post_reset))
        // Model and temperature
        .route("/api/settings", post(post_settings))
        // Model picker data
        .route("/api/models", get(list_models))
        // Version
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Page
// ============================================================

/// Serve the embedded single page
async fn serve_page() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - UI not found</h1>".to_string()),
        )
            .into_response(),
    }
}

// ============================================================
// Conversation
// ============================================================

async fn get_conversation(State(state): State<AppState>) -> Json<ConversationView> {
    let guard = state.session.lock().await;
    Json(ConversationView::from_session(&guard))
}

async fn post_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    // The cycle runs on its own task so a disconnecting client cannot strand
    // the phase outside Idle.
    let cycle = tokio::spawn({
        let session = state.session.clone();
        let client = state.client.clone();
        async move { submit(&session, &client, &req.text).await }
    });

    let submission = cycle
        .await
        .map_err(|e| ApiError::Internal(format!("Completion task failed: {e}")))?
        .map_err(|e| match e {
            SessionError::Busy => ApiError::Busy,
        })?;

    let reply = match submission {
        Submission::Replied(text) => Some(text),
        Submission::Ignored => None,
    };

    let guard = state.session.lock().await;
    Ok(Json(ChatResponse {
        reply,
        conversation: ConversationView::from_session(&guard),
    }))
}

async fn post_reset(State(state): State<AppState>) -> Json<ConversationView> {
    let mut guard = state.session.lock().await;
    guard.conversation_mut().reset();
    Json(ConversationView::from_session(&guard))
}

async fn post_settings(
    State(state): State<AppState>,
    Json(req): Json<SettingsRequest>,
) -> Json<ConversationView> {
    let mut guard = state.session.lock().await;
    guard.conversation_mut().set_model(req.model);
    guard.conversation_mut().set_temperature(req.temperature);
    Json(ConversationView::from_session(&guard))
}

// ============================================================
// Model info
// ============================================================

async fn list_models() -> Json<ModelsResponse> {
    let models = Model::all()
        .iter()
        .map(|model| ModelInfo {
            id: model.api_name().to_string(),
            description: model.description().to_string(),
        })
        .collect();

    Json(ModelsResponse {
        models,
        default: Model::default().api_name().to_string(),
    })
}

// ============================================================
// Version
// ============================================================

async fn get_version() -> &'static str {
    concat!("pytutor ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum ApiError {
    Busy,
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Busy => (
                StatusCode::CONFLICT,
                "A request is already in flight".to_string(),
            ),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
