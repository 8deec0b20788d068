use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use liachat_session::{ChatClient, SendOutcome};
use liachat_types::{MessageKind, SessionFilter};

/// Application state shared across routes
#[derive(Clone)]
pub struct AppState {
    pub chat: ChatClient,
}

/// Create router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/messages", get(messages))
        .route("/api/clear", post(clear))
        .route("/api/export", get(export))
        .route("/api/status", get(status))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<MessageKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MessagesQuery {
    pub filter: Option<String>,
}

/// POST /api/chat - run one exchange through the session
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatResponse> {
    match state.chat.send(&req.message).await {
        SendOutcome::Replied(message) => Json(ChatResponse {
            response: Some(message.content),
            kind: Some(message.kind),
            ignored: None,
        }),
        SendOutcome::Rejected(reason) => Json(ChatResponse {
            response: None,
            kind: None,
            ignored: Some(reason.to_string()),
        }),
        SendOutcome::Superseded => Json(ChatResponse {
            response: None,
            kind: None,
            ignored: Some("superseded by clear".to_string()),
        }),
    }
}

/// GET /api/messages - session log, optionally filtered by kind
async fn messages(
    State(state): State<AppState>,
    Query(params): Query<MessagesQuery>,
) -> Result<Json<serde_json::Value>, AppError> {
    let filter = match params.filter.as_deref() {
        Some(raw) => raw
            .parse::<SessionFilter>()
            .map_err(|e| AppError::BadRequest(e.to_string()))?,
        None => SessionFilter::All,
    };

    let messages = state.chat.filtered(filter).await;
    Ok(Json(json!({ "messages": messages })))
}

/// POST /api/clear - reset the session to a fresh seed message
async fn clear(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.chat.clear().await;
    Json(json!({ "success": true }))
}

/// GET /api/export - plain-text rendering plus suggested file name
async fn export(State(state): State<AppState>) -> Json<serde_json::Value> {
    let (filename, text) = state.chat.export().await;
    Json(json!({ "filename": filename, "text": text }))
}

/// GET /api/status - session vitals
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    let status = state.chat.status().await;
    Json(json!({ "session": status }))
}

/// Route-level error, rendered as a JSON body with a matching status code.
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
        }
    }
}
