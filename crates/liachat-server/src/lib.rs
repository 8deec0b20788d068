//! HTTP backend for the LiaAI chat core
//!
//! A thin axum service exposing one shared chat session over `/api/*`. The
//! session is driven by the simulated response engine; pointing a
//! `liachat_api::HttpSource` at this service gives the full remote path the
//! same observable behavior as the local simulator.

pub mod routes;

use anyhow::{Context, Result};
use axum::Router;
use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use liachat_engine::SimulatedSource;
use liachat_session::{ChatClient, DEFAULT_REPLY_TIMEOUT};

pub use routes::{create_router, AppState};

/// Server configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub reply_timeout: Duration,
    /// Optional artificial latency on simulated replies.
    pub simulated_latency: Option<Duration>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8000)),
            reply_timeout: DEFAULT_REPLY_TIMEOUT,
            simulated_latency: None,
        }
    }
}

impl ServerConfig {
    /// Read `LIA_BIND_ADDR`, `LIA_REPLY_TIMEOUT_SECS` and
    /// `LIA_SIM_LATENCY_MS`, with defaults for anything unset.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(addr) = env::var("LIA_BIND_ADDR") {
            config.bind_addr = addr
                .parse()
                .with_context(|| format!("invalid LIA_BIND_ADDR: {addr}"))?;
        }
        if let Ok(secs) = env::var("LIA_REPLY_TIMEOUT_SECS") {
            let secs: u64 = secs
                .parse()
                .with_context(|| format!("invalid LIA_REPLY_TIMEOUT_SECS: {secs}"))?;
            config.reply_timeout = Duration::from_secs(secs);
        }
        if let Ok(ms) = env::var("LIA_SIM_LATENCY_MS") {
            let ms: u64 = ms
                .parse()
                .with_context(|| format!("invalid LIA_SIM_LATENCY_MS: {ms}"))?;
            config.simulated_latency = Some(Duration::from_millis(ms));
        }

        Ok(config)
    }
}

/// Assemble the application: simulated engine, session driver, routes,
/// CORS and request tracing.
pub fn build_app(config: &ServerConfig) -> Router {
    let mut source = SimulatedSource::new();
    if let Some(latency) = config.simulated_latency {
        source = source.with_latency(latency);
    }

    let chat = ChatClient::new(Arc::new(source)).with_reply_timeout(config.reply_timeout);

    // Permissive CORS for development, matching the UI's expectations.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    create_router(AppState { chat })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind and run until shutdown.
pub async fn serve(config: ServerConfig) -> Result<()> {
    let app = build_app(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;
    axum::serve(listener, app).await.context("serving requests")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        build_app(&ServerConfig::default())
    }

    async fn request(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        let request = match body {
            Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_chat_round_trip() {
        let app = test_app();
        let (status, body) = request(
            &app,
            "POST",
            "/api/chat",
            Some(json!({ "message": "show running processes" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kind"], "osquery");
        assert!(body["response"]
            .as_str()
            .unwrap()
            .contains("🔍 Query:"));
    }

    #[tokio::test]
    async fn test_blank_message_is_ignored() {
        let app = test_app();
        let (status, body) =
            request(&app, "POST", "/api/chat", Some(json!({ "message": "   " }))).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["response"].is_null());
        assert_eq!(body["ignored"], "empty input");
    }

    #[tokio::test]
    async fn test_messages_filter_keeps_user_context() {
        let app = test_app();
        request(
            &app,
            "POST",
            "/api/chat",
            Some(json!({ "message": "show running processes" })),
        )
        .await;

        let (status, body) = request(&app, "GET", "/api/messages?filter=osquery", None).await;
        assert_eq!(status, StatusCode::OK);

        let kinds: Vec<&str> = body["messages"]
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, vec!["user", "osquery"]);
    }

    #[tokio::test]
    async fn test_unknown_filter_is_a_bad_request() {
        let app = test_app();
        let (status, body) = request(&app, "GET", "/api/messages?filter=bogus", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("bogus"));
    }

    #[tokio::test]
    async fn test_clear_resets_the_log() {
        let app = test_app();
        request(&app, "POST", "/api/chat", Some(json!({ "message": "hi" }))).await;

        let (status, body) = request(&app, "POST", "/api/clear", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, body) = request(&app, "GET", "/api/messages", None).await;
        let messages = body["messages"].as_array().unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["kind"], "system");
    }

    #[tokio::test]
    async fn test_export_names_the_file_after_session_start() {
        let app = test_app();
        let (status, body) = request(&app, "GET", "/api/export", None).await;
        assert_eq!(status, StatusCode::OK);

        let filename = body["filename"].as_str().unwrap();
        assert!(filename.starts_with("liaai-chat-"));
        assert!(filename.ends_with(".txt"));
        assert!(body["text"].as_str().unwrap().contains("] SYSTEM: "));
    }

    #[tokio::test]
    async fn test_status_reports_vitals() {
        let app = test_app();
        let (status, body) = request(&app, "GET", "/api/status", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["session"]["message_count"], 1);
        assert_eq!(body["session"]["awaiting_reply"], false);
    }
}
