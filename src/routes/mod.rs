//! Router assembly: HTTP endpoints, WebSocket upgrade, static files, CORS, and HTTP tracing.

use std::{path::Path, sync::Arc};

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::state::AppState;

pub mod http;
pub mod ws;

/// Build the application router with:
/// - WebSocket at `/ws`
/// - REST-ish API under `/api/v1/...`
/// - Static SPA from `static_dir` with index fallback
/// - CORS (allow any origin/method/headers)
/// - HTTP trace layer (per-request spans w/ method, path, status, latency)
pub fn build_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    // Static files with SPA fallback
    let static_service = ServeDir::new(static_dir)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(static_dir.join("index.html")));

    let practice_question = "/api/v1/practice/topics/:topic/questions/:question";

    Router::new()
        // WebSocket
        .route("/ws", get(ws::ws_upgrade))
        // Portfolio
        .route("/api/v1/health", get(http::http_health))
        .route("/api/v1/profile", get(http::http_get_profile))
        .route("/api/v1/projects", get(http::http_get_projects))
        .route("/api/v1/skills", get(http::http_get_skills))
        .route("/api/v1/roadmap", get(http::http_get_roadmap))
        // Practice
        .route("/api/v1/practice/topics", get(http::http_get_topics))
        .route("/api/v1/practice/topics/:topic", get(http::http_get_topic))
        .route(practice_question, get(http::http_get_question))
        .route(
            &format!("{practice_question}/code"),
            put(http::http_put_code).delete(http::http_delete_code),
        )
        .route(&format!("{practice_question}/run"), post(http::http_post_run))
        .route(&format!("{practice_question}/submit"), post(http::http_post_submit))
        .route("/api/v1/practice/format", post(http::http_post_format))
        .route("/api/v1/practice/progress", get(http::http_get_progress))
        // Lessons
        .route("/api/v1/lessons", get(http::http_get_lessons))
        .route("/api/v1/lessons/:lesson", get(http::http_get_lesson))
        // Chat
        .route("/api/v1/chat/sessions", post(http::http_post_session))
        .route(
            "/api/v1/chat/sessions/:id",
            get(http::http_get_session).delete(http::http_delete_session),
        )
        .route("/api/v1/chat/message", post(http::http_post_chat_message))
        // Contact
        .route("/api/v1/contact", post(http::http_post_contact))
        // State + CORS + HTTP tracing
        .with_state(state)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Frontend fallback
        .fallback_service(static_service)
}
