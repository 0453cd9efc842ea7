//! Portfolio · Java Practice Backend
//!
//! - Axum HTTP + WebSocket API for the portfolio and the Java practice area
//! - Optional Gemini chat assistant and EmailJS contact relay (via env)
//! - Static SPA fallback (STATIC_DIR/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 3000)
//!   STATIC_DIR          : built frontend (default ./static)
//!   SITE_CONFIG_PATH    : TOML with prompts, messages and extra questions
//!   PROGRESS_PATH       : JSON snapshot for saved code (in-memory if unset)
//!   CHAT_MAX_SESSIONS   : open chat sessions kept before evicting the oldest (default 1000)
//!   CHAT_IDLE_TTL_SECS  : idle chat sessions expire after this (default 1800)
//!   GEMINI_API_KEY      : enables the chat assistant if present
//!   GEMINI_BASE_URL     : default "https://generativelanguage.googleapis.com/v1beta"
//!   GEMINI_MODEL        : default "gemini-flash-latest"
//!   EMAILJS_SERVICE_ID, EMAILJS_TEMPLATE_ID, EMAILJS_PUBLIC_KEY : enable the contact relay
//!   EMAILJS_BASE_URL    : default "https://api.emailjs.com"
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod config;
mod seeds;
mod catalog;
mod grader;
mod formatter;
mod progress;
mod chat;
mod genai;
mod mailer;
mod state;
mod protocol;
mod logic;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Settings;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  let settings = Settings::from_env();

  // Shared application state (content tables, stores, outbound clients).
  let state = Arc::new(AppState::from_env(&settings).await);

  let app = build_router(state, &settings.static_dir);

  let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
  let listener = TcpListener::bind(addr).await?;
  info!(target: "portfolio_backend", %addr, static_dir = %settings.static_dir.display(), "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "portfolio_backend", error = %e, "Failed to listen for shutdown signal");
    return;
  }
  info!(target: "portfolio_backend", "Shutdown signal received");
}
