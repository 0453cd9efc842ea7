//! Site configuration: chat prompt, user-facing fallback messages and an
//! optional bank of extra practice questions, loaded from TOML.
//!
//! See `SiteConfig`, `Prompts` and `Messages` for the expected schema.

use std::{path::PathBuf, time::Duration};

use serde::Deserialize;
use tracing::{error, info};

use crate::chat::{DEFAULT_IDLE_TTL, DEFAULT_MAX_SESSIONS};
use crate::domain::Question;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct SiteConfig {
  #[serde(default)]
  pub prompts: Prompts,
  #[serde(default)]
  pub messages: Messages,
  /// Appended to the built-in question bank.
  #[serde(default)]
  pub questions: Vec<Question>,
}

/// Chat prompt template. `{bio}` receives the bullet list built from `bio`,
/// `{question}` the visitor's message.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Prompts {
  pub chat_template: String,
  pub bio: Vec<String>,
}

impl Default for Prompts {
  fn default() -> Self {
    Self {
      chat_template: "You are an AI assistant that provides information about Jyotiranjan Panda, a software developer with 2 years of experience in Java, Spring Boot, and Microservices.\nHere's some context about Jyotiranjan:\n{bio}\n\nCurrent user question: {question}\n\nPlease provide a helpful and concise response.".into(),
      bio: vec![
        "2 years of experience in Java, Spring Boot, and Microservices".into(),
        "Strong problem-solving skills and clean coding practices".into(),
        "Experience with modern web technologies".into(),
      ],
    }
  }
}

/// Fixed user-readable strings substituted on failure or shown on success.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Messages {
  pub chat_greeting: String,
  pub chat_failure: String,
  pub contact_success: String,
  pub contact_failure: String,
  pub topic_not_found: String,
  pub question_not_found: String,
  pub lesson_not_found: String,
  pub session_not_found: String,
}

impl Default for Messages {
  fn default() -> Self {
    Self {
      chat_greeting: "Hello! I can tell you about Jyotiranjan Panda. What would you like to know?".into(),
      chat_failure: "I'm having trouble connecting to the AI service. Please try again later.".into(),
      contact_success: "Message sent successfully! I'll get back to you soon.".into(),
      contact_failure: "Failed to send message. Please try again or contact me directly via email.".into(),
      topic_not_found: "Topic not found.".into(),
      question_not_found: "Question not found.".into(),
      lesson_not_found: "Lesson not found.".into(),
      session_not_found: "Chat session not found.".into(),
    }
  }
}

/// Process-level settings taken from the environment.
#[derive(Clone, Debug)]
pub struct Settings {
  pub port: u16,
  pub static_dir: PathBuf,
  pub progress_path: Option<PathBuf>,
  pub chat_max_sessions: usize,
  pub chat_idle_ttl: Duration,
}

impl Settings {
  pub fn from_env() -> Self {
    let port = std::env::var("PORT")
      .ok()
      .and_then(|p| p.parse::<u16>().ok())
      .unwrap_or(3000);
    let static_dir = std::env::var("STATIC_DIR")
      .map(PathBuf::from)
      .unwrap_or_else(|_| PathBuf::from("./static"));
    let progress_path = std::env::var("PROGRESS_PATH").ok().map(PathBuf::from);
    let chat_max_sessions = std::env::var("CHAT_MAX_SESSIONS")
      .ok()
      .and_then(|v| v.parse::<usize>().ok())
      .unwrap_or(DEFAULT_MAX_SESSIONS);
    let chat_idle_ttl = std::env::var("CHAT_IDLE_TTL_SECS")
      .ok()
      .and_then(|v| v.parse::<u64>().ok())
      .map(Duration::from_secs)
      .unwrap_or(DEFAULT_IDLE_TTL);
    Self { port, static_dir, progress_path, chat_max_sessions, chat_idle_ttl }
  }
}

/// Parse a TOML site config.
pub fn parse_site_config(s: &str) -> Result<SiteConfig, toml::de::Error> {
  toml::from_str::<SiteConfig>(s)
}

/// Attempt to load `SiteConfig` from SITE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_site_config_from_env() -> Option<SiteConfig> {
  let path = std::env::var("SITE_CONFIG_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_site_config(&s) {
      Ok(cfg) => {
        info!(target: "portfolio_backend", %path, extra_questions = cfg.questions.len(), "Loaded site config (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "portfolio_backend", %path, error = %e, "Failed to parse TOML config");
        None
      }
    },
    Err(e) => {
      error!(target: "portfolio_backend", %path, error = %e, "Failed to read TOML config file");
      None
    }
  }
}
