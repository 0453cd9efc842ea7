//! Application state: content catalog, progress and chat stores, prompts,
//! fixed messages and the optional outbound clients.
//!
//! Passed to every handler as `Arc<AppState>`; nothing lives in globals.

use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::catalog::Catalog;
use crate::chat::ChatStore;
use crate::config::{load_site_config_from_env, Messages, Prompts, Settings};
use crate::genai::GenAi;
use crate::mailer::Mailer;
use crate::progress::ProgressStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub progress: ProgressStore,
    pub chats: ChatStore,
    pub prompts: Prompts,
    pub messages: Messages,
    pub genai: Option<GenAi>,
    pub mailer: Option<Mailer>,
}

impl AppState {
    /// Build state from env: load config, merge question bank, open the
    /// progress store, init outbound clients.
    #[instrument(level = "info", skip_all)]
    pub async fn from_env(settings: &Settings) -> Self {
        let cfg = load_site_config_from_env().unwrap_or_default();

        let catalog = Catalog::with_extra_questions(cfg.questions);
        for level in [
            crate::domain::Level::Beginner,
            crate::domain::Level::Intermediate,
            crate::domain::Level::Advanced,
            crate::domain::Level::Expert,
        ] {
            let topics = catalog.topics_by_level(level);
            let questions: usize = topics.iter().map(|t| catalog.questions_for(&t.id).len()).sum();
            info!(target: "practice", ?level, topics = topics.len(), questions, "Startup content inventory");
        }
        info!(target: "practice", total_questions = catalog.question_count(), lessons = catalog.lessons().len(), "Catalog ready");

        let progress = match &settings.progress_path {
            Some(path) => ProgressStore::with_snapshot(path).await,
            None => {
                warn!(target: "practice", "PROGRESS_PATH not set; saved code is kept in memory only");
                ProgressStore::in_memory()
            }
        };

        let genai = GenAi::from_env();
        if let Some(g) = &genai {
            info!(target: "portfolio_backend", base_url = %g.base_url, model = %g.model, "Chat assistant enabled.");
        } else {
            info!(target: "portfolio_backend", "Chat assistant disabled (no GEMINI_API_KEY). Replies fall back to the apology message.");
        }

        let mailer = Mailer::from_env();
        if let Some(m) = &mailer {
            info!(target: "portfolio_backend", base_url = %m.base_url, service = %m.service_id, "Contact relay enabled.");
        } else {
            info!(target: "portfolio_backend", "Contact relay disabled (EMAILJS_* not set). Submissions will report failure.");
        }

        Self {
            catalog: Arc::new(catalog),
            progress,
            chats: ChatStore::new(settings.chat_max_sessions, settings.chat_idle_ttl),
            prompts: cfg.prompts,
            messages: cfg.messages,
            genai,
            mailer,
        }
    }

    /// Built-in content, in-memory stores and no outbound clients.
    #[cfg(test)]
    pub fn offline() -> Self {
        Self {
            catalog: Arc::new(Catalog::builtin()),
            progress: ProgressStore::in_memory(),
            chats: ChatStore::default(),
            prompts: Prompts::default(),
            messages: Messages::default(),
            genai: None,
            mailer: None,
        }
    }
}
