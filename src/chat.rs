//! Chat transcripts. Each session is an append-only list of messages that
//! lives until the session is dropped (the "page reload"), goes idle past
//! the TTL, or is evicted as the least recently active one when the store
//! is full.

use std::{
  collections::HashMap,
  sync::Arc,
  time::{Duration, Instant},
};

use tokio::sync::RwLock;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::config::Prompts;
use crate::domain::ChatMessage;
use crate::util::fill_template;

pub const DEFAULT_MAX_SESSIONS: usize = 1000;
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Clone, Debug)]
pub struct ChatSession {
  pub id: String,
  pub messages: Vec<ChatMessage>,
}

struct Slot {
  session: ChatSession,
  last_active: Instant,
}

impl Slot {
  fn expired(&self, ttl: Duration) -> bool {
    self.last_active.elapsed() >= ttl
  }
}

#[derive(Clone)]
pub struct ChatStore {
  sessions: Arc<RwLock<HashMap<String, Slot>>>,
  max_sessions: usize,
  idle_ttl: Duration,
}

impl Default for ChatStore {
  fn default() -> Self {
    Self::new(DEFAULT_MAX_SESSIONS, DEFAULT_IDLE_TTL)
  }
}

impl ChatStore {
  pub fn new(max_sessions: usize, idle_ttl: Duration) -> Self {
    Self {
      sessions: Arc::default(),
      max_sessions: max_sessions.max(1),
      idle_ttl,
    }
  }

  /// Open a session seeded with the assistant greeting. Idle sessions are
  /// swept first; if the store is still full the least recently active one goes.
  #[instrument(level = "debug", skip(self, greeting))]
  pub async fn create(&self, greeting: &str) -> ChatSession {
    let session = ChatSession {
      id: Uuid::new_v4().to_string(),
      messages: vec![ChatMessage::assistant(greeting)],
    };

    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, slot| !slot.expired(self.idle_ttl));
    let expired = before - sessions.len();

    let mut evicted = 0usize;
    while sessions.len() >= self.max_sessions {
      let oldest = sessions
        .iter()
        .min_by_key(|(_, slot)| slot.last_active)
        .map(|(id, _)| id.clone());
      match oldest {
        Some(id) => {
          sessions.remove(&id);
          evicted += 1;
        }
        None => break,
      }
    }

    sessions.insert(session.id.clone(), Slot { session: session.clone(), last_active: Instant::now() });
    debug!(target: "chat", id = %session.id, open = sessions.len(), expired, evicted, "Chat session opened");
    session
  }

  pub async fn get(&self, id: &str) -> Option<ChatSession> {
    let sessions = self.sessions.read().await;
    sessions
      .get(id)
      .filter(|slot| !slot.expired(self.idle_ttl))
      .map(|slot| slot.session.clone())
  }

  /// Append to a live session and mark it active. Returns false if the
  /// session is gone or has gone idle.
  pub async fn append(&self, id: &str, message: ChatMessage) -> bool {
    let mut sessions = self.sessions.write().await;
    let Some(slot) = sessions.get_mut(id) else { return false };
    if slot.expired(self.idle_ttl) {
      sessions.remove(id);
      return false;
    }
    slot.session.messages.push(message);
    slot.last_active = Instant::now();
    true
  }

  pub async fn remove(&self, id: &str) -> bool {
    self.sessions.write().await.remove(id).is_some()
  }

  /// Live (non-idle) sessions.
  pub async fn len(&self) -> usize {
    let sessions = self.sessions.read().await;
    sessions.values().filter(|slot| !slot.expired(self.idle_ttl)).count()
  }
}

/// Embed the visitor's question and the biography bullets into the template.
pub fn build_prompt(prompts: &Prompts, question: &str) -> String {
  let bio = prompts
    .bio
    .iter()
    .map(|line| format!("- {}", line))
    .collect::<Vec<_>>()
    .join("\n");
  fill_template(&prompts.chat_template, &[("bio", bio.as_str()), ("question", question)])
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::ChatRole;

  #[test]
  fn prompt_contains_bio_and_question() {
    let prompt = build_prompt(&Prompts::default(), "What does he work on?");
    assert!(prompt.contains("- Strong problem-solving skills and clean coding practices"));
    assert!(prompt.contains("Current user question: What does he work on?"));
    assert!(!prompt.contains("{bio}"));
  }

  #[tokio::test]
  async fn sessions_start_with_greeting_and_append_in_order() {
    let store = ChatStore::default();
    let s = store.create("hello").await;
    assert_eq!(s.messages.len(), 1);
    assert_eq!(s.messages[0].role, ChatRole::Assistant);

    assert!(store.append(&s.id, ChatMessage::user("q")).await);
    assert!(store.append(&s.id, ChatMessage::assistant("a")).await);
    let contents: Vec<_> = store.get(&s.id).await.unwrap().messages.into_iter().map(|m| m.content).collect();
    assert_eq!(contents, vec!["hello", "q", "a"]);
  }

  #[tokio::test]
  async fn removed_sessions_are_gone() {
    let store = ChatStore::default();
    let s = store.create("hello").await;
    assert!(store.remove(&s.id).await);
    assert!(store.get(&s.id).await.is_none());
    assert!(!store.append(&s.id, ChatMessage::user("late")).await);
    assert_eq!(store.len().await, 0);
  }

  #[tokio::test]
  async fn full_store_evicts_least_recently_active() {
    let store = ChatStore::new(2, DEFAULT_IDLE_TTL);
    let a = store.create("hello").await;
    std::thread::sleep(Duration::from_millis(2));
    let b = store.create("hello").await;
    std::thread::sleep(Duration::from_millis(2));
    assert!(store.append(&a.id, ChatMessage::user("still here")).await);
    std::thread::sleep(Duration::from_millis(2));

    let c = store.create("hello").await;
    assert_eq!(store.len().await, 2);
    assert!(store.get(&a.id).await.is_some());
    assert!(store.get(&b.id).await.is_none());
    assert!(store.get(&c.id).await.is_some());
  }

  #[tokio::test]
  async fn idle_sessions_expire() {
    let store = ChatStore::new(10, Duration::from_millis(20));
    let s = store.create("hello").await;
    std::thread::sleep(Duration::from_millis(40));
    assert!(store.get(&s.id).await.is_none());
    assert!(!store.append(&s.id, ChatMessage::user("late")).await);
    assert_eq!(store.len().await, 0);
  }
}
