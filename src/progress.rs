//! Saved editor code per client and per (topic, question).
//!
//! Each client id stands in for one browser's local storage. Values are
//! plain strings, last write wins. When a snapshot path is configured the
//! whole store is rewritten to JSON after every change.

use std::{
  collections::HashMap,
  fmt,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, instrument};

pub const KEY_PREFIX: &str = "code_";
pub const DEFAULT_CLIENT: &str = "anonymous";

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProgressKey {
  pub topic_id: String,
  pub question_id: u32,
}

impl ProgressKey {
  pub fn new(topic_id: impl Into<String>, question_id: u32) -> Self {
    Self { topic_id: topic_id.into(), question_id }
  }

  /// The flat key the browser used: prefix + topic + question.
  pub fn storage_key(&self) -> String {
    format!("{}{}_{}", KEY_PREFIX, self.topic_id, self.question_id)
  }
}

impl fmt::Display for ProgressKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.storage_key())
  }
}

/// On-disk shape: client -> list of entries.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
  clients: HashMap<String, Vec<SnapshotEntry>>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotEntry {
  topic_id: String,
  question_id: u32,
  code: String,
}

type ClientSlots = HashMap<ProgressKey, String>;

#[derive(Clone, Default)]
pub struct ProgressStore {
  inner: Arc<RwLock<HashMap<String, ClientSlots>>>,
  snapshot_path: Option<PathBuf>,
  // Held from taking the snapshot until the rename lands, so writes reach disk in order.
  persist_lock: Arc<Mutex<()>>,
}

impl ProgressStore {
  /// In-memory store, nothing survives a restart.
  pub fn in_memory() -> Self {
    Self::default()
  }

  /// Store backed by a JSON snapshot. A missing file starts empty; an
  /// unreadable one is logged and ignored.
  pub async fn with_snapshot(path: impl Into<PathBuf>) -> Self {
    let path = path.into();
    let data = match read_snapshot(&path).await {
      Ok(Some(data)) => {
        info!(target: "practice", path = %path.display(), clients = data.len(), "Loaded progress snapshot");
        data
      }
      Ok(None) => HashMap::new(),
      Err(e) => {
        error!(target: "practice", path = %path.display(), error = %e, "Failed to load progress snapshot; starting empty");
        HashMap::new()
      }
    };
    Self {
      inner: Arc::new(RwLock::new(data)),
      snapshot_path: Some(path),
      persist_lock: Arc::default(),
    }
  }

  #[instrument(level = "debug", skip(self), fields(key = %key))]
  pub async fn load(&self, client: &str, key: &ProgressKey) -> Option<String> {
    let inner = self.inner.read().await;
    inner.get(client).and_then(|slots| slots.get(key)).cloned()
  }

  #[instrument(level = "debug", skip(self, code), fields(key = %key, code_len = code.len()))]
  pub async fn save(&self, client: &str, key: ProgressKey, code: String) {
    {
      let mut inner = self.inner.write().await;
      inner.entry(client.to_string()).or_default().insert(key, code);
    }
    self.persist().await;
  }

  /// Delete the saved code. Returns whether anything was stored.
  #[instrument(level = "debug", skip(self), fields(key = %key))]
  pub async fn reset(&self, client: &str, key: &ProgressKey) -> bool {
    let removed = {
      let mut inner = self.inner.write().await;
      let removed = inner.get_mut(client).map(|slots| slots.remove(key).is_some()).unwrap_or(false);
      if inner.get(client).is_some_and(HashMap::is_empty) {
        inner.remove(client);
      }
      removed
    };
    if removed {
      self.persist().await;
    }
    removed
  }

  /// Flat storage keys saved by one client, sorted.
  pub async fn saved_keys(&self, client: &str) -> Vec<String> {
    let inner = self.inner.read().await;
    let mut keys: Vec<String> = inner
      .get(client)
      .map(|slots| slots.keys().map(ProgressKey::storage_key).collect())
      .unwrap_or_default();
    keys.sort();
    keys
  }

  async fn persist(&self) {
    let Some(path) = &self.snapshot_path else { return };
    let _writing = self.persist_lock.lock().await;
    let snapshot = {
      let inner = self.inner.read().await;
      to_snapshot(&inner)
    };
    match write_snapshot(path, &snapshot).await {
      Ok(()) => debug!(target: "practice", path = %path.display(), "Progress snapshot written"),
      Err(e) => error!(target: "practice", path = %path.display(), error = %e, "Failed to write progress snapshot"),
    }
  }
}

fn to_snapshot(data: &HashMap<String, ClientSlots>) -> Snapshot {
  let clients = data
    .iter()
    .map(|(client, slots)| {
      let entries = slots
        .iter()
        .map(|(k, code)| SnapshotEntry { topic_id: k.topic_id.clone(), question_id: k.question_id, code: code.clone() })
        .collect();
      (client.clone(), entries)
    })
    .collect();
  Snapshot { clients }
}

async fn read_snapshot(path: &Path) -> anyhow::Result<Option<HashMap<String, ClientSlots>>> {
  let raw = match tokio::fs::read_to_string(path).await {
    Ok(raw) => raw,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e).context("reading progress snapshot"),
  };
  let snapshot: Snapshot = serde_json::from_str(&raw).context("parsing progress snapshot")?;
  let data = snapshot
    .clients
    .into_iter()
    .map(|(client, entries)| {
      let slots = entries
        .into_iter()
        .map(|e| (ProgressKey::new(e.topic_id, e.question_id), e.code))
        .collect();
      (client, slots)
    })
    .collect();
  Ok(Some(data))
}

async fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
  let json = serde_json::to_vec_pretty(snapshot).context("serializing progress snapshot")?;
  let tmp = path.with_extension("json.tmp");
  tokio::fs::write(&tmp, json).await.with_context(|| format!("writing {}", tmp.display()))?;
  tokio::fs::rename(&tmp, path).await.with_context(|| format!("renaming onto {}", path.display()))?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn storage_key_uses_prefix_and_both_ids() {
    assert_eq!(ProgressKey::new("arrays", 3).storage_key(), "code_arrays_3");
  }

  #[tokio::test]
  async fn save_then_load_and_reset() {
    let store = ProgressStore::in_memory();
    let key = ProgressKey::new("strings", 1);
    assert_eq!(store.load("c1", &key).await, None);

    store.save("c1", key.clone(), "v1".into()).await;
    store.save("c1", key.clone(), "v2".into()).await;
    assert_eq!(store.load("c1", &key).await.as_deref(), Some("v2"));

    assert!(store.reset("c1", &key).await);
    assert!(!store.reset("c1", &key).await);
    assert_eq!(store.load("c1", &key).await, None);
  }

  #[tokio::test]
  async fn keys_do_not_collide_across_pairs_or_clients() {
    let store = ProgressStore::in_memory();
    store.save("c1", ProgressKey::new("topicA", 1), "A1".into()).await;

    assert_eq!(store.load("c1", &ProgressKey::new("topicA", 2)).await, None);
    assert_eq!(store.load("c1", &ProgressKey::new("topicB", 1)).await, None);
    assert_eq!(store.load("c2", &ProgressKey::new("topicA", 1)).await, None);

    // Topic ids may contain the separator; the structured key keeps them apart.
    store.save("c1", ProgressKey::new("a_1", 2), "x".into()).await;
    assert_eq!(store.load("c1", &ProgressKey::new("a", 12)).await, None);
    assert_eq!(store.saved_keys("c1").await, vec!["code_a_1_2", "code_topicA_1"]);
  }

  #[tokio::test]
  async fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");

    let store = ProgressStore::with_snapshot(&path).await;
    store.save("browser-1", ProgressKey::new("arrays", 2), "int[] a;".into()).await;
    store.save("browser-1", ProgressKey::new("arrays", 1), "gone".into()).await;
    store.reset("browser-1", &ProgressKey::new("arrays", 1)).await;

    let reopened = ProgressStore::with_snapshot(&path).await;
    assert_eq!(reopened.load("browser-1", &ProgressKey::new("arrays", 2)).await.as_deref(), Some("int[] a;"));
    assert_eq!(reopened.load("browser-1", &ProgressKey::new("arrays", 1)).await, None);
  }

  #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
  async fn concurrent_saves_all_reach_the_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    let store = ProgressStore::with_snapshot(&path).await;

    let tasks: Vec<_> = (0..32u32)
      .map(|i| {
        let store = store.clone();
        tokio::spawn(async move {
          store.save("browser-1", ProgressKey::new("arrays", i), format!("draft {i}")).await;
        })
      })
      .collect();
    for t in tasks {
      t.await.unwrap();
    }

    let reopened = ProgressStore::with_snapshot(&path).await;
    assert_eq!(reopened.saved_keys("browser-1").await.len(), 32);
    assert_eq!(reopened.load("browser-1", &ProgressKey::new("arrays", 17)).await.as_deref(), Some("draft 17"));
    assert!(!path.with_extension("json.tmp").exists());
  }

  #[tokio::test]
  async fn corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("progress.json");
    std::fs::write(&path, "{not json").unwrap();

    let store = ProgressStore::with_snapshot(&path).await;
    assert!(store.saved_keys("anyone").await.is_empty());
  }
}
