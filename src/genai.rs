//! Minimal Gemini client for the portfolio chat.
//!
//! One call only: `models/{model}:generateContent` with a single user turn,
//! returning plain text. Calls log model name, latency and response size,
//! never the prompt or the key. No retries.

use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-flash-latest";

#[derive(Clone)]
pub struct GenAi {
  pub client: reqwest::Client,
  pub api_key: String,
  pub base_url: String,
  pub model: String,
}

impl GenAi {
  /// Construct the client if we find GEMINI_API_KEY; otherwise return None.
  pub fn from_env() -> Option<Self> {
    let api_key = std::env::var("GEMINI_API_KEY").ok()?;
    let base_url = std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());
    let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
    Self::new(api_key, base_url, model).ok()
  }

  pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, model: impl Into<String>) -> anyhow::Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(20))
      .build()
      .context("building HTTP client")?;
    Ok(Self {
      client,
      api_key: api_key.into(),
      base_url: base_url.into().trim_end_matches('/').to_string(),
      model: model.into(),
    })
  }

  #[instrument(level = "info", skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
  pub async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
    let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
    let req = GenerateRequest {
      contents: vec![Content { role: "user".into(), parts: vec![Part { text: prompt.into() }] }],
    };

    let start = Instant::now();
    let res = self.client.post(&url)
      .header(USER_AGENT, "portfolio-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .header("x-goog-api-key", &self.api_key)
      .json(&req).send().await.context("sending generateContent request")?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      let msg = extract_api_error(&body).unwrap_or(body);
      bail!("Gemini HTTP {}: {}", status, msg);
    }

    let body: GenerateResponse = res.json().await.context("decoding generateContent response")?;
    if let Some(usage) = &body.usage_metadata {
      info!(prompt_tokens = ?usage.prompt_token_count, completion_tokens = ?usage.candidates_token_count, total_tokens = ?usage.total_token_count, "Gemini usage");
    }
    let text = first_candidate_text(&body).ok_or_else(|| anyhow!("Gemini returned no candidates"))?;
    info!(elapsed = ?start.elapsed(), reply_len = text.len(), "Gemini reply received");
    Ok(text)
  }
}

/// Text parts of the first candidate, concatenated as returned.
fn first_candidate_text(body: &GenerateResponse) -> Option<String> {
  let parts = &body.candidates.first()?.content.as_ref()?.parts;
  Some(parts.iter().filter_map(|p| p.text.as_deref()).collect())
}

// --- Wire DTOs ---

#[derive(Serialize)]
struct GenerateRequest {
  contents: Vec<Content>,
}
#[derive(Serialize)]
struct Content { role: String, parts: Vec<Part> }
#[derive(Serialize)]
struct Part { text: String }

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
  #[serde(default)] candidates: Vec<Candidate>,
  #[serde(default)] usage_metadata: Option<UsageMetadata>,
}
#[derive(Deserialize)]
struct Candidate { #[serde(default)] content: Option<CandidateContent> }
#[derive(Deserialize)]
struct CandidateContent { #[serde(default)] parts: Vec<PartResp> }
#[derive(Deserialize)]
struct PartResp { #[serde(default)] text: Option<String> }
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
  #[serde(default)] prompt_token_count: Option<u32>,
  #[serde(default)] candidates_token_count: Option<u32>,
  #[serde(default)] total_token_count: Option<u32>,
}

/// Try to extract a clean error message from a Google API error body.
fn extract_api_error(body: &str) -> Option<String> {
  #[derive(Deserialize)]
  struct EWrap { error: EObj }
  #[derive(Deserialize)]
  struct EObj { message: String }
  serde_json::from_str::<EWrap>(body).ok().map(|w| w.error.message)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn candidate_parts_are_joined_verbatim() {
    let body: GenerateResponse = serde_json::from_str(
      r#"{"candidates":[{"content":{"parts":[{"text":" Hi "},{"text":"there\n"}]}}],
          "usageMetadata":{"promptTokenCount":3,"totalTokenCount":5}}"#,
    ).unwrap();
    assert_eq!(first_candidate_text(&body).as_deref(), Some(" Hi there\n"));
  }

  #[test]
  fn blank_completion_is_still_a_reply() {
    let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[{"content":{"parts":[{"text":"  "}]}}]}"#).unwrap();
    assert_eq!(first_candidate_text(&body).as_deref(), Some("  "));
  }

  #[test]
  fn empty_candidates_yield_nothing() {
    let body: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
    assert!(first_candidate_text(&body).is_none());
  }

  #[test]
  fn api_error_message_is_extracted() {
    let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
    assert_eq!(extract_api_error(body).as_deref(), Some("API key not valid."));
    assert!(extract_api_error("<html>").is_none());
  }

  #[tokio::test]
  async fn unreachable_endpoint_is_an_error() {
    let client = GenAi::new("k", "http://127.0.0.1:9", "m").unwrap();
    assert!(client.generate("hi").await.is_err());
  }
}
