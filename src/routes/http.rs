//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;
use axum::{
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
  Json,
};
use tracing::{info, instrument};

use crate::domain::ContactForm;
use crate::logic::*;
use crate::progress::DEFAULT_CLIENT;
use crate::protocol::*;
use crate::state::AppState;
use crate::util::non_blank;

pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Client namespace for saved code; one per browser.
pub fn client_id(headers: &HeaderMap) -> String {
  non_blank(headers.get(CLIENT_ID_HEADER).and_then(|v| v.to_str().ok()))
    .unwrap_or(DEFAULT_CLIENT)
    .to_string()
}

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

//
// Portfolio
//

#[instrument(level = "info", skip(state))]
pub async fn http_get_profile(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.profile().clone())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_projects(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.projects().to_vec())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_skills(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.skills().to_vec())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_roadmap(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.roadmap().to_vec())
}

//
// Practice
//

#[instrument(level = "info", skip(state), fields(level = ?q.level))]
pub async fn http_get_topics(
  State(state): State<Arc<AppState>>,
  Query(q): Query<TopicsQuery>,
) -> impl IntoResponse {
  let catalog = &state.catalog;
  let topics: Vec<TopicOut> = catalog
    .topics()
    .iter()
    .filter(|t| q.level.map_or(true, |l| t.level == l))
    .map(|t| TopicOut { topic: t.clone(), question_count: catalog.questions_for(&t.id).len() })
    .collect();
  Json(topics)
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_topic(
  State(state): State<Arc<AppState>>,
  Path(topic_id): Path<String>,
) -> Result<Json<TopicDetailOut>, ApiError> {
  topic_detail(&state, &topic_id).map(Json)
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_question(
  State(state): State<Arc<AppState>>,
  Path((topic_id, question_id)): Path<(String, String)>,
  headers: HeaderMap,
) -> Result<Json<QuestionViewOut>, ApiError> {
  let client = client_id(&headers);
  view_question(&state, &client, &topic_id, &question_id).await.map(Json)
}

#[instrument(level = "info", skip(state, headers, body), fields(code_len = body.code.len()))]
pub async fn http_put_code(
  State(state): State<Arc<AppState>>,
  Path((topic_id, question_id)): Path<(String, String)>,
  headers: HeaderMap,
  Json(body): Json<CodeIn>,
) -> Result<Json<CodeOut>, ApiError> {
  let client = client_id(&headers);
  let out = save_code(&state, &client, &topic_id, &question_id, body.code).await?;
  info!(target: "practice", key = %out.storage_key, "HTTP code saved");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_delete_code(
  State(state): State<Arc<AppState>>,
  Path((topic_id, question_id)): Path<(String, String)>,
  headers: HeaderMap,
) -> Result<Json<CodeOut>, ApiError> {
  let client = client_id(&headers);
  reset_code(&state, &client, &topic_id, &question_id).await.map(Json)
}

#[instrument(level = "info", skip(state, body), fields(code_len = body.code.len()))]
pub async fn http_post_run(
  State(state): State<Arc<AppState>>,
  Path((topic_id, question_id)): Path<(String, String)>,
  Json(body): Json<CodeIn>,
) -> Result<Json<RunOut>, ApiError> {
  run_code(&state, &topic_id, &question_id, &body.code).map(Json)
}

#[instrument(level = "info", skip(state, headers, body), fields(code_len = body.code.len()))]
pub async fn http_post_submit(
  State(state): State<Arc<AppState>>,
  Path((topic_id, question_id)): Path<(String, String)>,
  headers: HeaderMap,
  Json(body): Json<CodeIn>,
) -> Result<Json<RunOut>, ApiError> {
  let client = client_id(&headers);
  let out = submit_code(&state, &client, &topic_id, &question_id, body.code).await?;
  info!(target: "practice", %topic_id, %question_id, ran = out.ran, all_passed = ?out.report.as_ref().map(|r| r.all_passed), "HTTP submit evaluated");
  Ok(Json(out))
}

#[instrument(level = "info", skip(state, headers))]
pub async fn http_get_progress(State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
  let client = client_id(&headers);
  let saved_keys = state.progress.saved_keys(&client).await;
  Json(ProgressOut { client_id: client, saved_keys })
}

#[instrument(level = "info", skip(body), fields(code_len = body.code.len()))]
pub async fn http_post_format(Json(body): Json<FormatIn>) -> impl IntoResponse {
  Json(format(&body.code))
}

//
// Lessons
//

#[instrument(level = "info", skip(state))]
pub async fn http_get_lessons(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  Json(state.catalog.lessons().to_vec())
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_lesson(
  State(state): State<Arc<AppState>>,
  Path(lesson_id): Path<String>,
) -> Result<Json<LessonDetailOut>, ApiError> {
  lesson_detail(&state, &lesson_id).map(Json)
}

//
// Chat
//

#[instrument(level = "info", skip(state))]
pub async fn http_post_session(State(state): State<Arc<AppState>>) -> impl IntoResponse {
  let s = state.chats.create(&state.messages.chat_greeting).await;
  (StatusCode::CREATED, Json(SessionOut { id: s.id, messages: s.messages }))
}

#[instrument(level = "info", skip(state))]
pub async fn http_get_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<Json<SessionOut>, ApiError> {
  state
    .chats
    .get(&id)
    .await
    .map(|s| Json(SessionOut { id: s.id, messages: s.messages }))
    .ok_or_else(|| ApiError::NotFound(state.messages.session_not_found.clone()))
}

#[instrument(level = "info", skip(state))]
pub async fn http_delete_session(
  State(state): State<Arc<AppState>>,
  Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
  if state.chats.remove(&id).await {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(state.messages.session_not_found.clone()))
  }
}

#[instrument(level = "info", skip(state, body), fields(text_len = body.text.len()))]
pub async fn http_post_chat_message(
  State(state): State<Arc<AppState>>,
  Json(body): Json<ChatIn>,
) -> Result<Json<ChatOut>, ApiError> {
  let out = chat_reply(&state, body.session_id.as_deref(), &body.text).await?;
  info!(target: "chat", session = %out.session_id, fallback = out.fallback, "HTTP chat reply served");
  Ok(Json(out))
}

//
// Contact
//

#[instrument(level = "info", skip(state, form))]
pub async fn http_post_contact(
  State(state): State<Arc<AppState>>,
  Json(form): Json<ContactForm>,
) -> Result<Json<ContactOut>, ApiError> {
  let out = send_contact(&state, form).await?;
  info!(target: "contact", status = ?out.status, "HTTP contact handled");
  Ok(Json(out))
}
