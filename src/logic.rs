//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Practice: question views, saved code, run / submit / reset, formatting
//!   - Lessons and topic pages
//!   - Chat forwarding with the fixed apology fallback
//!   - Contact forwarding with fixed success/failure messages

use tracing::{debug, error, info, instrument, warn};

use crate::chat::build_prompt;
use crate::domain::{ChatMessage, ContactForm, Question};
use crate::formatter::format_code;
use crate::grader::{self, RunOutcome};
use crate::progress::ProgressKey;
use crate::protocol::*;
use crate::state::AppState;

fn find_question<'a>(state: &'a AppState, topic_id: &str, question_id: &str) -> Result<&'a Question, ApiError> {
  state
    .catalog
    .question_by_segment(topic_id, question_id)
    .ok_or_else(|| ApiError::NotFound(state.messages.question_not_found.clone()))
}

#[instrument(level = "info", skip(state))]
pub fn topic_detail(state: &AppState, topic_id: &str) -> Result<TopicDetailOut, ApiError> {
  let topic = state
    .catalog
    .topic(topic_id)
    .ok_or_else(|| ApiError::NotFound(state.messages.topic_not_found.clone()))?;
  Ok(TopicDetailOut {
    topic: topic.clone(),
    theory: state.catalog.theory(topic_id).cloned(),
    questions: state.catalog.questions_for(topic_id).iter().map(QuestionSummary::from).collect(),
  })
}

/// Code shown for a question: the client's saved text, else the starter code.
async fn current_code(state: &AppState, client: &str, q: &Question) -> CodeOut {
  let key = ProgressKey::new(&q.topic_id, q.id);
  let storage_key = key.storage_key();
  match state.progress.load(client, &key).await {
    Some(code) => CodeOut { storage_key, code, saved: true },
    None => CodeOut { storage_key, code: q.starter_code.clone(), saved: false },
  }
}

#[instrument(level = "info", skip(state))]
pub async fn view_question(state: &AppState, client: &str, topic_id: &str, question_id: &str) -> Result<QuestionViewOut, ApiError> {
  let q = find_question(state, topic_id, question_id)?;
  let neighbours = state
    .catalog
    .neighbours(&q.topic_id, q.id)
    .ok_or_else(|| ApiError::NotFound(state.messages.question_not_found.clone()))?;
  let code = current_code(state, client, q).await;
  debug!(target: "practice", topic = %q.topic_id, id = q.id, saved = code.saved, "Question viewed");
  Ok(QuestionViewOut { question: QuestionOut::from(q), neighbours, code })
}

#[instrument(level = "info", skip(state, code), fields(code_len = code.len()))]
pub async fn save_code(state: &AppState, client: &str, topic_id: &str, question_id: &str, code: String) -> Result<CodeOut, ApiError> {
  let q = find_question(state, topic_id, question_id)?;
  let key = ProgressKey::new(&q.topic_id, q.id);
  let storage_key = key.storage_key();
  state.progress.save(client, key, code.clone()).await;
  Ok(CodeOut { storage_key, code, saved: true })
}

#[instrument(level = "info", skip(state))]
pub async fn reset_code(state: &AppState, client: &str, topic_id: &str, question_id: &str) -> Result<CodeOut, ApiError> {
  let q = find_question(state, topic_id, question_id)?;
  let key = ProgressKey::new(&q.topic_id, q.id);
  let removed = state.progress.reset(client, &key).await;
  debug!(target: "practice", key = %key, removed, "Saved code reset");
  Ok(CodeOut { storage_key: key.storage_key(), code: q.starter_code.clone(), saved: false })
}

fn to_run_out(outcome: RunOutcome, saved_as: Option<String>) -> RunOut {
  match outcome {
    RunOutcome::Empty => RunOut { ran: false, report: None, saved_as },
    RunOutcome::Ran(report) => RunOut { ran: true, report: Some(report), saved_as },
  }
}

#[instrument(level = "info", skip(state, code), fields(code_len = code.len()))]
pub fn run_code(state: &AppState, topic_id: &str, question_id: &str, code: &str) -> Result<RunOut, ApiError> {
  let q = find_question(state, topic_id, question_id)?;
  let outcome = grader::run(code, &q.test_cases);
  if let RunOutcome::Ran(r) = &outcome {
    info!(target: "practice", topic = %q.topic_id, id = q.id, cases = r.cases.len(), all_passed = r.all_passed, "Code checked");
  }
  Ok(to_run_out(outcome, None))
}

/// Save, then run, as the editor's submit button does.
#[instrument(level = "info", skip(state, code), fields(code_len = code.len()))]
pub async fn submit_code(state: &AppState, client: &str, topic_id: &str, question_id: &str, code: String) -> Result<RunOut, ApiError> {
  let saved = save_code(state, client, topic_id, question_id, code).await?;
  let q = find_question(state, topic_id, question_id)?;
  let outcome = grader::run(&saved.code, &q.test_cases);
  Ok(to_run_out(outcome, Some(saved.storage_key)))
}

pub fn format(code: &str) -> FormatOut {
  FormatOut { code: format_code(code) }
}

#[instrument(level = "info", skip(state))]
pub fn lesson_detail(state: &AppState, lesson_id: &str) -> Result<LessonDetailOut, ApiError> {
  let lesson = state
    .catalog
    .lesson(lesson_id)
    .ok_or_else(|| ApiError::NotFound(state.messages.lesson_not_found.clone()))?;
  Ok(LessonDetailOut { lesson: lesson.clone(), content: lesson.content.clone() })
}

/// Append the visitor's message, forward it once, append the reply or the
/// fixed apology. Earlier history is never touched.
#[instrument(level = "info", skip(state, text), fields(text_len = text.len()))]
pub async fn chat_reply(state: &AppState, session_id: Option<&str>, text: &str) -> Result<ChatOut, ApiError> {
  if text.trim().is_empty() {
    return Err(ApiError::BadRequest("Message is empty.".into()));
  }

  let session_id = match session_id {
    Some(id) => id.to_string(),
    None => state.chats.create(&state.messages.chat_greeting).await.id,
  };

  // Nothing is forwarded unless the visitor's message made it into the transcript.
  if !state.chats.append(&session_id, ChatMessage::user(text)).await {
    return Err(ApiError::NotFound(state.messages.session_not_found.clone()));
  }

  let prompt = build_prompt(&state.prompts, text);
  let (reply, fallback) = match &state.genai {
    Some(g) => match g.generate(&prompt).await {
      Ok(t) => (ChatMessage::assistant(t), false),
      Err(e) => {
        error!(target: "chat", session = %session_id, error = %e, "Chat forward failed; using apology.");
        (ChatMessage::assistant(&state.messages.chat_failure), true)
      }
    },
    None => {
      warn!(target: "chat", session = %session_id, "No chat client configured; using apology.");
      (ChatMessage::assistant(&state.messages.chat_failure), true)
    }
  };

  // The session may have been dropped while the call was in flight.
  if !state.chats.append(&session_id, reply.clone()).await {
    return Err(ApiError::NotFound(state.messages.session_not_found.clone()));
  }
  let messages = state.chats.get(&session_id).await.map(|s| s.messages).unwrap_or_default();
  let open_sessions = state.chats.len().await;
  debug!(target: "chat", session = %session_id, history = messages.len(), open_sessions, fallback, "Chat reply appended");
  Ok(ChatOut { session_id, reply, fallback, messages })
}

fn validate_contact(form: &ContactForm) -> Result<(), ApiError> {
  let fields = [("name", &form.name), ("email", &form.email), ("subject", &form.subject), ("message", &form.message)];
  if let Some((name, _)) = fields.iter().find(|(_, v)| v.trim().is_empty()) {
    return Err(ApiError::BadRequest(format!("Field '{}' is required.", name)));
  }
  if !form.email.contains('@') {
    return Err(ApiError::BadRequest("Please enter a valid email address.".into()));
  }
  Ok(())
}

/// Forward the form once. The form is cleared only on success.
#[instrument(level = "info", skip(state, form), fields(message_len = form.message.len()))]
pub async fn send_contact(state: &AppState, form: ContactForm) -> Result<ContactOut, ApiError> {
  validate_contact(&form)?;

  let result = match &state.mailer {
    Some(m) => m.send(&form).await,
    None => Err(anyhow::anyhow!("contact relay not configured")),
  };

  Ok(match result {
    Ok(()) => {
      info!(target: "contact", "Contact form delivered");
      ContactOut { status: ContactStatus::Success, message: state.messages.contact_success.clone(), form: ContactForm::default() }
    }
    Err(e) => {
      error!(target: "contact", error = %e, "Contact form delivery failed");
      ContactOut { status: ContactStatus::Error, message: state.messages.contact_failure.clone(), form }
    }
  })
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
  };

  use serde_json::{json, Value};

  use super::*;
  use crate::chat::{ChatStore, DEFAULT_IDLE_TTL};
  use crate::domain::ChatRole;
  use crate::genai::GenAi;
  use crate::grader::ALL_PASSED;
  use crate::mailer::Mailer;

  async fn serve(app: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}")
  }

  /// Local generateContent endpoint answering `reply`, counting calls.
  async fn gemini_stub(reply: &'static str, calls: Arc<AtomicUsize>) -> String {
    let app = axum::Router::new().fallback(move || {
      let calls = calls.clone();
      async move {
        calls.fetch_add(1, Ordering::SeqCst);
        axum::Json(json!({ "candidates": [{ "content": { "parts": [{ "text": reply }] } }] }))
      }
    });
    serve(app).await
  }

  /// Local email relay answering "OK" and keeping the last request body.
  async fn relay_stub(seen: Arc<Mutex<Option<Value>>>) -> String {
    let app = axum::Router::new().route(
      "/api/v1.0/email/send",
      axum::routing::post(move |axum::Json(body): axum::Json<Value>| {
        let seen = seen.clone();
        async move {
          *seen.lock().unwrap() = Some(body);
          "OK"
        }
      }),
    );
    serve(app).await
  }

  fn assert_send<T: Send>(_: &T) {}

  fn form() -> ContactForm {
    ContactForm {
      name: "Ada".into(),
      email: "ada@example.com".into(),
      subject: "Hello".into(),
      message: "Nice site".into(),
    }
  }

  #[tokio::test]
  async fn view_falls_back_to_starter_code_until_saved() {
    let state = AppState::offline();
    let v = view_question(&state, "c1", "java-fundamentals", "1").await.unwrap();
    assert!(!v.code.saved);
    assert_eq!(v.code.storage_key, "code_java-fundamentals_1");
    assert_eq!(v.code.code, v.question.starter_code);

    save_code(&state, "c1", "java-fundamentals", "1", "mine".into()).await.unwrap();
    let v = view_question(&state, "c1", "java-fundamentals", "1").await.unwrap();
    assert!(v.code.saved);
    assert_eq!(v.code.code, "mine");

    let other = view_question(&state, "c1", "java-fundamentals", "2").await.unwrap();
    assert!(!other.code.saved);
  }

  #[tokio::test]
  async fn reset_restores_starter_code() {
    let state = AppState::offline();
    save_code(&state, "c1", "strings", "1", "draft".into()).await.unwrap();
    let out = reset_code(&state, "c1", "strings", "1").await.unwrap();
    assert!(!out.saved);
    let v = view_question(&state, "c1", "strings", "1").await.unwrap();
    assert_eq!(v.code.code, out.code);
  }

  #[tokio::test]
  async fn unknown_question_is_not_found() {
    let state = AppState::offline();
    let err = view_question(&state, "c1", "java-fundamentals", "404").await.unwrap_err();
    assert_eq!(err, ApiError::NotFound("Question not found.".into()));
    assert!(run_code(&state, "nope", "1", "x").is_err());
    assert!(matches!(topic_detail(&state, "nope"), Err(ApiError::NotFound(_))));
  }

  #[tokio::test]
  async fn hidden_cases_are_not_exposed_but_are_graded() {
    let state = AppState::offline();
    let v = view_question(&state, "c1", "java-fundamentals", "2").await.unwrap();
    assert_eq!(v.question.examples.len(), 1);
    let out = run_code(&state, "java-fundamentals", "2", "System.out.println(a + b);").unwrap();
    assert_eq!(out.report.unwrap().cases.len(), 2);
  }

  #[tokio::test]
  async fn submit_saves_then_runs() {
    let state = AppState::offline();
    let code = "public class Main { public static void main(String[] a) { System.out.println(\"Hello, World!\"); } }";
    let out = submit_code(&state, "c1", "java-fundamentals", "1", code.into()).await.unwrap();
    assert_eq!(out.saved_as.as_deref(), Some("code_java-fundamentals_1"));
    let report = out.report.unwrap();
    assert!(report.all_passed);
    assert!(report.output.ends_with(ALL_PASSED));
    let key = ProgressKey::new("java-fundamentals", 1);
    assert_eq!(state.progress.load("c1", &key).await.as_deref(), Some(code));
  }

  #[test]
  fn blank_run_does_nothing() {
    let state = AppState::offline();
    let out = run_code(&state, "java-fundamentals", "1", "  ").unwrap();
    assert!(!out.ran);
    assert!(out.report.is_none());
  }

  #[tokio::test]
  async fn chat_without_client_appends_apology_and_keeps_history() {
    let state = AppState::offline();
    let first = chat_reply(&state, None, "Who are you?").await.unwrap();
    assert!(first.fallback);
    assert_eq!(first.reply.content, state.messages.chat_failure);
    assert_eq!(first.messages.len(), 3);

    let second = chat_reply(&state, Some(first.session_id.as_str()), "Still there?").await.unwrap();
    let contents: Vec<_> = second.messages.iter().map(|m| m.content.as_str()).collect();
    assert_eq!(
      contents,
      vec![
        state.messages.chat_greeting.as_str(),
        "Who are you?",
        state.messages.chat_failure.as_str(),
        "Still there?",
        state.messages.chat_failure.as_str(),
      ]
    );
    assert_eq!(second.messages[3].role, ChatRole::User);
  }

  #[tokio::test]
  async fn chat_network_failure_falls_back() {
    let mut state = AppState::offline();
    state.genai = Some(GenAi::new("key", "http://127.0.0.1:9", "gemini-test").unwrap());
    let out = chat_reply(&state, None, "Tell me about your projects").await.unwrap();
    assert!(out.fallback);
    assert_eq!(out.messages[1].content, "Tell me about your projects");
    assert_eq!(out.messages.last().unwrap().content, state.messages.chat_failure);
  }

  #[tokio::test]
  async fn blank_chat_and_unknown_session_are_rejected() {
    let state = AppState::offline();
    assert!(matches!(chat_reply(&state, None, "   ").await, Err(ApiError::BadRequest(_))));
    assert_eq!(state.chats.len().await, 0);
    assert!(matches!(chat_reply(&state, Some("missing"), "hi").await, Err(ApiError::NotFound(_))));
  }

  #[tokio::test]
  async fn contact_failure_keeps_the_form() {
    let mut state = AppState::offline();
    state.mailer = Some(Mailer::new("http://127.0.0.1:9", "s", "t", "k").unwrap());
    let out = send_contact(&state, form()).await.unwrap();
    assert_eq!(out.status, ContactStatus::Error);
    assert_eq!(out.message, state.messages.contact_failure);
    assert_eq!(out.form, form());
  }

  #[tokio::test]
  async fn contact_without_relay_reports_failure() {
    let state = AppState::offline();
    let out = send_contact(&state, form()).await.unwrap();
    assert_eq!(out.status, ContactStatus::Error);
    assert_eq!(out.form, form());
  }

  #[tokio::test]
  async fn contact_validation_runs_before_sending() {
    let state = AppState::offline();
    let mut missing = form();
    missing.subject = " ".into();
    assert_eq!(
      send_contact(&state, missing).await.unwrap_err(),
      ApiError::BadRequest("Field 'subject' is required.".into())
    );
    let mut bad_email = form();
    bad_email.email = "ada.example.com".into();
    assert!(matches!(send_contact(&state, bad_email).await, Err(ApiError::BadRequest(_))));
  }

  #[test]
  fn shared_operations_are_send() {
    let state = AppState::offline();
    assert_send(&chat_reply(&state, None, "hi"));
    assert_send(&send_contact(&state, form()));
    assert_send(&view_question(&state, "c1", "java-fundamentals", "1"));
    assert_send(&submit_code(&state, "c1", "java-fundamentals", "1", String::new()));
    assert_send(&reset_code(&state, "c1", "java-fundamentals", "1"));
  }

  #[tokio::test]
  async fn chat_reply_is_appended_verbatim() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = gemini_stub(" I build Spring Boot services.\n", calls.clone()).await;
    let mut state = AppState::offline();
    state.genai = Some(GenAi::new("key", base, "gemini-test").unwrap());

    let out = chat_reply(&state, None, "What do you work on?").await.unwrap();
    assert!(!out.fallback);
    assert_eq!(out.reply.role, ChatRole::Assistant);
    assert_eq!(out.reply.content, " I build Spring Boot services.\n");
    assert_eq!(out.messages.len(), 3);
    assert_eq!(out.messages[2].content, out.reply.content);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn missing_session_is_never_forwarded() {
    let calls = Arc::new(AtomicUsize::new(0));
    let base = gemini_stub("unused", calls.clone()).await;
    let mut state = AppState::offline();
    state.genai = Some(GenAi::new("key", base, "gemini-test").unwrap());

    let session = state.chats.create("hello").await;
    state.chats.remove(&session.id).await;
    let err = chat_reply(&state, Some(session.id.as_str()), "anyone?").await.unwrap_err();
    assert_eq!(err, ApiError::NotFound(state.messages.session_not_found.clone()));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
  }

  #[tokio::test]
  async fn sessionless_chats_stay_within_the_cap() {
    let mut state = AppState::offline();
    state.chats = ChatStore::new(3, DEFAULT_IDLE_TTL);
    for i in 0..6 {
      chat_reply(&state, None, &format!("hello {i}")).await.unwrap();
    }
    assert_eq!(state.chats.len().await, 3);
  }

  #[tokio::test]
  async fn relayed_contact_succeeds_and_clears_the_form() {
    let seen = Arc::new(Mutex::new(None));
    let base = relay_stub(seen.clone()).await;
    let mut state = AppState::offline();
    state.mailer = Some(Mailer::new(base, "svc", "tpl", "pk").unwrap());

    let out = send_contact(&state, form()).await.unwrap();
    assert_eq!(out.status, ContactStatus::Success);
    assert_eq!(out.message, state.messages.contact_success);
    assert_eq!(out.form, ContactForm::default());

    let body = seen.lock().unwrap().clone().unwrap();
    assert_eq!(body["service_id"], "svc");
    assert_eq!(body["user_id"], "pk");
    assert_eq!(body["template_params"]["name"], "Ada");
    assert_eq!(body["template_params"]["message"], "Nice site");
  }

  #[test]
  fn lesson_detail_includes_content() {
    let state = AppState::offline();
    let d = lesson_detail(&state, "oops-basics").unwrap();
    assert_eq!(d.content.unwrap().practice_questions.len(), 3);
    let soon = lesson_detail(&state, "annotations").unwrap();
    assert!(soon.content.is_none());
  }
}
