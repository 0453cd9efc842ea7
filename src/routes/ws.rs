//! WebSocket upgrade + message loop. Each client message is parsed as JSON and
//! forwarded to core logic. We reply with a single JSON message per request.

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  http::HeaderMap,
  response::IntoResponse,
};
use tracing::{info, error, instrument, debug};

use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::logic::*;
use crate::state::AppState;
use super::http::client_id;

#[instrument(level = "info", skip(state, headers))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>, headers: HeaderMap) -> impl IntoResponse {
  let client = client_id(&headers);
  info!(target: "portfolio_backend", %client, "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state, client))
}

#[instrument(level = "info", skip(socket, state))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>, client: String) {
  info!(target: "portfolio_backend", "WebSocket connected");
  while let Some(Ok(msg)) = socket.recv().await {
    match msg {
      Message::Text(txt) => {
        // Parse, dispatch, serialize response.
        let reply_msg = match serde_json::from_str::<ClientWsMessage>(&txt) {
          Ok(incoming) => {
            debug!(target: "portfolio_backend", len = txt.len(), "WS message received");
            handle_client_ws(incoming, &state, &client).await
          }
          Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
        };

        let out = serde_json::to_string(&reply_msg).unwrap_or_else(|e| {
          serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
        });

        if let Err(e) = socket.send(Message::Text(out)).await {
          error!(target: "portfolio_backend", error = %e, "WS send error");
          break;
        }
      }
      Message::Ping(payload) => { let _ = socket.send(Message::Pong(payload)).await; }
      Message::Close(_) => break,
      _ => {}
    }
  }
  info!(target: "portfolio_backend", "WebSocket disconnected");
}

#[instrument(level = "info", skip(state))]
pub async fn handle_client_ws(msg: ClientWsMessage, state: &AppState, client: &str) -> ServerWsMessage {
  let result = match msg {
    ClientWsMessage::Ping => Ok(ServerWsMessage::Pong),

    ClientWsMessage::ViewQuestion { topic_id, question_id } =>
      view_question(state, client, &topic_id, &question_id).await.map(|view| ServerWsMessage::Question { view }),

    ClientWsMessage::RunCode { topic_id, question_id, code } =>
      run_code(state, &topic_id, &question_id, &code).map(|result| ServerWsMessage::RunResult { result }),

    ClientWsMessage::SubmitCode { topic_id, question_id, code } =>
      submit_code(state, client, &topic_id, &question_id, code).await.map(|result| ServerWsMessage::RunResult { result }),

    ClientWsMessage::ResetCode { topic_id, question_id } =>
      reset_code(state, client, &topic_id, &question_id).await.map(|code| ServerWsMessage::Code { code }),

    ClientWsMessage::FormatCode { code } => Ok(ServerWsMessage::Formatted { code: format(&code).code }),

    ClientWsMessage::ChatMessage { session_id, text } =>
      chat_reply(state, session_id.as_deref(), &text).await.map(|chat| ServerWsMessage::Chat { chat }),

    ClientWsMessage::Contact { form } =>
      send_contact(state, form).await.map(|contact| ServerWsMessage::Contact { contact }),
  };
  result.unwrap_or_else(|e| ServerWsMessage::Error { message: e.message().to_string() })
}

#[cfg(test)]
mod tests {
  use super::*;

  async fn dispatch(state: &AppState, json: &str) -> serde_json::Value {
    let msg: ClientWsMessage = serde_json::from_str(json).unwrap();
    serde_json::to_value(handle_client_ws(msg, state, "ws-client").await).unwrap()
  }

  #[tokio::test]
  async fn ping_pongs() {
    let state = AppState::offline();
    assert_eq!(dispatch(&state, r#"{"type":"ping"}"#).await["type"], "pong");
  }

  #[tokio::test]
  async fn run_code_reports_cases() {
    let state = AppState::offline();
    let v = dispatch(
      &state,
      r#"{"type":"run_code","topicId":"java-fundamentals","questionId":"1","code":"System.out.println(\"Hello, World!\")"}"#,
    ).await;
    assert_eq!(v["type"], "run_result");
    assert_eq!(v["result"]["report"]["allPassed"], true);
  }

  #[tokio::test]
  async fn unknown_question_becomes_error_message() {
    let state = AppState::offline();
    let v = dispatch(&state, r#"{"type":"view_question","topicId":"x","questionId":"1"}"#).await;
    assert_eq!(v["type"], "error");
    assert_eq!(v["message"], "Question not found.");
  }

  #[tokio::test]
  async fn contact_fields_are_flattened() {
    let state = AppState::offline();
    let v = dispatch(
      &state,
      r#"{"type":"contact","name":"Ada","email":"ada@example.com","subject":"Hi","message":"Hello"}"#,
    ).await;
    assert_eq!(v["type"], "contact");
    assert_eq!(v["contact"]["status"], "error");
    assert_eq!(v["contact"]["form"]["name"], "Ada");
  }
}
