//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::catalog::Neighbours;
use crate::domain::{
    ChatMessage, ContactForm, Difficulty, Lesson, LessonContent, Level, Question, TestCase, Topic,
    TopicTheory,
};
use crate::grader::RunReport;

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    ViewQuestion {
        #[serde(rename = "topicId")]
        topic_id: String,
        #[serde(rename = "questionId")]
        question_id: String,
    },
    RunCode {
        #[serde(rename = "topicId")]
        topic_id: String,
        #[serde(rename = "questionId")]
        question_id: String,
        code: String,
    },
    SubmitCode {
        #[serde(rename = "topicId")]
        topic_id: String,
        #[serde(rename = "questionId")]
        question_id: String,
        code: String,
    },
    ResetCode {
        #[serde(rename = "topicId")]
        topic_id: String,
        #[serde(rename = "questionId")]
        question_id: String,
    },
    FormatCode {
        code: String,
    },
    ChatMessage {
        #[serde(default, rename = "sessionId")]
        session_id: Option<String>,
        text: String,
    },
    Contact {
        #[serde(flatten)]
        form: ContactForm,
    },
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Question {
        view: QuestionViewOut,
    },
    RunResult {
        result: RunOut,
    },
    Code {
        code: CodeOut,
    },
    Formatted {
        code: String,
    },
    Chat {
        chat: ChatOut,
    },
    Contact {
        contact: ContactOut,
    },
    Error {
        message: String,
    },
}

//
// Errors
//

/// The two user-facing failure kinds of the HTTP surface. External call
/// failures never reach here; they are replaced by fallback text upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(m) | ApiError::BadRequest(m) => m,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        (status, Json(ErrorOut { error: self.message().to_string() })).into_response()
    }
}

//
// Practice DTOs
//

#[derive(Debug, Deserialize)]
pub struct TopicsQuery {
    pub level: Option<Level>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressOut {
    pub client_id: String,
    pub saved_keys: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicOut {
    #[serde(flatten)]
    pub topic: Topic,
    pub question_count: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionSummary {
    pub id: u32,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub platform: Option<String>,
    pub link: Option<String>,
}

impl From<&Question> for QuestionSummary {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            title: q.title.clone(),
            difficulty: q.difficulty,
            description: q.description.clone(),
            platform: q.platform.clone(),
            link: q.link.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TopicDetailOut {
    pub topic: Topic,
    pub theory: Option<TopicTheory>,
    pub questions: Vec<QuestionSummary>,
}

/// Question as sent to clients: hidden test cases are left out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionOut {
    pub id: u32,
    pub topic_id: String,
    pub title: String,
    pub difficulty: Difficulty,
    pub description: String,
    pub starter_code: String,
    pub examples: Vec<TestCase>,
    pub hints: Vec<String>,
    pub platform: Option<String>,
    pub link: Option<String>,
}

impl From<&Question> for QuestionOut {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            topic_id: q.topic_id.clone(),
            title: q.title.clone(),
            difficulty: q.difficulty,
            description: q.description.clone(),
            starter_code: q.starter_code.clone(),
            examples: q.test_cases.iter().filter(|c| c.is_public).cloned().collect(),
            hints: q.hints.clone(),
            platform: q.platform.clone(),
            link: q.link.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionViewOut {
    pub question: QuestionOut,
    pub neighbours: Neighbours,
    pub code: CodeOut,
}

#[derive(Debug, Deserialize)]
pub struct CodeIn {
    pub code: String,
}

/// Code currently shown in the editor for one question.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeOut {
    pub storage_key: String,
    pub code: String,
    /// False when `code` is the question's starter code.
    pub saved: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOut {
    /// False when the code was blank and nothing ran.
    pub ran: bool,
    pub report: Option<RunReport>,
    /// Set when the code was saved as part of a submit.
    pub saved_as: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FormatIn {
    pub code: String,
}
#[derive(Debug, Serialize)]
pub struct FormatOut {
    pub code: String,
}

#[derive(Debug, Serialize)]
pub struct LessonDetailOut {
    pub lesson: Lesson,
    pub content: Option<LessonContent>,
}

//
// Chat DTOs
//

#[derive(Debug, Deserialize)]
pub struct ChatIn {
    #[serde(default, rename = "sessionId")]
    pub session_id: Option<String>,
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatOut {
    pub session_id: String,
    pub reply: ChatMessage,
    /// True when `reply` is the fallback apology.
    pub fallback: bool,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub id: String,
    pub messages: Vec<ChatMessage>,
}

//
// Contact DTOs
//

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ContactStatus {
    Success,
    Error,
}

#[derive(Debug, Serialize)]
pub struct ContactOut {
    pub status: ContactStatus,
    pub message: String,
    /// Form to show after the attempt: cleared on success, unchanged on failure.
    pub form: ContactForm,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
