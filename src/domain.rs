//! Domain models: practice topics/questions, Core Java lessons, portfolio
//! sections, chat messages and the contact form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordering tag of a practice topic.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Level {
  Beginner,
  Intermediate,
  Advanced,
  Expert,
}

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
  #[default]
  Easy,
  Medium,
  Hard,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Topic {
  pub id: String,
  pub title: String,
  pub description: String,
  pub icon: String,
  pub level: Level,
  pub order: u32,
}

/// Example input/output pair. Hidden cases are graded but never sent to clients.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
  #[serde(default)] pub input: String,
  pub output: String,
  #[serde(default)] pub is_public: bool,
}

/// A single practice exercise. `id` is unique within its topic only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub id: u32,
  pub topic_id: String,
  pub title: String,
  #[serde(default)] pub difficulty: Difficulty,
  pub description: String,
  #[serde(default)] pub starter_code: String,
  #[serde(default)] pub test_cases: Vec<TestCase>,
  #[serde(default)] pub hints: Vec<String>,
  // External judge the question mirrors (HackerRank, LeetCode, ...)
  #[serde(default)] pub platform: Option<String>,
  #[serde(default)] pub link: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Resource {
  pub title: String,
  pub url: String,
}

/// Markdown theory shown above a topic's question list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TopicTheory {
  pub topic_id: String,
  pub theory: String,
  pub resources: Vec<Resource>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LessonStatus {
  Active,
  ComingSoon,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LessonSection {
  pub id: String,
  pub title: String,
  pub content: String,
  #[serde(default)] pub code: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PracticePrompt {
  pub id: u32,
  pub question: String,
  pub difficulty: Difficulty,
}

/// Core Java tutorial topic. `content` is `None` for lessons not written yet.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
  pub id: String,
  pub title: String,
  pub description: String,
  pub icon: String,
  pub status: LessonStatus,
  pub order: u32,
  #[serde(skip_serializing)]
  pub content: Option<LessonContent>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LessonContent {
  pub title: String,
  pub sections: Vec<LessonSection>,
  pub practice_questions: Vec<PracticePrompt>,
  pub key_takeaways: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RoadmapStage {
  pub id: String,
  pub title: String,
  pub description: String,
  // In-site route, when the stage already has content.
  #[serde(default)] pub route: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Highlight {
  pub title: String,
  pub description: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub name: String,
  pub headline: String,
  pub summary: String,
  pub about: Vec<String>,
  pub highlights: Vec<Highlight>,
  pub resume_url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
  pub title: String,
  pub description: String,
  pub image: String,
  pub tags: Vec<String>,
  #[serde(default)] pub github: Option<String>,
  #[serde(default)] pub demo: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Skill {
  pub name: String,
  /// Self-assessed proficiency, 0-100.
  pub level: u8,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SkillCategory {
  pub title: String,
  pub skills: Vec<Skill>,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
  User,
  Assistant,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
  pub role: ChatRole,
  pub content: String,
  pub at: DateTime<Utc>,
}

impl ChatMessage {
  pub fn user(content: impl Into<String>) -> Self {
    Self { role: ChatRole::User, content: content.into(), at: Utc::now() }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self { role: ChatRole::Assistant, content: content.into(), at: Utc::now() }
  }
}

/// The four contact form fields, forwarded verbatim to the email relay.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactForm {
  #[serde(default)] pub name: String,
  #[serde(default)] pub email: String,
  #[serde(default)] pub subject: String,
  #[serde(default)] pub message: String,
}
