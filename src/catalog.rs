//! Read-only content tables with lookup by identifier.
//!
//! Built once at startup from the seeds (plus any questions from the site
//! config) and shared behind `Arc`. Unknown identifiers resolve to `None`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{instrument, warn};

use crate::domain::{Lesson, Level, Profile, Project, Question, RoadmapStage, SkillCategory, Topic, TopicTheory};
use crate::seeds;

/// Previous/next question ids inside one topic.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct Neighbours {
  pub prev: Option<u32>,
  pub next: Option<u32>,
}

pub struct Catalog {
  topics: Vec<Topic>,
  questions: HashMap<String, Vec<Question>>,
  theory: HashMap<String, TopicTheory>,
  lessons: Vec<Lesson>,
  roadmap: Vec<RoadmapStage>,
  profile: Profile,
  projects: Vec<Project>,
  skills: Vec<SkillCategory>,
}

impl Catalog {
  /// Assemble a catalog. Questions keep their declared order within a topic;
  /// duplicates of an existing (topic, id) pair and questions for unknown
  /// topics are dropped.
  #[allow(clippy::too_many_arguments)]
  pub fn new(
    topics: Vec<Topic>,
    questions: Vec<Question>,
    theory: Vec<TopicTheory>,
    lessons: Vec<Lesson>,
    roadmap: Vec<RoadmapStage>,
    profile: Profile,
    projects: Vec<Project>,
    skills: Vec<SkillCategory>,
  ) -> Self {
    let mut catalog = Self {
      topics,
      questions: HashMap::new(),
      theory: theory.into_iter().map(|t| (t.topic_id.clone(), t)).collect(),
      lessons,
      roadmap,
      profile,
      projects,
      skills,
    };
    catalog.add_questions(questions);
    catalog
  }

  /// Catalog made of the built-in seeds only.
  pub fn builtin() -> Self {
    Self::new(
      seeds::practice_topics(),
      seeds::practice_questions(),
      seeds::topic_theory(),
      seeds::lessons(),
      seeds::roadmap(),
      seeds::profile(),
      seeds::projects(),
      seeds::skill_categories(),
    )
  }

  /// Built-in catalog extended with configured questions.
  pub fn with_extra_questions(extra: Vec<Question>) -> Self {
    let mut catalog = Self::builtin();
    catalog.add_questions(extra);
    catalog
  }

  fn add_questions(&mut self, questions: Vec<Question>) {
    let known: HashSet<String> = self.topics.iter().map(|t| t.id.clone()).collect();
    for q in questions {
      if !known.contains(&q.topic_id) {
        warn!(target: "practice", topic = %q.topic_id, id = q.id, "Skipping question for unknown topic");
        continue;
      }
      let bucket = self.questions.entry(q.topic_id.clone()).or_default();
      if bucket.iter().any(|existing| existing.id == q.id) {
        warn!(target: "practice", topic = %q.topic_id, id = q.id, "Skipping duplicate question id");
        continue;
      }
      bucket.push(q);
    }
  }

  pub fn topics(&self) -> &[Topic] {
    &self.topics
  }

  pub fn topics_by_level(&self, level: Level) -> Vec<&Topic> {
    self.topics.iter().filter(|t| t.level == level).collect()
  }

  pub fn topic(&self, id: &str) -> Option<&Topic> {
    self.topics.iter().find(|t| t.id == id)
  }

  /// Questions of a topic in declared order; empty for unknown topics.
  pub fn questions_for(&self, topic_id: &str) -> &[Question] {
    self.questions.get(topic_id).map(Vec::as_slice).unwrap_or(&[])
  }

  #[instrument(level = "debug", skip(self))]
  pub fn question(&self, topic_id: &str, question_id: u32) -> Option<&Question> {
    self.questions_for(topic_id).iter().find(|q| q.id == question_id)
  }

  /// Like `question`, but takes the raw path segment. Only the canonical
  /// decimal form matches ("1", not "01" or "+1").
  pub fn question_by_segment(&self, topic_id: &str, segment: &str) -> Option<&Question> {
    let id = segment.parse::<u32>().ok().filter(|id| id.to_string() == segment)?;
    self.question(topic_id, id)
  }

  pub fn neighbours(&self, topic_id: &str, question_id: u32) -> Option<Neighbours> {
    let list = self.questions_for(topic_id);
    let idx = list.iter().position(|q| q.id == question_id)?;
    Some(Neighbours {
      prev: idx.checked_sub(1).map(|i| list[i].id),
      next: list.get(idx + 1).map(|q| q.id),
    })
  }

  pub fn theory(&self, topic_id: &str) -> Option<&TopicTheory> {
    self.theory.get(topic_id)
  }

  pub fn lessons(&self) -> &[Lesson] {
    &self.lessons
  }

  pub fn lesson(&self, id: &str) -> Option<&Lesson> {
    self.lessons.iter().find(|l| l.id == id)
  }

  pub fn roadmap(&self) -> &[RoadmapStage] {
    &self.roadmap
  }

  pub fn profile(&self) -> &Profile {
    &self.profile
  }

  pub fn projects(&self) -> &[Project] {
    &self.projects
  }

  pub fn skills(&self) -> &[SkillCategory] {
    &self.skills
  }

  pub fn question_count(&self) -> usize {
    self.questions.values().map(Vec::len).sum()
  }
}
