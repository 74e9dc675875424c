//! Domain entities. Pure data structures for the core business.
//!
//! Drafts are per-request values parsed from the outside world; the stored
//! types carry identity and timestamps assigned by the repository.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Readable prose pulled out of a Wikipedia page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedArticle {
    pub url: String,
    pub title: String,
    /// Paragraphs joined by blank lines, capped at `MAX_CONTENT_CHARS`.
    pub content: String,
}

/// Unvalidated quiz as returned by the LLM.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
    #[serde(default)]
    pub related_topics: Vec<TopicDraft>,
}

/// One question from the LLM. Position in `QuizDraft::questions` decides its order;
/// any order field in the reply is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub explanation: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_difficulty() -> String {
    "medium".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicDraft {
    pub topic_title: String,
    pub topic_url: String,
}

/// Stored article. Unique by `url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub url: String,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub explanation: String,
    pub difficulty: String,
    /// 1-based position within the quiz.
    pub order: u32,
}

impl Question {
    /// Options paired with their answer letter, in A..D order.
    pub fn options(&self) -> [(char, &str); 4] {
        [
            ('A', self.option_a.as_str()),
            ('B', self.option_b.as_str()),
            ('C', self.option_c.as_str()),
            ('D', self.option_d.as_str()),
        ]
    }

    pub fn is_correct(&self, letter: char) -> bool {
        self.correct_answer
            .chars()
            .next()
            .is_some_and(|c| c.eq_ignore_ascii_case(&letter))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedTopic {
    pub id: String,
    pub topic_title: String,
    pub topic_url: String,
}

/// Stored quiz with children. `questions` is always sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quiz {
    pub id: String,
    pub article_id: String,
    pub generated_at: DateTime<Utc>,
    pub questions: Vec<Question>,
    pub related_topics: Vec<RelatedTopic>,
}

/// A quiz together with the article it was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub article: Article,
    pub quiz: Quiz,
}
