//! Plain-text and JSON rendering of quizzes. Shared by the CLI and TUI.

use crate::domain::{DomainError, Question, QuizRecord};
use serde::Serialize;

pub const GENERATED_MESSAGE: &str = "Quiz generated successfully";

/// Body printed after a successful generate: `{article, quiz, message}`.
#[derive(Serialize)]
pub struct GenerateQuizResponse<'a> {
    #[serde(flatten)]
    pub record: &'a QuizRecord,
    pub message: &'static str,
}

/// One history/show entry: `{id, article, quiz}`.
#[derive(Serialize)]
pub struct QuizEntry<'a> {
    pub id: &'a str,
    #[serde(flatten)]
    pub record: &'a QuizRecord,
}

impl<'a> From<&'a QuizRecord> for QuizEntry<'a> {
    fn from(record: &'a QuizRecord) -> Self {
        Self {
            id: &record.quiz.id,
            record,
        }
    }
}

/// Failure body: `{status, detail}`.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub detail: String,
}

impl From<&DomainError> for ErrorResponse {
    fn from(err: &DomainError) -> Self {
        Self {
            status: err.status_code(),
            detail: err.to_string(),
        }
    }
}

/// One-line summary for history menus.
pub fn history_label(record: &QuizRecord) -> String {
    format!(
        "{} · {} questions · {} [{}]",
        record.article.title,
        record.quiz.questions.len(),
        record.quiz.generated_at.format("%Y-%m-%d %H:%M"),
        record.quiz.id
    )
}

/// Option lines for a question: "A) ...".
pub fn option_lines(question: &Question) -> Vec<String> {
    question
        .options()
        .iter()
        .map(|(letter, text)| format!("{}) {}", letter, text))
        .collect()
}

/// Full quiz view. Answers and explanations only when `reveal` is set.
pub fn render_quiz(record: &QuizRecord, reveal: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!("# {}\n", record.article.title));
    out.push_str(&format!("{}\n\n", record.article.url));

    for q in &record.quiz.questions {
        out.push_str(&format!("{}. [{}] {}\n", q.order, q.difficulty, q.question_text));
        for line in option_lines(q) {
            out.push_str(&format!("   {}\n", line));
        }
        if reveal {
            out.push_str(&format!("   Answer: {} · {}\n", q.correct_answer, q.explanation));
        }
        out.push('\n');
    }

    if !record.quiz.related_topics.is_empty() {
        out.push_str("Related topics:\n");
        for t in &record.quiz.related_topics {
            out.push_str(&format!("- {} ({})\n", t.topic_title, t.topic_url));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Article, Quiz, RelatedTopic};
    use chrono::{TimeZone, Utc};

    fn sample_record() -> QuizRecord {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap();
        QuizRecord {
            article: Article {
                id: "art-1".into(),
                url: "https://en.wikipedia.org/wiki/Octopus".into(),
                title: "Octopus".into(),
                content: "An octopus is a mollusc.".into(),
                created_at: at,
            },
            quiz: Quiz {
                id: "quiz-1".into(),
                article_id: "art-1".into(),
                generated_at: at,
                questions: vec![Question {
                    id: "q-1".into(),
                    question_text: "How many hearts?".into(),
                    option_a: "One".into(),
                    option_b: "Two".into(),
                    option_c: "Three".into(),
                    option_d: "Four".into(),
                    correct_answer: "C".into(),
                    explanation: "Two branchial, one systemic.".into(),
                    difficulty: "medium".into(),
                    order: 1,
                }],
                related_topics: vec![RelatedTopic {
                    id: "t-1".into(),
                    topic_title: "Squid".into(),
                    topic_url: "https://en.wikipedia.org/wiki/Squid".into(),
                }],
            },
        }
    }

    #[test]
    fn test_render_quiz_hides_answers() {
        let text = render_quiz(&sample_record(), false);
        assert!(text.contains("# Octopus"));
        assert!(text.contains("1. [medium] How many hearts?"));
        assert!(text.contains("C) Three"));
        assert!(!text.contains("Answer:"));
        assert!(text.contains("- Squid (https://en.wikipedia.org/wiki/Squid)"));
    }

    #[test]
    fn test_render_quiz_reveal() {
        let text = render_quiz(&sample_record(), true);
        assert!(text.contains("Answer: C · Two branchial, one systemic."));
    }

    #[test]
    fn test_generate_response_shape() {
        let record = sample_record();
        let json = serde_json::to_value(GenerateQuizResponse {
            record: &record,
            message: GENERATED_MESSAGE,
        })
        .unwrap();
        assert_eq!(json["message"], GENERATED_MESSAGE);
        assert_eq!(json["article"]["title"], "Octopus");
        assert_eq!(json["quiz"]["questions"][0]["order"], 1);
    }

    #[test]
    fn test_entry_and_label() {
        let record = sample_record();
        let json = serde_json::to_value(QuizEntry::from(&record)).unwrap();
        assert_eq!(json["id"], "quiz-1");
        assert_eq!(json["quiz"]["id"], "quiz-1");
        assert_eq!(
            history_label(&record),
            "Octopus · 1 questions · 2024-01-01 12:30 [quiz-1]"
        );
    }
}
