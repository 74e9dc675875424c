//! SQLite-backed quiz history via libsql. Implements QuizRepoPort.
//!
//! One database file (data/quizzes.db). Articles are unique by URL; a quiz and
//! all of its questions and topics are written in a single transaction, so a
//! failed insert leaves nothing behind. `save_generated` also puts the article
//! upsert inside that transaction.

use crate::domain::{
    Article, DomainError, ExtractedArticle, Question, QuestionDraft, Quiz, QuizDraft, QuizRecord,
    RelatedTopic,
};
use crate::ports::QuizRepoPort;
use chrono::{DateTime, Utc};
use libsql::{Connection, Database, params};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

pub const VALID_ANSWERS: [&str; 4] = ["A", "B", "C", "D"];
pub const VALID_DIFFICULTIES: [&str; 3] = ["easy", "medium", "hard"];

const ARTICLES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id TEXT PRIMARY KEY,
    url TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    created_at INTEGER NOT NULL
)"#;

const QUIZZES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS quizzes (
    id TEXT PRIMARY KEY,
    article_id TEXT NOT NULL REFERENCES articles (id) ON DELETE CASCADE,
    generated_at INTEGER NOT NULL
)"#;
const QUIZZES_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_quizzes_article ON quizzes (article_id)";

const QUESTIONS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS questions (
    id TEXT PRIMARY KEY,
    quiz_id TEXT NOT NULL REFERENCES quizzes (id) ON DELETE CASCADE,
    question_text TEXT NOT NULL,
    option_a TEXT NOT NULL,
    option_b TEXT NOT NULL,
    option_c TEXT NOT NULL,
    option_d TEXT NOT NULL,
    correct_answer TEXT NOT NULL CHECK (correct_answer IN ('A', 'B', 'C', 'D')),
    explanation TEXT NOT NULL,
    difficulty TEXT NOT NULL CHECK (difficulty IN ('easy', 'medium', 'hard')),
    position INTEGER NOT NULL
)"#;
const QUESTIONS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_questions_quiz ON questions (quiz_id, position)";

const RELATED_TOPICS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS related_topics (
    id TEXT PRIMARY KEY,
    quiz_id TEXT NOT NULL REFERENCES quizzes (id) ON DELETE CASCADE,
    topic_title TEXT NOT NULL,
    topic_url TEXT NOT NULL,
    position INTEGER NOT NULL
)"#;
const RELATED_TOPICS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_related_topics_quiz ON related_topics (quiz_id, position)";

fn repo_err(e: impl std::fmt::Display) -> DomainError {
    DomainError::Repo(e.to_string())
}

fn now_secs() -> i64 {
    Utc::now().timestamp()
}

fn from_secs(secs: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(secs, 0).unwrap_or_default()
}

/// Reject drafts the schema would refuse, before opening a transaction.
pub fn validate_draft(draft: &QuizDraft) -> Result<(), DomainError> {
    for (idx, q) in draft.questions.iter().enumerate() {
        validate_question(idx + 1, q)?;
    }
    Ok(())
}

fn validate_question(order: usize, q: &QuestionDraft) -> Result<(), DomainError> {
    if !VALID_ANSWERS.contains(&q.correct_answer.as_str()) {
        return Err(DomainError::InvalidQuiz(format!(
            "question {}: correct_answer {:?} is not one of A, B, C, D",
            order, q.correct_answer
        )));
    }
    if !VALID_DIFFICULTIES.contains(&q.difficulty.as_str()) {
        return Err(DomainError::InvalidQuiz(format!(
            "question {}: difficulty {:?} is not one of easy, medium, hard",
            order, q.difficulty
        )));
    }
    Ok(())
}

/// SQLite repository. One database file (quizzes.db) in the given base directory.
pub struct SqliteRepo {
    db: Database,
}

impl SqliteRepo {
    /// Connect to (or create) the SQLite database and ensure the schema exists.
    /// Call this once at startup; the returned repo is safe to share via Arc.
    pub async fn connect(base_dir: impl AsRef<Path>) -> Result<Self, DomainError> {
        let base = base_dir.as_ref();
        std::fs::create_dir_all(base).map_err(repo_err)?;
        let db_path = base.join("quizzes.db");
        let path_str = db_path.to_string_lossy();
        let db = libsql::Builder::new_local(path_str.as_ref())
            .build()
            .await
            .map_err(repo_err)?;
        let conn = db.connect().map_err(repo_err)?;

        // PRAGMA returns a row (new value); use query and consume rows (execute fails when rows are returned).
        let mut wal_rows = conn
            .query("PRAGMA journal_mode=WAL", ())
            .await
            .map_err(|e| DomainError::Repo(format!("WAL pragma failed: {}", e)))?;
        while wal_rows.next().await.map_err(repo_err)?.is_some() {}

        for ddl in [
            ARTICLES_TABLE,
            QUIZZES_TABLE,
            QUIZZES_INDEX,
            QUESTIONS_TABLE,
            QUESTIONS_INDEX,
            RELATED_TOPICS_TABLE,
            RELATED_TOPICS_INDEX,
        ] {
            conn.execute(ddl, ()).await.map_err(repo_err)?;
        }

        info!(path = %db_path.display(), "SQLite connected with WAL mode");

        Ok(Self { db })
    }

    #[cfg(test)]
    pub(crate) async fn article_count(&self) -> i64 {
        let conn = self.conn().await.unwrap();
        let mut rows = conn.query("SELECT COUNT(*) FROM articles", ()).await.unwrap();
        rows.next().await.unwrap().unwrap().get(0).unwrap()
    }

    /// New connection with foreign key enforcement on.
    async fn conn(&self) -> Result<Connection, DomainError> {
        let conn = self.db.connect().map_err(repo_err)?;
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(repo_err)?;
        Ok(conn)
    }

    async fn load_article(conn: &Connection, article_id: &str) -> Result<Option<Article>, DomainError> {
        let mut rows = conn
            .query(
                "SELECT id, url, title, content, created_at FROM articles WHERE id = ?1",
                params![article_id],
            )
            .await
            .map_err(repo_err)?;
        match rows.next().await.map_err(repo_err)? {
            Some(row) => Ok(Some(Self::row_to_article(&row)?)),
            None => Ok(None),
        }
    }

    fn row_to_article(row: &libsql::Row) -> Result<Article, DomainError> {
        Ok(Article {
            id: row.get(0).map_err(repo_err)?,
            url: row.get(1).map_err(repo_err)?,
            title: row.get(2).map_err(repo_err)?,
            content: row.get(3).map_err(repo_err)?,
            created_at: from_secs(row.get(4).map_err(repo_err)?),
        })
    }

    async fn load_quiz(conn: &Connection, quiz_id: &str) -> Result<Option<Quiz>, DomainError> {
        let mut rows = conn
            .query(
                "SELECT id, article_id, generated_at FROM quizzes WHERE id = ?1",
                params![quiz_id],
            )
            .await
            .map_err(repo_err)?;
        let Some(row) = rows.next().await.map_err(repo_err)? else {
            return Ok(None);
        };
        let id: String = row.get(0).map_err(repo_err)?;
        let article_id: String = row.get(1).map_err(repo_err)?;
        let generated_at: i64 = row.get(2).map_err(repo_err)?;

        let questions = Self::load_questions(conn, &id).await?;
        let related_topics = Self::load_topics(conn, &id).await?;

        Ok(Some(Quiz {
            id,
            article_id,
            generated_at: from_secs(generated_at),
            questions,
            related_topics,
        }))
    }

    async fn load_questions(conn: &Connection, quiz_id: &str) -> Result<Vec<Question>, DomainError> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, question_text, option_a, option_b, option_c, option_d,
                       correct_answer, explanation, difficulty, position
                FROM questions
                WHERE quiz_id = ?1
                ORDER BY position ASC
                "#,
                params![quiz_id],
            )
            .await
            .map_err(repo_err)?;
        let mut questions = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            let position: i64 = row.get(9).map_err(repo_err)?;
            questions.push(Question {
                id: row.get(0).map_err(repo_err)?,
                question_text: row.get(1).map_err(repo_err)?,
                option_a: row.get(2).map_err(repo_err)?,
                option_b: row.get(3).map_err(repo_err)?,
                option_c: row.get(4).map_err(repo_err)?,
                option_d: row.get(5).map_err(repo_err)?,
                correct_answer: row.get(6).map_err(repo_err)?,
                explanation: row.get(7).map_err(repo_err)?,
                difficulty: row.get(8).map_err(repo_err)?,
                order: u32::try_from(position).map_err(repo_err)?,
            });
        }
        Ok(questions)
    }

    async fn load_topics(conn: &Connection, quiz_id: &str) -> Result<Vec<RelatedTopic>, DomainError> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, topic_title, topic_url
                FROM related_topics
                WHERE quiz_id = ?1
                ORDER BY position ASC
                "#,
                params![quiz_id],
            )
            .await
            .map_err(repo_err)?;
        let mut topics = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            topics.push(RelatedTopic {
                id: row.get(0).map_err(repo_err)?,
                topic_title: row.get(1).map_err(repo_err)?,
                topic_url: row.get(2).map_err(repo_err)?,
            });
        }
        Ok(topics)
    }

    async fn load_record(conn: &Connection, quiz_id: &str) -> Result<Option<QuizRecord>, DomainError> {
        let Some(quiz) = Self::load_quiz(conn, quiz_id).await? else {
            return Ok(None);
        };
        let article = Self::load_article(conn, &quiz.article_id)
            .await?
            .ok_or_else(|| {
                DomainError::Repo(format!(
                    "quiz {} references missing article {}",
                    quiz.id, quiz.article_id
                ))
            })?;
        Ok(Some(QuizRecord { article, quiz }))
    }

    /// Insert the article unless its URL is already stored, then read the stored row.
    async fn upsert_article(
        conn: &Connection,
        article: &ExtractedArticle,
    ) -> Result<Article, DomainError> {
        let inserted = conn
            .execute(
                r#"
                INSERT INTO articles (id, url, title, content, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (url) DO NOTHING
                "#,
                params![
                    Uuid::new_v4().to_string(),
                    article.url.as_str(),
                    article.title.as_str(),
                    article.content.as_str(),
                    now_secs()
                ],
            )
            .await
            .map_err(repo_err)?;

        let mut rows = conn
            .query(
                "SELECT id, url, title, content, created_at FROM articles WHERE url = ?1",
                params![article.url.as_str()],
            )
            .await
            .map_err(repo_err)?;
        let row = rows
            .next()
            .await
            .map_err(repo_err)?
            .ok_or_else(|| DomainError::Repo(format!("article {} vanished after insert", article.url)))?;
        let stored = Self::row_to_article(&row)?;

        debug!(url = %stored.url, id = %stored.id, created = inserted > 0, "article stored");
        Ok(stored)
    }

    /// Insert a quiz with its questions and topics. The caller owns the transaction.
    async fn insert_quiz(
        conn: &Connection,
        article_id: &str,
        draft: &QuizDraft,
    ) -> Result<Quiz, DomainError> {
        let quiz_id = Uuid::new_v4().to_string();
        let generated_at = now_secs();
        conn.execute(
            "INSERT INTO quizzes (id, article_id, generated_at) VALUES (?1, ?2, ?3)",
            params![quiz_id.as_str(), article_id, generated_at],
        )
        .await
        .map_err(repo_err)?;

        let mut questions = Vec::with_capacity(draft.questions.len());
        for (idx, q) in draft.questions.iter().enumerate() {
            let order = idx as u32 + 1;
            let question = Question {
                id: Uuid::new_v4().to_string(),
                question_text: q.question_text.clone(),
                option_a: q.option_a.clone(),
                option_b: q.option_b.clone(),
                option_c: q.option_c.clone(),
                option_d: q.option_d.clone(),
                correct_answer: q.correct_answer.clone(),
                explanation: q.explanation.clone(),
                difficulty: q.difficulty.clone(),
                order,
            };
            conn.execute(
                r#"
                INSERT INTO questions (id, quiz_id, question_text, option_a, option_b, option_c,
                                       option_d, correct_answer, explanation, difficulty, position)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
                "#,
                params![
                    question.id.as_str(),
                    quiz_id.as_str(),
                    question.question_text.as_str(),
                    question.option_a.as_str(),
                    question.option_b.as_str(),
                    question.option_c.as_str(),
                    question.option_d.as_str(),
                    question.correct_answer.as_str(),
                    question.explanation.as_str(),
                    question.difficulty.as_str(),
                    order as i64
                ],
            )
            .await
            .map_err(repo_err)?;
            questions.push(question);
        }

        let mut related_topics = Vec::with_capacity(draft.related_topics.len());
        for (idx, t) in draft.related_topics.iter().enumerate() {
            let topic = RelatedTopic {
                id: Uuid::new_v4().to_string(),
                topic_title: t.topic_title.clone(),
                topic_url: t.topic_url.clone(),
            };
            conn.execute(
                r#"
                INSERT INTO related_topics (id, quiz_id, topic_title, topic_url, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    topic.id.as_str(),
                    quiz_id.as_str(),
                    topic.topic_title.as_str(),
                    topic.topic_url.as_str(),
                    idx as i64 + 1
                ],
            )
            .await
            .map_err(repo_err)?;
            related_topics.push(topic);
        }

        debug!(
            quiz_id = %quiz_id,
            article_id,
            questions = questions.len(),
            related_topics = related_topics.len(),
            "quiz rows written"
        );

        Ok(Quiz {
            id: quiz_id,
            article_id: article_id.to_string(),
            generated_at: from_secs(generated_at),
            questions,
            related_topics,
        })
    }
}

#[async_trait::async_trait]
impl QuizRepoPort for SqliteRepo {
    async fn get_or_create_article(
        &self,
        article: &ExtractedArticle,
    ) -> Result<Article, DomainError> {
        let conn = self.conn().await?;
        Self::upsert_article(&conn, article).await
    }

    async fn create_quiz(&self, article_id: &str, draft: &QuizDraft) -> Result<Quiz, DomainError> {
        validate_draft(draft)?;

        let conn = self.conn().await?;
        let tx = conn.transaction().await.map_err(repo_err)?;
        let quiz = Self::insert_quiz(&tx, article_id, draft).await?;
        tx.commit().await.map_err(repo_err)?;
        info!(quiz_id = %quiz.id, article_id, "quiz saved");
        Ok(quiz)
    }

    async fn save_generated(
        &self,
        article: &ExtractedArticle,
        draft: &QuizDraft,
    ) -> Result<QuizRecord, DomainError> {
        validate_draft(draft)?;

        let conn = self.conn().await?;
        let tx = conn.transaction().await.map_err(repo_err)?;
        let article = Self::upsert_article(&tx, article).await?;
        let quiz = Self::insert_quiz(&tx, &article.id, draft).await?;
        tx.commit().await.map_err(repo_err)?;
        info!(quiz_id = %quiz.id, url = %article.url, "article and quiz saved");
        Ok(QuizRecord { article, quiz })
    }

    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<QuizRecord>, DomainError> {
        let conn = self.conn().await?;
        Self::load_record(&conn, quiz_id).await
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizRecord>, DomainError> {
        let conn = self.conn().await?;
        let mut rows = conn
            .query(
                "SELECT id FROM quizzes ORDER BY generated_at DESC, rowid DESC",
                (),
            )
            .await
            .map_err(repo_err)?;
        let mut ids: Vec<String> = Vec::new();
        while let Some(row) = rows.next().await.map_err(repo_err)? {
            ids.push(row.get(0).map_err(repo_err)?);
        }

        let mut records = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(record) = Self::load_record(&conn, &id).await? {
                records.push(record);
            }
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TopicDraft;

    fn article(url: &str) -> ExtractedArticle {
        ExtractedArticle {
            url: url.to_string(),
            title: "Octopus".to_string(),
            content: "An octopus is a soft-bodied, eight-limbed mollusc.".to_string(),
        }
    }

    fn question(text: &str, answer: &str, difficulty: &str) -> QuestionDraft {
        QuestionDraft {
            question_text: text.to_string(),
            option_a: "a".to_string(),
            option_b: "b".to_string(),
            option_c: "c".to_string(),
            option_d: "d".to_string(),
            correct_answer: answer.to_string(),
            explanation: "because".to_string(),
            difficulty: difficulty.to_string(),
        }
    }

    fn draft(n: usize) -> QuizDraft {
        QuizDraft {
            questions: (0..n)
                .map(|i| question(&format!("Question {}?", i + 1), "A", "medium"))
                .collect(),
            related_topics: vec![
                TopicDraft {
                    topic_title: "Squid".to_string(),
                    topic_url: "https://en.wikipedia.org/wiki/Squid".to_string(),
                },
                TopicDraft {
                    topic_title: "Cephalopod".to_string(),
                    topic_url: "https://en.wikipedia.org/wiki/Cephalopod".to_string(),
                },
            ],
        }
    }

    #[tokio::test]
    async fn test_get_or_create_article_dedupes_by_url() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();

        let first = repo
            .get_or_create_article(&article("https://en.wikipedia.org/wiki/Octopus"))
            .await
            .unwrap();
        let mut changed = article("https://en.wikipedia.org/wiki/Octopus");
        changed.title = "Different".to_string();
        let second = repo.get_or_create_article(&changed).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.title, "Octopus");

        let other = repo
            .get_or_create_article(&article("https://en.wikipedia.org/wiki/Squid"))
            .await
            .unwrap();
        assert_ne!(first.id, other.id);
    }

    #[tokio::test]
    async fn test_create_quiz_round_trip_order() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let stored = repo
            .get_or_create_article(&article("https://en.wikipedia.org/wiki/Octopus"))
            .await
            .unwrap();

        let quiz = repo.create_quiz(&stored.id, &draft(5)).await.unwrap();
        let record = repo.get_quiz(&quiz.id).await.unwrap().unwrap();

        assert_eq!(record.article, stored);
        assert_eq!(record.quiz, quiz);
        let orders: Vec<u32> = record.quiz.questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        let texts: Vec<&str> = record
            .quiz
            .questions
            .iter()
            .map(|q| q.question_text.as_str())
            .collect();
        assert_eq!(
            texts,
            vec!["Question 1?", "Question 2?", "Question 3?", "Question 4?", "Question 5?"]
        );
        assert_eq!(record.quiz.related_topics[0].topic_title, "Squid");
        assert_eq!(record.quiz.related_topics[1].topic_title, "Cephalopod");
    }

    #[tokio::test]
    async fn test_invalid_answer_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let stored = repo
            .get_or_create_article(&article("https://en.wikipedia.org/wiki/Octopus"))
            .await
            .unwrap();

        let mut bad = draft(4);
        bad.questions[3].correct_answer = "E".to_string();
        let err = repo.create_quiz(&stored.id, &bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuiz(_)));

        let mut bad = draft(4);
        bad.questions[0].difficulty = "extreme".to_string();
        let err = repo.create_quiz(&stored.id, &bad).await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidQuiz(_)));

        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_article_rolls_back() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();

        let err = repo.create_quiz("no-such-article", &draft(4)).await.unwrap_err();
        assert!(matches!(err, DomainError::Repo(_)));
        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_quizzes_and_missing_quiz() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let stored = repo
            .get_or_create_article(&article("https://en.wikipedia.org/wiki/Octopus"))
            .await
            .unwrap();

        let first = repo.create_quiz(&stored.id, &draft(4)).await.unwrap();
        let second = repo.create_quiz(&stored.id, &draft(5)).await.unwrap();

        let all = repo.list_quizzes().await.unwrap();
        assert_eq!(all.len(), 2);
        // newest first
        assert_eq!(all[0].quiz.id, second.id);
        assert_eq!(all[1].quiz.id, first.id);

        assert!(repo.get_quiz("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let quiz_id = {
            let repo = SqliteRepo::connect(dir.path()).await.unwrap();
            let stored = repo
                .get_or_create_article(&article("https://en.wikipedia.org/wiki/Octopus"))
                .await
                .unwrap();
            repo.create_quiz(&stored.id, &draft(4)).await.unwrap().id
        };
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let record = repo.get_quiz(&quiz_id).await.unwrap().unwrap();
        assert_eq!(record.quiz.questions.len(), 4);
    }

    #[tokio::test]
    async fn test_save_generated_reuses_article() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();
        let url = "https://en.wikipedia.org/wiki/Octopus";

        let first = repo.save_generated(&article(url), &draft(4)).await.unwrap();
        let second = repo.save_generated(&article(url), &draft(5)).await.unwrap();

        assert_eq!(first.article.id, second.article.id);
        assert_eq!(second.quiz.article_id, first.article.id);
        assert_eq!(repo.article_count().await, 1);
        assert_eq!(repo.get_quiz(&second.quiz.id).await.unwrap().unwrap(), second);
    }

    #[tokio::test]
    async fn test_save_generated_invalid_draft_stores_no_article() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();

        let mut bad = draft(4);
        bad.questions[0].correct_answer = "b".to_string();
        let err = repo
            .save_generated(&article("https://en.wikipedia.org/wiki/Octopus"), &bad)
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidQuiz(_)));
        assert_eq!(repo.article_count().await, 0);
        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_rolls_back_article() {
        let dir = tempfile::tempdir().unwrap();
        let repo = SqliteRepo::connect(dir.path()).await.unwrap();

        // bypass validation so the CHECK constraint fails mid-transaction
        let mut bad = draft(4);
        bad.questions[2].difficulty = "extreme".to_string();
        let conn = repo.conn().await.unwrap();
        let tx = conn.transaction().await.unwrap();
        let stored = SqliteRepo::upsert_article(&tx, &article("https://en.wikipedia.org/wiki/Octopus"))
            .await
            .unwrap();
        let err = SqliteRepo::insert_quiz(&tx, &stored.id, &bad).await.unwrap_err();
        assert!(matches!(err, DomainError::Repo(_)));
        drop(tx);
        drop(conn);

        assert_eq!(repo.article_count().await, 0);
        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[test]
    fn test_validate_draft_accepts_defaults() {
        assert!(validate_draft(&draft(5)).is_ok());
        assert!(validate_draft(&QuizDraft::default()).is_ok());
    }
}
