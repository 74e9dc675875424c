//! Quiz service. Orchestrates URL -> article -> quiz -> history.
//!
//! Coordinates the extractor (page), synthesizer (LLM) and repository (storage).

use crate::domain::{DomainError, QuizRecord};
use crate::ports::QuizRepoPort;
use crate::usecases::{ContentExtractor, QuizSynthesizer};
use std::sync::Arc;
use tracing::info;

/// Service for generating and browsing quizzes.
///
/// `generate` runs strictly in sequence:
/// 1. Extract article text from the URL
/// 2. Synthesize a quiz draft with the LLM
/// 3. Store the article (deduplicated by URL) and the quiz in one transaction
///
/// Nothing is stored unless step 2 succeeds, and step 3 stores all or nothing.
pub struct QuizService {
    extractor: ContentExtractor,
    synthesizer: QuizSynthesizer,
    repo: Arc<dyn QuizRepoPort>,
}

impl QuizService {
    pub fn new(
        extractor: ContentExtractor,
        synthesizer: QuizSynthesizer,
        repo: Arc<dyn QuizRepoPort>,
    ) -> Self {
        Self {
            extractor,
            synthesizer,
            repo,
        }
    }

    /// Generate and store a quiz for a Wikipedia article URL.
    pub async fn generate(&self, url: &str) -> Result<QuizRecord, DomainError> {
        let extracted = self.extractor.extract(url).await?;
        let draft = self
            .synthesizer
            .synthesize(&extracted.title, &extracted.content)
            .await?;

        let record = self.repo.save_generated(&extracted, &draft).await?;

        info!(
            url = %record.article.url,
            quiz_id = %record.quiz.id,
            questions = record.quiz.questions.len(),
            "quiz generated"
        );
        Ok(record)
    }

    /// All stored quizzes, newest first.
    pub async fn history(&self) -> Result<Vec<QuizRecord>, DomainError> {
        self.repo.list_quizzes().await
    }

    pub async fn quiz(&self, quiz_id: &str) -> Result<QuizRecord, DomainError> {
        self.repo
            .get_quiz(quiz_id.trim())
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("Quiz not found: {}", quiz_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::persistence::SqliteRepo;
    use crate::domain::{ExtractionError, SynthesisError};
    use crate::ports::{LlmPort, PageFetcher};
    use crate::usecases::SynthesisOptions;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const OCTOPUS_PAGE: &str = r#"<html><body><h1 id="firstHeading">Octopus</h1>
        <div class="mw-content-ltr mw-parser-output">
        <p>An octopus is a soft-bodied, eight-limbed mollusc of the order Octopoda.</p>
        <p>Octopuses have three hearts and blue blood, and they are highly intelligent.</p>
        </div></body></html>"#;

    const REPLY: &str = r#"```json
{"questions": [
  {"question_text": "How many hearts?", "option_a": "1", "option_b": "2", "option_c": "3", "option_d": "4", "correct_answer": "C", "explanation": "Three hearts.", "difficulty": "easy", "order": 9},
  {"question_text": "Blood colour?", "option_a": "Red", "option_b": "Blue", "option_c": "Green", "option_d": "Clear", "correct_answer": "B", "explanation": "Haemocyanin.", "difficulty": "medium", "order": 3},
  {"question_text": "Order?", "option_a": "Octopoda", "option_b": "Teuthida", "option_c": "Sepiida", "option_d": "Nautilida", "correct_answer": "A", "explanation": "Octopoda.", "order": 1},
  {"question_text": "Limbs?", "option_a": "6", "option_b": "10", "option_c": "12", "option_d": "8", "correct_answer": "D", "explanation": "Eight limbs.", "difficulty": "hard"}
],
"related_topics": [{"topic_title": "Squid", "topic_url": "https://en.wikipedia.org/wiki/Squid"}]}
```"#;

    struct StaticFetcher {
        calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Result<String, ExtractionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(OCTOPUS_PAGE.to_string())
        }
    }

    struct StaticLlm {
        reply: &'static str,
    }

    #[async_trait::async_trait]
    impl LlmPort for StaticLlm {
        async fn complete(&self, _prompt: &str, _temperature: f32) -> Result<String, SynthesisError> {
            Ok(self.reply.to_string())
        }
    }

    async fn build_service(
        dir: &tempfile::TempDir,
        reply: &'static str,
    ) -> (QuizService, Arc<StaticFetcher>, Arc<SqliteRepo>) {
        let fetcher = Arc::new(StaticFetcher {
            calls: AtomicUsize::new(0),
        });
        let repo = Arc::new(SqliteRepo::connect(dir.path()).await.unwrap());
        let service = QuizService::new(
            ContentExtractor::new(fetcher.clone()),
            QuizSynthesizer::new(Arc::new(StaticLlm { reply }), SynthesisOptions::default()),
            repo.clone(),
        );
        (service, fetcher, repo)
    }

    #[tokio::test]
    async fn test_generate_octopus() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = build_service(&dir, REPLY).await;

        let record = service
            .generate("https://en.wikipedia.org/wiki/Octopus")
            .await
            .unwrap();

        assert_eq!(record.article.title, "Octopus");
        assert!(!record.article.content.is_empty());
        assert!((4..=5).contains(&record.quiz.questions.len()));
        let orders: Vec<u32> = record.quiz.questions.iter().map(|q| q.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
        assert_eq!(record.quiz.questions[2].difficulty, "medium");
        assert!(record
            .quiz
            .questions
            .iter()
            .all(|q| ["A", "B", "C", "D"].contains(&q.correct_answer.as_str())));

        let fetched = service.quiz(&record.quiz.id).await.unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_same_url_reuses_article() {
        let dir = tempfile::tempdir().unwrap();
        let (service, fetcher, _) = build_service(&dir, REPLY).await;

        let a = service.generate("https://en.wikipedia.org/wiki/Octopus").await.unwrap();
        let b = service.generate("https://en.wikipedia.org/wiki/Octopus").await.unwrap();

        assert_eq!(a.article.id, b.article.id);
        assert_ne!(a.quiz.id, b.quiz.id);
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
        assert_eq!(service.history().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_url_is_client_fault() {
        let dir = tempfile::tempdir().unwrap();
        let (service, fetcher, _) = build_service(&dir, REPLY).await;

        let err = service.generate("https://example.com/foo").await.unwrap_err();
        assert!(matches!(err, DomainError::Extraction(ExtractionError::InvalidUrl(_))));
        assert!(err.is_client_fault());
        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unparsable_reply_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, repo) = build_service(&dir, "Sorry, I can't help with that.").await;

        let err = service
            .generate("https://en.wikipedia.org/wiki/Octopus")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::Synthesis(SynthesisError::UnparsableResponse(_))
        ));
        assert_eq!(err.status_code(), 500);
        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_answer_letter_stores_nothing() {
        const LOWERCASE_ANSWER: &str = r#"{"questions": [
  {"question_text": "How many hearts?", "option_a": "1", "option_b": "2", "option_c": "3", "option_d": "4", "correct_answer": "b", "explanation": "Three hearts.", "difficulty": "easy"}
], "related_topics": []}"#;
        let dir = tempfile::tempdir().unwrap();
        let (service, _, repo) = build_service(&dir, LOWERCASE_ANSWER).await;

        let err = service
            .generate("https://en.wikipedia.org/wiki/Octopus")
            .await
            .unwrap_err();

        assert!(matches!(err, DomainError::InvalidQuiz(_)));
        assert_eq!(err.status_code(), 500);
        assert_eq!(repo.article_count().await, 0);
        assert!(repo.list_quizzes().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_quiz_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let (service, _, _) = build_service(&dir, REPLY).await;

        let err = service.quiz("does-not-exist").await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
