//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    Article, DomainError, ExtractedArticle, ExtractionError, Quiz, QuizDraft, QuizRecord,
    SynthesisError,
};

/// Fetch raw page markup over HTTP.
#[async_trait::async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the response body. Non-2xx, timeouts and transport
    /// errors all map to `ExtractionError::FetchFailure`.
    async fn fetch(&self, url: &str) -> Result<String, ExtractionError>;
}

/// Large language model completion. One prompt in, raw text out.
#[async_trait::async_trait]
pub trait LlmPort: Send + Sync {
    /// Send a single user prompt and return the model's reply verbatim.
    /// Called once per synthesis; implementations must not retry.
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, SynthesisError>;
}

/// Quiz history storage.
#[async_trait::async_trait]
pub trait QuizRepoPort: Send + Sync {
    /// Return the stored article for `article.url`, inserting it first if absent.
    /// An existing row is returned unchanged.
    async fn get_or_create_article(
        &self,
        article: &ExtractedArticle,
    ) -> Result<Article, DomainError>;

    /// Validate and store a quiz with its questions and topics as one unit.
    /// Question order is the draft position, starting at 1.
    async fn create_quiz(&self, article_id: &str, draft: &QuizDraft) -> Result<Quiz, DomainError>;

    /// Get-or-create the article and store the quiz in one transaction.
    /// On error neither the article nor the quiz is written.
    async fn save_generated(
        &self,
        article: &ExtractedArticle,
        draft: &QuizDraft,
    ) -> Result<QuizRecord, DomainError>;

    /// Look up a quiz by id.
    async fn get_quiz(&self, quiz_id: &str) -> Result<Option<QuizRecord>, DomainError>;

    /// All stored quizzes, newest first.
    async fn list_quizzes(&self) -> Result<Vec<QuizRecord>, DomainError>;
}
