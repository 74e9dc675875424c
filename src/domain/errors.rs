//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Failures while turning a URL into an `ExtractedArticle`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("Invalid Wikipedia URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to fetch Wikipedia page: {0}")]
    FetchFailure(String),

    #[error("Could not find article content: {0}")]
    NoContentFound(String),

    #[error("Not enough article content found: {0}")]
    InsufficientContent(String),
}

/// Failures while turning article text into a `QuizDraft`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SynthesisError {
    #[error("LLM call failed: {0}")]
    CallFailure(String),

    #[error("Could not parse LLM response as JSON: {0}")]
    UnparsableResponse(String),
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    #[error("Repository error: {0}")]
    Repo(String),

    /// Draft rejected at the storage boundary (bad answer letter, bad difficulty).
    #[error("Invalid quiz: {0}")]
    InvalidQuiz(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// HTTP-style status for the failure: 400 when the requested URL is at fault,
    /// 404 for unknown ids, 500 for upstream or storage failures.
    pub fn status_code(&self) -> u16 {
        match self {
            DomainError::Extraction(_) => 400,
            DomainError::NotFound(_) => 404,
            _ => 500,
        }
    }

    pub fn is_client_fault(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
