//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    Article, ExtractedArticle, Question, QuestionDraft, Quiz, QuizDraft, QuizRecord,
    RelatedTopic, TopicDraft,
};
pub use errors::{DomainError, ExtractionError, SynthesisError};
