//! Application use cases. Orchestrate domain logic via ports.

pub mod content_extractor;
pub mod quiz_service;
pub mod quiz_synthesizer;

pub use content_extractor::ContentExtractor;
pub use quiz_service::QuizService;
pub use quiz_synthesizer::{QuizSynthesizer, SynthesisOptions};
