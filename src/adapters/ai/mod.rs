//! AI adapter module. Implements LlmPort for quiz synthesis.
//!
//! Provides OpenAI-compatible adapter and mock adapter for offline runs.

pub mod mock_adapter;
pub mod openai_adapter;

pub use mock_adapter::MockLlmAdapter;
pub use openai_adapter::OpenAiAdapter;
