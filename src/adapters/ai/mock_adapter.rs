//! Mock LLM adapter for running without an API key.
//!
//! Returns a canned quiz wrapped in a ```json fence, the way chat models
//! often answer despite being told not to.

use crate::domain::SynthesisError;
use crate::ports::LlmPort;
use std::time::Duration;
use tracing::info;

/// Mock LLM adapter.
///
/// Returns a predetermined reply without making API calls.
/// Simulates network latency with configurable delay.
pub struct MockLlmAdapter {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
}

impl MockLlmAdapter {
    /// Create a new mock adapter with default delay (100ms).
    pub fn new() -> Self {
        Self { delay_ms: 100 }
    }

    /// Create a mock adapter with custom delay.
    pub fn with_delay(delay_ms: u64) -> Self {
        Self { delay_ms }
    }

    fn title_from_prompt(prompt: &str) -> &str {
        prompt
            .lines()
            .find_map(|l| l.strip_prefix("Article Title:"))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or("this article")
    }
}

impl Default for MockLlmAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmPort for MockLlmAdapter {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, SynthesisError> {
        info!(
            prompt_len = prompt.len(),
            temperature, "[MOCK] Simulating LLM completion"
        );

        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;

        let title = Self::title_from_prompt(prompt);
        let quiz = serde_json::json!({
            "questions": [
                {
                    "question_text": format!("[MOCK] What is the main subject of the article \"{}\"?", title),
                    "option_a": title,
                    "option_b": "A programming language",
                    "option_c": "A musical instrument",
                    "option_d": "A mountain range",
                    "correct_answer": "A",
                    "explanation": "The article is about its title subject.",
                    "difficulty": "easy"
                },
                {
                    "question_text": "[MOCK] Which source was this quiz generated from?",
                    "option_a": "A newspaper",
                    "option_b": "Wikipedia",
                    "option_c": "A textbook",
                    "option_d": "A podcast",
                    "correct_answer": "B",
                    "explanation": "Quizzes are generated from Wikipedia articles.",
                    "difficulty": "easy"
                },
                {
                    "question_text": "[MOCK] Which adapter produced this quiz?",
                    "option_a": "OpenAI",
                    "option_b": "Gemini",
                    "option_c": "The mock adapter",
                    "option_d": "Ollama",
                    "correct_answer": "C",
                    "explanation": "No API key was configured, so the mock adapter answered.",
                    "difficulty": "medium"
                },
                {
                    "question_text": "[MOCK] How do you enable real quiz generation?",
                    "option_a": "Restart the program",
                    "option_b": "Delete the database",
                    "option_c": "Use a different URL",
                    "option_d": "Set WIKIQUIZ_AI_API_KEY or GOOGLE_API_KEY",
                    "correct_answer": "D",
                    "explanation": "The real adapter is used whenever an API key is present.",
                    "difficulty": "hard"
                }
            ],
            "related_topics": [
                {"topic_title": "Wikipedia", "topic_url": "https://en.wikipedia.org/wiki/Wikipedia"}
            ]
        });

        Ok(format!("Here is your quiz:\n```json\n{:#}\n```", quiz))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_adapter_reply_is_fenced() {
        let adapter = MockLlmAdapter::with_delay(1);
        let reply = adapter
            .complete("Article Title: Octopus\nArticle Content: ...", 0.7)
            .await
            .unwrap();
        assert!(reply.contains("```json"));
        assert!(reply.contains("Octopus"));
    }

    #[test]
    fn test_title_from_prompt_fallback() {
        assert_eq!(MockLlmAdapter::title_from_prompt("no title here"), "this article");
    }
}
