//! OpenAI-compatible adapter for quiz synthesis.
//!
//! Works against OpenAI, Gemini's OpenAI-compatible endpoint, and local Ollama.
//! Returns the raw reply text; structured parsing happens in the synthesizer.

use crate::domain::SynthesisError;
use crate::ports::LlmPort;
use crate::shared::config::LlmConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Error bodies are cut to this many chars in the returned error.
const ERROR_BODY_CHARS: usize = 200;

/// OpenAI-compatible chat completions adapter.
///
/// Can be configured to work with:
/// - Gemini (generativelanguage.googleapis.com/v1beta/openai)
/// - OpenAI API (api.openai.com)
/// - Ollama (localhost)
pub struct OpenAiAdapter {
    client: reqwest::Client,
    config: LlmConfig,
}

impl OpenAiAdapter {
    /// Create a new adapter. No request timeout is set; a stalled model call
    /// holds its request until the server gives up.
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    #[serde(default)]
    content: Option<String>,
}

/// Map a non-2xx reply to `CallFailure`, keeping the head of the body.
fn api_error(status: StatusCode, body: &str) -> SynthesisError {
    SynthesisError::CallFailure(format!(
        "API error {}: {}",
        status,
        body.chars().take(ERROR_BODY_CHARS).collect::<String>()
    ))
}

/// Text of the first choice; a reply without one is a failed call.
fn first_content(response: ChatResponse) -> Result<String, SynthesisError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| SynthesisError::CallFailure("No response choices returned".to_string()))
}

#[async_trait::async_trait]
impl LlmPort for OpenAiAdapter {
    async fn complete(&self, prompt: &str, temperature: f32) -> Result<String, SynthesisError> {
        info!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "sending prompt to LLM"
        );

        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SynthesisError::CallFailure(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "LLM API returned error");
            return Err(api_error(status, &text));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            SynthesisError::CallFailure(format!("Failed to parse API response: {}", e))
        })?;

        let content = first_content(chat_response)?;

        debug!(raw_len = content.len(), "received LLM reply");
        Ok(content)
    }
}
