//! Quiz synthesis: article text -> prompt -> one LLM call -> `QuizDraft`.
//!
//! The reply is untrusted text. It is parsed by an ordered list of strategies
//! (`PARSE_STRATEGIES`); the first that yields a `QuizDraft` wins.

use crate::domain::{QuizDraft, SynthesisError};
use crate::ports::LlmPort;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Content longer than this is cut before it goes into the prompt.
pub const DEFAULT_MAX_PROMPT_CONTENT_CHARS: usize = 4000;

const FENCE: &str = "```";
const JSON_FENCE: &str = "```json";

/// Tunables for the synthesizer, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SynthesisOptions {
    pub temperature: f32,
    pub max_content_chars: usize,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            temperature: DEFAULT_TEMPERATURE,
            max_content_chars: DEFAULT_MAX_PROMPT_CONTENT_CHARS,
        }
    }
}

/// One way of pulling a `QuizDraft` out of the raw reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    /// The whole reply is the JSON object.
    Direct,
    /// Body of the first ```json fenced block.
    LabeledFence,
    /// Body of the first fenced block, whatever its label.
    AnyFence,
}

/// Order in which strategies are attempted.
pub const PARSE_STRATEGIES: [ParseStrategy; 3] = [
    ParseStrategy::Direct,
    ParseStrategy::LabeledFence,
    ParseStrategy::AnyFence,
];

impl fmt::Display for ParseStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParseStrategy::Direct => "direct",
            ParseStrategy::LabeledFence => "json fence",
            ParseStrategy::AnyFence => "any fence",
        };
        f.write_str(name)
    }
}

impl ParseStrategy {
    pub fn attempt(&self, raw: &str) -> Result<QuizDraft, String> {
        let candidate = match self {
            ParseStrategy::Direct => raw,
            ParseStrategy::LabeledFence => {
                labeled_fence_body(raw).ok_or_else(|| "no ```json block".to_string())?
            }
            ParseStrategy::AnyFence => {
                any_fence_body(raw).ok_or_else(|| "no fenced block".to_string())?
            }
        };
        serde_json::from_str(candidate.trim()).map_err(|e| e.to_string())
    }
}

/// Try each strategy in `PARSE_STRATEGIES` order.
pub fn parse_quiz_reply(raw: &str) -> Result<QuizDraft, SynthesisError> {
    let mut failures = Vec::with_capacity(PARSE_STRATEGIES.len());
    for strategy in PARSE_STRATEGIES {
        match strategy.attempt(raw) {
            Ok(draft) => {
                debug!(%strategy, "parsed LLM reply");
                return Ok(draft);
            }
            Err(e) => failures.push(format!("{}: {}", strategy, e)),
        }
    }
    warn!(
        reply = %raw.chars().take(200).collect::<String>(),
        "no parse strategy matched LLM reply"
    );
    Err(SynthesisError::UnparsableResponse(failures.join("; ")))
}

fn labeled_fence_body(raw: &str) -> Option<&str> {
    // ASCII lowercasing keeps byte offsets aligned with `raw`
    let start = raw.to_ascii_lowercase().find(JSON_FENCE)? + JSON_FENCE.len();
    let rest = &raw[start..];
    Some(rest.find(FENCE).map_or(rest, |end| &rest[..end]))
}

fn any_fence_body(raw: &str) -> Option<&str> {
    let start = raw.find(FENCE)? + FENCE.len();
    let rest = &raw[start..];
    let body = rest.find(FENCE).map_or(rest, |end| &rest[..end]);
    // drop an info string such as "JSON" or "javascript" on the opening line
    match body.split_once('\n') {
        Some((label, inner)) if !label.trim_start().starts_with(['{', '[']) => Some(inner),
        _ => Some(body),
    }
}

/// Build the single prompt sent to the model.
pub fn build_prompt(title: &str, content: &str) -> String {
    format!(
        r#"Based on the following article excerpt, generate exactly 4-5 multiple choice questions for a quiz.

Article Title: {title}
Article Content: {content}

Return ONLY a valid JSON object (no markdown, no code blocks) with this structure:
{{
  "questions": [
    {{
      "question_text": "Question here?",
      "option_a": "Option A",
      "option_b": "Option B",
      "option_c": "Option C",
      "option_d": "Option D",
      "correct_answer": "A",
      "explanation": "Brief explanation of the correct answer",
      "difficulty": "easy"
    }}
  ],
  "related_topics": [
    {{"topic_title": "Topic Name", "topic_url": "https://en.wikipedia.org/wiki/Topic_Name"}}
  ]
}}

Ensure:
- Each question tests understanding of key concepts from the article
- correct_answer is one of "A", "B", "C", "D"
- Difficulty levels are mixed (easy, medium, hard)
- Related topics are real Wikipedia articles related to the content
- Explanations are clear and educational
- All options are plausible but only one is correct"#
    )
}

/// Generates a `QuizDraft` from article text with one LLM call.
pub struct QuizSynthesizer {
    llm: Arc<dyn LlmPort>,
    options: SynthesisOptions,
}

impl QuizSynthesizer {
    pub fn new(llm: Arc<dyn LlmPort>, options: SynthesisOptions) -> Self {
        Self { llm, options }
    }

    /// Prompt, call once (no retry), parse.
    pub async fn synthesize(&self, title: &str, content: &str) -> Result<QuizDraft, SynthesisError> {
        let excerpt: String = content.chars().take(self.options.max_content_chars).collect();
        let prompt = build_prompt(title, &excerpt);

        let reply = self.llm.complete(&prompt, self.options.temperature).await?;
        let draft = parse_quiz_reply(&reply)?;

        info!(
            title,
            questions = draft.questions.len(),
            related_topics = draft.related_topics.len(),
            "quiz synthesized"
        );
        Ok(draft)
    }
}
