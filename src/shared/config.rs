//! Application configuration. LLM credentials, fetch settings, paths.

use serde::Deserialize;

/// Default page fetch timeout. The LLM call deliberately has none.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Gemini's OpenAI-compatible chat completions endpoint.
pub const DEFAULT_AI_API_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions";

pub const DEFAULT_AI_MODEL: &str = "gemini-2.5-flash";

/// Wikipedia serves reduced markup to unknown agents; look like a desktop browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory holding quizzes.db. Read from WIKIQUIZ_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Page fetch timeout in seconds (default 20). Read from WIKIQUIZ_FETCH_TIMEOUT_SECS.
    #[serde(default)]
    pub fetch_timeout_secs: Option<u64>,

    /// User-Agent sent with page fetches. Read from WIKIQUIZ_USER_AGENT.
    #[serde(default)]
    pub user_agent: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // LLM Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// LLM API key. Read from WIKIQUIZ_AI_API_KEY, falling back to GOOGLE_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// OpenAI-compatible chat completions URL. Read from WIKIQUIZ_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gemini-2.5-flash". Read from WIKIQUIZ_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,
}

/// Everything the LLM adapter needs, injected at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("WIKIQUIZ"));
        if let Ok(path) = std::env::var("WIKIQUIZ_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // FETCH_TIMEOUT_SECS arrives as a string from the environment source
        if let Ok(s) = std::env::var("WIKIQUIZ_FETCH_TIMEOUT_SECS") {
            if let Ok(secs) = s.parse::<u64>() {
                cfg.fetch_timeout_secs = Some(secs);
            }
        }
        Ok(cfg)
    }

    /// Returns the data directory. Defaults to "./data".
    pub fn data_dir_or_default(&self) -> String {
        self.data_dir.clone().unwrap_or_else(|| "./data".to_string())
    }

    /// Returns the fetch timeout in seconds. Defaults to 20 if unset.
    pub fn fetch_timeout_secs_or_default(&self) -> u64 {
        self.fetch_timeout_secs.unwrap_or(DEFAULT_FETCH_TIMEOUT_SECS)
    }

    pub fn user_agent_or_default(&self) -> String {
        self.user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // LLM Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the API key if configured. Reads from config, WIKIQUIZ_AI_API_KEY or GOOGLE_API_KEY.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("WIKIQUIZ_AI_API_KEY").ok())
            .or_else(|| std::env::var("GOOGLE_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_API_URL.to_string())
    }

    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_AI_MODEL.to_string())
    }

    /// Collect LLM settings for the adapter. `None` when no key is configured.
    pub fn llm_config(&self) -> Option<LlmConfig> {
        self.ai_api_key().map(|api_key| LlmConfig {
            api_url: self.ai_api_url_or_default(),
            api_key,
            model: self.ai_model_or_default(),
        })
    }
}
