//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here; the pipeline lives in QuizService.

use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use wikiquiz::adapters::ai::{MockLlmAdapter, OpenAiAdapter};
use wikiquiz::adapters::persistence::SqliteRepo;
use wikiquiz::adapters::ui::cli::{CliInputPort, Command, USAGE, exit_code};
use wikiquiz::adapters::ui::render::ErrorResponse;
use wikiquiz::adapters::ui::tui::TuiInputPort;
use wikiquiz::adapters::wiki::ReqwestPageFetcher;
use wikiquiz::ports::{InputPort, LlmPort, PageFetcher, QuizRepoPort};
use wikiquiz::shared::config::AppConfig;
use wikiquiz::usecases::{ContentExtractor, QuizService, QuizSynthesizer, SynthesisOptions};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match Command::parse(&args) {
        Ok(command) => command,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(2);
        }
    };

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    info!(path = %data_path.display(), "data directory");

    // --- Outbound adapters ---
    let fetch_timeout = Duration::from_secs(cfg.fetch_timeout_secs_or_default());
    let fetcher: Arc<dyn PageFetcher> = Arc::new(
        ReqwestPageFetcher::new(&cfg.user_agent_or_default(), fetch_timeout)
            .map_err(|e| anyhow::anyhow!("{}", e))?,
    );

    let llm: Arc<dyn LlmPort> = match cfg.llm_config() {
        Some(llm_cfg) => {
            info!(model = %llm_cfg.model, url = %llm_cfg.api_url, "LLM enabled with OpenAI-compatible adapter");
            Arc::new(OpenAiAdapter::new(llm_cfg))
        }
        None => {
            warn!("WIKIQUIZ_AI_API_KEY / GOOGLE_API_KEY not set, using mock LLM adapter");
            Arc::new(MockLlmAdapter::new())
        }
    };

    let repo: Arc<dyn QuizRepoPort> = Arc::new(
        SqliteRepo::connect(&data_path)
            .await
            .map_err(|e| anyhow::anyhow!("SQLite connect failed: {}", e))?,
    );

    // --- Services ---
    let service = Arc::new(QuizService::new(
        ContentExtractor::new(fetcher),
        QuizSynthesizer::new(llm, SynthesisOptions::default()),
        repo,
    ));

    // --- Run (one-shot command, or interactive menu) ---
    let input_port: Arc<dyn InputPort> = match command {
        Some(command) => Arc::new(CliInputPort::new(Arc::clone(&service), command)),
        None => {
            wikiquiz::adapters::ui::init_ui();
            info!("{}", USAGE);
            Arc::new(TuiInputPort::new(Arc::clone(&service)))
        }
    };

    if let Err(e) = input_port.run().await {
        error!(status = e.status_code(), error = %e, "request failed");
        let body = ErrorResponse::from(&e);
        match serde_json::to_string_pretty(&body) {
            Ok(json) => eprintln!("{}", json),
            Err(_) => eprintln!("{}", e),
        }
        std::process::exit(exit_code(&e));
    }

    Ok(())
}
