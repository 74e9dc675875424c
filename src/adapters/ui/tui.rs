//! Implements InputPort. Inquire-based interactive menu.
//!
//! Generate a quiz from a URL, browse history, and take a quiz question by question.

use crate::adapters::ui::render::{history_label, option_lines, render_quiz};
use crate::domain::{DomainError, QuizRecord};
use crate::ports::InputPort;
use crate::usecases::QuizService;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, InquireError, Select, Text};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Applies the prompt theme to every subsequent inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightBlue))
        .with_highlighted_option_prefix(Styled::new("❯").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Generate,
    History,
    OpenById,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 4] = [
        MenuAction::Generate,
        MenuAction::History,
        MenuAction::OpenById,
        MenuAction::Quit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Generate => "Generate quiz from Wikipedia URL",
            MenuAction::History => "Quiz history",
            MenuAction::OpenById => "Open quiz by id",
            MenuAction::Quit => "Quit",
        };
        f.write_str(label)
    }
}

/// Score for one pass through a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.correct, self.total)
    }
}

/// Map inquire errors; Esc / Ctrl-C become `Ok(None)` so menus can back out.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(v) => Ok(Some(v)),
        Err(InquireError::OperationCanceled) | Err(InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    service: Arc<QuizService>,
}

impl TuiInputPort {
    pub fn new(service: Arc<QuizService>) -> Self {
        Self { service }
    }

    async fn generate(&self) -> Result<(), DomainError> {
        let Some(url) = prompt_result(
            Text::new("Wikipedia article URL:")
                .with_placeholder("https://en.wikipedia.org/wiki/Octopus")
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let pb = spinner("Reading article and generating quiz");
        let result = self.service.generate(&url).await;
        pb.finish_and_clear();

        match result {
            Ok(record) => self.present(&record),
            Err(e) if e.is_client_fault() => {
                println!("✗ {}", e);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "quiz generation failed");
                println!("✗ Quiz generation failed: {}", e);
                Ok(())
            }
        }
    }

    async fn history(&self) -> Result<(), DomainError> {
        let records = self.service.history().await?;
        if records.is_empty() {
            println!("No quizzes yet.");
            return Ok(());
        }
        let labels: Vec<String> = records.iter().map(history_label).collect();
        let Some(choice) = prompt_result(Select::new("Pick a quiz", labels.clone()).prompt())?
        else {
            return Ok(());
        };
        match labels.iter().position(|l| *l == choice) {
            Some(idx) => self.present(&records[idx]),
            None => Ok(()),
        }
    }

    async fn open_by_id(&self) -> Result<(), DomainError> {
        let Some(id) = prompt_result(Text::new("Quiz id:").prompt())? else {
            return Ok(());
        };
        match self.service.quiz(&id).await {
            Ok(record) => self.present(&record),
            Err(e @ DomainError::NotFound(_)) => {
                println!("✗ {}", e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Print the quiz, then offer to take it or reveal the answers.
    fn present(&self, record: &QuizRecord) -> Result<(), DomainError> {
        println!("\n{}", render_quiz(record, false));
        println!("Quiz id: {}\n", record.quiz.id);

        let take = prompt_result(Confirm::new("Take this quiz now?").with_default(true).prompt())?;
        if take == Some(true) {
            if let Some(score) = take_quiz(record)? {
                println!("\nScore: {}\n", score);
            }
        } else if prompt_result(Confirm::new("Show answers?").with_default(false).prompt())?
            == Some(true)
        {
            println!("\n{}", render_quiz(record, true));
        }
        Ok(())
    }
}

/// Ask each question in order. `None` if the user backs out midway.
fn take_quiz(record: &QuizRecord) -> Result<Option<Score>, DomainError> {
    let total = record.quiz.questions.len();
    let mut correct = 0;
    for q in &record.quiz.questions {
        let prompt = format!("{}/{} {}", q.order, total, q.question_text);
        let Some(choice) = prompt_result(Select::new(&prompt, option_lines(q)).prompt())? else {
            return Ok(None);
        };
        let letter = choice.chars().next().unwrap_or(' ');
        if q.is_correct(letter) {
            correct += 1;
            println!("✓ Correct. {}", q.explanation);
        } else {
            println!("✗ The answer was {}. {}", q.correct_answer, q.explanation);
        }
    }
    Ok(Some(Score { correct, total }))
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let action = prompt_result(
                Select::new("What would you like to do?", MenuAction::ALL.to_vec()).prompt(),
            )?;
            match action {
                Some(MenuAction::Generate) => self.generate().await?,
                Some(MenuAction::History) => self.history().await?,
                Some(MenuAction::OpenById) => self.open_by_id().await?,
                Some(MenuAction::Quit) | None => return Ok(()),
            }
        }
    }
}
