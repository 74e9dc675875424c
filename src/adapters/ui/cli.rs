//! Implements InputPort for one-shot, non-interactive use.
//!
//! `generate <url>`, `history`, `show <quiz_id>`; results are printed as JSON.

use crate::adapters::ui::render::{GENERATED_MESSAGE, GenerateQuizResponse, QuizEntry};
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::usecases::QuizService;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

pub const USAGE: &str = "usage: wikiquiz [generate <wikipedia_url> | history | show <quiz_id>]";

/// Exit status for a client-side failure (bad URL, unknown id).
pub const EXIT_CLIENT_FAULT: i32 = 2;
/// Exit status for upstream or storage failures.
pub const EXIT_SERVER_FAULT: i32 = 1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate { url: String },
    History,
    Show { quiz_id: String },
}

impl Command {
    /// Parse arguments after the program name. `Ok(None)` means no command (interactive mode).
    pub fn parse(args: &[String]) -> Result<Option<Self>, String> {
        match args {
            [] => Ok(None),
            [cmd, url] if cmd == "generate" => Ok(Some(Command::Generate { url: url.clone() })),
            [cmd] if cmd == "history" => Ok(Some(Command::History)),
            [cmd, id] if cmd == "show" => Ok(Some(Command::Show {
                quiz_id: id.clone(),
            })),
            _ => Err(USAGE.to_string()),
        }
    }
}

pub fn exit_code(err: &DomainError) -> i32 {
    if err.is_client_fault() {
        EXIT_CLIENT_FAULT
    } else {
        EXIT_SERVER_FAULT
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DomainError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| DomainError::Ui(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

/// CLI adapter. Runs one command and returns.
pub struct CliInputPort {
    service: Arc<QuizService>,
    command: Command,
}

impl CliInputPort {
    pub fn new(service: Arc<QuizService>, command: Command) -> Self {
        Self { service, command }
    }
}

#[async_trait]
impl InputPort for CliInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        match &self.command {
            Command::Generate { url } => {
                let record = self.service.generate(url).await?;
                print_json(&GenerateQuizResponse {
                    record: &record,
                    message: GENERATED_MESSAGE,
                })
            }
            Command::History => {
                let records = self.service.history().await?;
                let entries: Vec<QuizEntry<'_>> = records.iter().map(QuizEntry::from).collect();
                print_json(&entries)
            }
            Command::Show { quiz_id } => {
                let record = self.service.quiz(quiz_id).await?;
                print_json(&QuizEntry::from(&record))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExtractionError, SynthesisError};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(&[]).unwrap(), None);
        assert_eq!(
            Command::parse(&args(&["generate", "https://en.wikipedia.org/wiki/Octopus"])).unwrap(),
            Some(Command::Generate {
                url: "https://en.wikipedia.org/wiki/Octopus".into()
            })
        );
        assert_eq!(Command::parse(&args(&["history"])).unwrap(), Some(Command::History));
        assert_eq!(
            Command::parse(&args(&["show", "abc"])).unwrap(),
            Some(Command::Show {
                quiz_id: "abc".into()
            })
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(Command::parse(&args(&["generate"])).is_err());
        assert!(Command::parse(&args(&["delete", "x"])).is_err());
    }

    #[test]
    fn test_exit_codes() {
        let client: DomainError = ExtractionError::InvalidUrl("x".into()).into();
        let server: DomainError = SynthesisError::UnparsableResponse("x".into()).into();
        assert_eq!(exit_code(&client), EXIT_CLIENT_FAULT);
        assert_eq!(exit_code(&server), EXIT_SERVER_FAULT);
        assert_eq!(exit_code(&DomainError::NotFound("q".into())), EXIT_CLIENT_FAULT);
    }
}
