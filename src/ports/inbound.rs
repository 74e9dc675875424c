//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: CLI/TUI drives the quiz use cases.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run until the user (or the one-shot command) is done.
    async fn run(&self) -> Result<(), DomainError>;
}
