//! Application-wide error types.

use thiserror::Error;

use crate::llm::ProviderError;
use crate::subsystems::agents::TurnError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error("memory error: {0}")]
    Memory(String),

    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("turn failed: {0}")]
    Turn(#[from] TurnError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
