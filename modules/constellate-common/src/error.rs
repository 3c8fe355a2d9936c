use arena_client::ArenaError;
use thiserror::Error;

use crate::types::SearchStage;

pub type Result<T> = std::result::Result<T, ConstellateError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConstellateError {
    #[error("Invalid URL: {0}")]
    InvalidInput(String),

    #[error("Network failure during {stage}: {message}")]
    NetworkFailure {
        stage: SearchStage,
        message: String,
    },

    #[error("Could not decode response during {stage}: {message}")]
    DecodeFailure {
        stage: SearchStage,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ConstellateError {
    /// Classify a client error and attach the stage it happened in.
    pub fn from_arena(stage: SearchStage, err: ArenaError) -> Self {
        let message = err.to_string();
        if err.is_decode() {
            ConstellateError::DecodeFailure { stage, message }
        } else {
            ConstellateError::NetworkFailure { stage, message }
        }
    }
}
