use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_REJECTION_MESSAGE: &str = "Что-то пошло не так";
pub const NETWORK_ERROR_MESSAGE: &str = "Ошибка сети. Попробуйте еще раз.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    RemoteRejection,
    Transport,
}

/// Why a submission attempt failed, in the form shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum SubmissionError {
    #[error("{message}")]
    RemoteRejection { message: String },
    #[error("{}", NETWORK_ERROR_MESSAGE)]
    Transport,
}

impl SubmissionError {
    /// Rejection carrying the relay's message, or the default text when it sent none.
    pub fn rejected(message: Option<&str>) -> Self {
        Self::RemoteRejection {
            message: message.unwrap_or(DEFAULT_REJECTION_MESSAGE).to_string(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::RemoteRejection { .. } => ErrorCode::RemoteRejection,
            Self::Transport => ErrorCode::Transport,
        }
    }

    pub fn user_message(&self) -> String {
        self.to_string()
    }
}
