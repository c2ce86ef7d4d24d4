use std::time::Duration;

use thiserror::Error;

/// Failure to get a usable answer out of the form relay.
///
/// The cause is kept for logs only; users see `SubmissionError::Transport`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("form relay did not answer within {0:?}")]
    Timeout(Duration),
    #[error("form relay request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("form relay returned an unreadable body: {0}")]
    Decode(String),
}

/// A `submit` call that was refused without issuing a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SubmitRejected {
    #[error("a submission is already in flight")]
    InFlight,
    #[error("the previous submission succeeded; reset the form first")]
    AwaitingReset,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
}

#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    #[error("failed to read knowledge base file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse knowledge base: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("knowledge base has no entries")]
    Empty,
    #[error("entry '{0}' has no keywords")]
    NoKeywords(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid relay endpoint '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        source: url::ParseError,
    },
    #[error("relay endpoint must use http or https, got '{0}'")]
    UnsupportedScheme(String),
}
