use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The personnel/branch directory could not be read.
    Upstream,
    /// The directory did not pass its health check.
    Unavailable,
}

#[derive(Debug, Clone, Serialize, Deserialize, Error)]
#[error("{code:?}: {message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown status category '{0}'")]
    UnknownStatus(String),
    #[error("unknown parade type '{0}' (expected first or last)")]
    UnknownParade(String),
}

#[cfg(test)]
#[path = "tests/error_tests.rs"]
mod tests;
