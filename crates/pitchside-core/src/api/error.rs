//! Failure taxonomy for football API calls.

use thiserror::Error;

/// Why a call produced no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    HttpStatus,
    Transport,
    Unexpected,
    EmptyResult,
}

impl FailureKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::HttpStatus => "http_status",
            Self::Transport => "transport",
            Self::Unexpected => "unexpected",
            Self::EmptyResult => "empty_result",
        }
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    /// The server answered with a non-2xx status.
    #[error("HTTP error occurred: {status} - {body}")]
    Status { status: u16, body: String },
    /// Connect, DNS, timeout or body-read failure.
    #[error("Request error: {0}")]
    Transport(String),
    #[error("Unexpected error: {0}")]
    Unexpected(String),
    /// The API answered but the payload was empty.
    #[error("API returned no data")]
    Empty,
}

impl FetchError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Status { .. } => FailureKind::HttpStatus,
            Self::Transport(_) => FailureKind::Transport,
            Self::Unexpected(_) => FailureKind::Unexpected,
            Self::Empty => FailureKind::EmptyResult,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            FetchError::Unexpected(e.to_string())
        } else if let Some(status) = e.status() {
            FetchError::Status {
                status: status.as_u16(),
                body: String::new(),
            }
        } else {
            FetchError::Transport(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_match_variants() {
        let status = FetchError::Status {
            status: 403,
            body: "forbidden".into(),
        };
        assert_eq!(status.kind(), FailureKind::HttpStatus);
        assert_eq!(status.to_string(), "HTTP error occurred: 403 - forbidden");
        assert_eq!(FetchError::Transport("dns".into()).kind(), FailureKind::Transport);
        assert_eq!(FetchError::Empty.kind().label(), "empty_result");
    }
}
