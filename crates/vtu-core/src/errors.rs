use thiserror::Error;

/// Failure modes of the client library.
///
/// `Api` carries the backend's human-readable message verbatim so the
/// terminal can surface it unchanged. Everything locally detected before a
/// request is issued is a `Validation` error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VtuError {
    #[error("{0}")]
    Api(String),
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not authenticated")]
    Unauthenticated,
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for VtuError {
    fn from(err: reqwest::Error) -> Self {
        VtuError::Transport(err.to_string())
    }
}

impl From<std::io::Error> for VtuError {
    fn from(err: std::io::Error) -> Self {
        VtuError::Io(err.to_string())
    }
}
