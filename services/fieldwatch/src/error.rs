//! Error types for the fieldwatch service

/// Errors that can occur while starting or running the service
#[derive(Debug, thiserror::Error)]
pub enum FieldwatchError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dashboard error: {0}")]
    Dashboard(String),
}

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, FieldwatchError>;

/// Failure of a single backend call.
///
/// Every backend operation reports one of these instead of a value. None of
/// them are fatal; the presentation layer decides what the operator sees.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// The request never produced a response (connect failure, timeout,
    /// unreadable body)
    #[error("{0}")]
    Transport(String),

    /// The backend answered with something other than 200
    #[error("backend returned status {0}")]
    Status(u16),

    /// The backend answered 200 but the body was not the expected JSON
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<FieldwatchError> for FetchError {
    fn from(err: FieldwatchError) -> Self {
        match err {
            FieldwatchError::Http(msg) => FetchError::Transport(msg),
            FieldwatchError::Json(e) => FetchError::Decode(e.to_string()),
            other => FetchError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}
