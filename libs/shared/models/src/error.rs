use thiserror::Error;

/// Normalized failure outcome for every client operation. Nothing in the
/// client propagates a panic past the orchestration boundary; network and
/// server failures are flattened into a human-readable message that the UI
/// surfaces verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Request failed: {0}")]
    Api(String),

    #[error("Stored session unreadable: {0}")]
    Storage(String),
}

impl ClientError {
    /// The user-facing message, without the taxonomy prefix.
    pub fn message(&self) -> &str {
        match self {
            ClientError::Validation(msg)
            | ClientError::Auth(msg)
            | ClientError::Conflict(msg)
            | ClientError::NotFound(msg)
            | ClientError::Api(msg)
            | ClientError::Storage(msg) => msg,
        }
    }
}
