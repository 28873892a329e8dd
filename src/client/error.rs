use std::fmt;

/// Client-side failure taxonomy. Nothing here retries: a failed call
/// surfaces once and recovery is user-initiated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Rejected before any network call was made.
    Validation(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
    NotFound(String),
    /// The 15-second deadline elapsed; the operation was aborted.
    Timeout,
    Server(String),
    Network(String),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ClientError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ClientError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ClientError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ClientError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ClientError::Timeout => {
                write!(f, "Request timed out. Please check your connection.")
            }
            ClientError::Server(msg) => write!(f, "Server error: {}", msg),
            ClientError::Network(msg) => write!(f, "Network error: {}", msg),
        }
    }
}

impl std::error::Error for ClientError {}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
