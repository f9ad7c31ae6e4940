use thiserror::Error;

/// Result type alias for relay operations
pub type Result<T, E = UpdaterError> = std::result::Result<T, E>;

/// Errors that can occur while handling an update request
#[derive(Error, Debug)]
pub enum UpdaterError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Failed to read request body: {0}")]
    RequestBodyError(String),

    #[error("Response serialization error: {0}")]
    ResponseSerializationError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error(transparent)]
    Upstream(#[from] crate::wordpress::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
