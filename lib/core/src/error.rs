use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Request-level failures. Any of these aborts a matching run as a whole.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    #[error("Invalid embedding dimension: expected {expected}, got {actual}")]
    InvalidDimension { expected: usize, actual: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Per-report image failures.
///
/// These are recovered inside the extraction stage: the report is dropped
/// from pairing and the run continues.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImageAccessError {
    #[error("report has no image path")]
    MissingPath,

    #[error("image not found: {0}")]
    NotFound(String),

    #[error("image unreadable: {path}: {reason}")]
    Unreadable { path: String, reason: String },

    #[error("unsupported image extension: {0}")]
    UnsupportedExtension(String),

    #[error("image decode failed: {path}: {reason}")]
    Decode { path: String, reason: String },
}
