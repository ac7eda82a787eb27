//! Error types for memo.

use thiserror::Error;

/// Result type alias using memo's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for memo operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(uuid::Uuid),

    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

impl Error {
    /// True for errors caused by missing or rejected credentials/settings.
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

/// Diagnostic fields reported by the remote store for a failed statement.
///
/// PostgreSQL reports a primary message plus optional detail, hint and
/// SQLSTATE code; all four are surfaced so callers can log them together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreErrorDetail {
    pub message: String,
    pub detail: Option<String>,
    pub hint: Option<String>,
    pub code: Option<String>,
}

impl StoreErrorDetail {
    /// Extract store diagnostics from an error.
    ///
    /// Database errors raised by PostgreSQL carry detail/hint/code; every
    /// other error only contributes its display message.
    pub fn from_error(err: &Error) -> Self {
        match err {
            Error::Database(sqlx::Error::Database(db_err)) => {
                let pg = db_err.try_downcast_ref::<sqlx::postgres::PgDatabaseError>();
                Self {
                    message: db_err.message().to_string(),
                    detail: pg.and_then(|e| e.detail()).map(str::to_string),
                    hint: pg.and_then(|e| e.hint()).map(str::to_string),
                    code: db_err.code().map(|c| c.into_owned()),
                }
            }
            Error::Database(other) => Self {
                message: other.to_string(),
                ..Default::default()
            },
            other => Self {
                message: other.to_string(),
                ..Default::default()
            },
        }
    }
}
