use thiserror::Error;

pub type BackendResult<T> = Result<T, BackendError>;

/// Errors from backend calls. Each call fails independently; whether a
/// failure is recovered or propagated is the caller's policy.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("Variable not found: {0}")]
    NotFound(String),

    #[error("Lookup failed for {name}: {message}")]
    Lookup { name: String, message: String },

    #[error("Failed to apply update to {name}: {message}")]
    Apply { name: String, message: String },

    #[error("Graph import failed: {0}")]
    Import(String),

    #[error("Backend transport error: {0}")]
    Transport(String),
}
