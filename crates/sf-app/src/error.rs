//! Error types for the sf-app service layer.

use std::path::PathBuf;

/// Application error wrapping the pipeline crates behind one interface.
///
/// Parse and apply failures carry messages intended for the end user
/// verbatim; recovered lookup failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    Parse(#[from] sf_scenario::ParseError),

    #[error("{0}")]
    Contract(#[from] sf_core::SfError),

    #[error("{0}")]
    Wiring(#[from] sf_wiring::WiringError),

    #[error("{0}")]
    Backend(#[from] sf_backend::BackendError),

    #[error("Scenario \"{0}\" not found")]
    ScenarioNotFound(String),

    #[error("Failed to read scenario file: {path}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV output error: {0}")]
    CsvOutput(#[from] csv::Error),

    #[error("Tensor encoding error: {0}")]
    TensorEncode(#[from] serde_json::Error),
}

/// Result type for sf-app operations.
pub type AppResult<T> = Result<T, AppError>;
