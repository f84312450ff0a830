use thiserror::Error;

/// Transport- and configuration-level faults. Malformed schedule content
/// is never an error anywhere in the pipeline; only collaborator and I/O
/// failures surface here.
#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Text generator error: {0}")]
    Generator(String),
    #[error("Calendar error: {0}")]
    Calendar(String),
}
