use thiserror::Error;

#[derive(Error, Debug)]
pub enum BinderyError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Name already in use: {0}")]
    NameConflict(String),

    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, BinderyError>;
