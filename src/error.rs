use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unparseable {field} value {raw:?}")]
    MeasurementParse { field: &'static str, raw: String },

    #[error("Invalid date filter {0:?}: expected MM-DD")]
    InvalidDateFilter(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Async task error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
