//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Converts underlying I/O, GDAL, download, CSV and JSON errors, and provides
//! semantic variants for configuration validation.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GDAL error: {0}")]
    Gdal(#[from] crate::io::GdalError),

    #[error("Download error: {0}")]
    Fetch(#[from] crate::io::FetchError),

    #[error("Table error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to replace output table: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("Sample limit must be greater than 0, got: {limit}")]
    ZeroSampleLimit { limit: usize },
}
