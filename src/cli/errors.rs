use std::path::PathBuf;

use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid config file {path:?}: {source}")]
    InvalidConfig {
        path: PathBuf,
        source: inundex::Error,
    },

    #[error("Cannot read URL list {path:?}: {source}")]
    UrlList {
        path: PathBuf,
        source: inundex::Error,
    },

    #[error(transparent)]
    Inundex(#[from] inundex::Error),
}
