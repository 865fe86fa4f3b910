use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for graphload.
#[derive(Error, Debug)]
pub enum GraphloadError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    #[error("Invalid {kind}: {reason}")]
    InvalidItem { kind: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, GraphloadError>;
