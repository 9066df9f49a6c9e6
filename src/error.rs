//! Error handling for the tunedive application
//!
//! Hierarchical error system with typed sub-errors per concern. Adapter-level
//! failures never surface through these types: the dispatcher downgrades them
//! to empty results and a user-visible notice, so anything reaching `main`
//! through `TunediveError` is a genuine local problem (bad config, failed
//! export write, broken terminal).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TunediveError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API response invalid: {reason}")]
    InvalidResponse { reason: String },

    #[error("Service unavailable")]
    ServiceUnavailable,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Environment variable error: {0}")]
    Environment(#[from] std::env::VarError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Nothing to export")]
    Empty,

    #[error("Export path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, TunediveError>;

impl From<std::io::Error> for TunediveError {
    fn from(err: std::io::Error) -> Self {
        TunediveError::Export(ExportError::Io(err))
    }
}

impl From<toml::de::Error> for TunediveError {
    fn from(err: toml::de::Error) -> Self {
        TunediveError::Config(ConfigError::InvalidFormat(err))
    }
}
