use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SensorDocsError {
    #[error("Root directory does not exist: {path}")]
    RootNotFound { path: PathBuf },

    #[error("Document not found: {path}")]
    DocumentNotFound { path: PathBuf },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Document is out of date: {path} (run `sensor-docs update`)")]
    Stale { path: PathBuf },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SensorDocsError>;

impl SensorDocsError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Stale { .. } => 2,
            Self::DocumentNotFound { .. } => 3,
            Self::RootNotFound { .. } => 4,
            Self::ConfigParse { .. } | Self::InvalidConfig { .. } => 5,
            _ => 1,
        }
    }
}
