use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("Could not parse '{path}': {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error
    },
    #[error("Separator {0:?} must be a single ASCII character other than a quote or a line break")]
    InvalidSeparator(char),
    #[error("Batch size must be greater than zero")]
    InvalidBatchSize
}

impl ConfigError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }

    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json { path: path.display().to_string(), source }
    }
}
