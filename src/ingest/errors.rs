use crate::models::BatchError;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("There is no folder '{folder}'. Please verify.")]
    FolderNotFound {
        folder: String
    },
    #[error("No transaction file with pattern '{pattern}' and extension '{extension}' found in folder '{folder}'")]
    FileNotFound {
        pattern: String,
        extension: String,
        folder: String
    },
    #[error("Provided CSV file is empty.")]
    EmptyFile,
    #[error("Provided CSV file has no rows.")]
    NoRows,
    #[error("Provided CSV file missed the following headers: {}", .columns.join(", "))]
    MissingColumns {
        columns: Vec<String>
    },
    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Batch(#[from] BatchError)
}

impl IngestError {
    pub fn folder_not_found(folder: &Path) -> Self {
        Self::FolderNotFound { folder: folder.display().to_string() }
    }

    pub fn file_not_found(folder: &Path, pattern: &str, extension: &str) -> Self {
        Self::FileNotFound {
            pattern: pattern.to_string(),
            extension: extension.to_string(),
            folder: folder.display().to_string()
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}
