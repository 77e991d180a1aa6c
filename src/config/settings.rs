use crate::config::errors::ConfigError;
use crate::ingest::ReadOptions;
use crate::models::CategoryMapping;
use crate::pipeline::{CONTRACTOR_FIELD, TITLE_FIELD};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const FILES_FOLDER: &str = "files";

/// Everything a run needs to know about folders, the export's dialect and its columns.
///
/// Any field left out of the settings file takes its default, which matches the
/// ING "Lista transakcji" export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub task_name: String,
    pub input_folder: PathBuf,
    pub file_pattern: String,
    pub file_extension: String,
    pub separator: char,
    pub batch_size: usize,
    pub account_value: String,
    pub amount_field: String,
    pub account_field: String,
    pub contractor_field: String,
    pub title_field: String,
    pub mandatory_fields: Vec<String>,
    /// JSON object of contractor substring to category label.
    pub contractor_mapping: PathBuf,
    /// JSON object of title substring to category label.
    pub title_mapping: PathBuf,
    pub uncategorised_folder: PathBuf,
    pub output_folder: PathBuf,
    pub logs_folder: PathBuf
}

impl Default for Settings {
    fn default() -> Self {
        let files = PathBuf::from(FILES_FOLDER);
        let amount_field = "Kwota transakcji (waluta rachunku)".to_string();
        let account_field = "Konto".to_string();

        Self {
            task_name: "Task_ING_summary".to_string(),
            input_folder: files.clone(),
            file_pattern: "lista_transakcji_nr_".to_string(),
            file_extension: ".csv".to_string(),
            separator: ';',
            batch_size: 100,
            account_value: "KONTO Direct - KD".to_string(),
            mandatory_fields: vec![
                "Data transakcji".to_string(),
                CONTRACTOR_FIELD.to_string(),
                TITLE_FIELD.to_string(),
                amount_field.clone(),
                account_field.clone(),
            ],
            amount_field,
            account_field,
            contractor_field: CONTRACTOR_FIELD.to_string(),
            title_field: TITLE_FIELD.to_string(),
            contractor_mapping: files.join("contractor_mapping.json"),
            title_mapping: files.join("title_mapping.json"),
            uncategorised_folder: files.join("uncategorised"),
            output_folder: files.join("output"),
            logs_folder: PathBuf::from("logs")
        }
    }
}

impl Settings {
    /// Reads settings from a JSON file and checks them.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading settings from {}", path.display());

        let content = fs::read_to_string(path).map_err(|error| ConfigError::io(path, error))?;
        let settings: Settings = serde_json::from_str(&content).map_err(|error| ConfigError::json(path, error))?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.separator_byte()?;

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize)
        }

        Ok(())
    }

    pub fn read_options(&self) -> Result<ReadOptions, ConfigError> {
        Ok(ReadOptions::default()
            .with_separator(self.separator_byte()?)
            .with_batch_size(self.batch_size))
    }

    //NOTE: the csv reader reserves '"' for quoting and line breaks for records
    fn separator_byte(&self) -> Result<u8, ConfigError> {
        match u8::try_from(self.separator) {
            Ok(byte) if byte.is_ascii() && !matches!(byte, b'"' | b'\n' | b'\r') => Ok(byte),
            _ => Err(ConfigError::InvalidSeparator(self.separator))
        }
    }

    /// Log file for INFO and above; its `_all` sibling receives everything.
    pub fn log_file(&self) -> PathBuf {
        self.logs_folder.join(format!("{}.log", self.task_name))
    }

    pub fn debug_log_file(&self) -> PathBuf {
        self.logs_folder.join(format!("{}_all.log", self.task_name))
    }
}

/// Reads a substring → label mapping, keeping the order of the keys in the file.
pub fn load_mapping(path: &Path) -> Result<CategoryMapping, ConfigError> {
    let content = fs::read_to_string(path).map_err(|error| ConfigError::io(path, error))?;
    let mapping: CategoryMapping = serde_json::from_str(&content).map_err(|error| ConfigError::json(path, error))?;

    debug!("Loaded {} mapping keys from {}", mapping.len(), path.display());

    if mapping.is_empty() {
        warn!("Mapping file {} has no keys, nothing will be categorised by it", path.display());
    }

    Ok(mapping)
}
