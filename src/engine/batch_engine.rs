use crate::config::Settings;
use crate::ingest::{locate_file, open_batches, validate, IngestError};
use crate::models::{BatchError, CategoryMapping, TransactionBatch};
use crate::pipeline::{categorise, no_category_values, start_with_no_category, transform};
use crate::types::{CATEGORY_FIELD, NO_CATEGORY};
use anyhow::{anyhow, Context};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::{debug, info};

/// Result of one run over a transaction export.
#[derive(Debug)]
pub struct RunOutput {
    /// The export that was processed.
    pub source: PathBuf,
    /// Spending rows of the configured account, uncategorised rows first.
    pub categorised: TransactionBatch,
    pub uncategorised_contractors: BTreeMap<String, String>,
    pub uncategorised_titles: BTreeMap<String, String>,
    /// Data rows read from the export, before filtering.
    pub rows_read: usize
}

impl RunOutput {
    pub fn uncategorised_rows(&self) -> usize {
        self.categorised.column(CATEGORY_FIELD)
            .map(|cells| cells.iter().filter(|cell| cell.as_text() == Some(NO_CATEGORY)).count())
            .unwrap_or(0)
    }
}

/// Runs the whole pipeline for one export: find it, read it batch by batch,
/// filter and categorise every batch, then prepare the review outputs.
pub struct BatchEngine {
    settings: Settings,
    contractor_mapping: CategoryMapping,
    title_mapping: CategoryMapping
}

impl BatchEngine {
    pub fn new(settings: Settings, contractor_mapping: CategoryMapping, title_mapping: CategoryMapping) -> Self {
        Self {
            settings,
            contractor_mapping,
            title_mapping
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Processes the export found in the configured input folder.
    ///
    /// Batches are handled one at a time; the first failure stops the run.
    pub fn run(&self) -> anyhow::Result<RunOutput> {
        let settings = &self.settings;
        let source = locate_file(&settings.input_folder, &settings.file_pattern, &settings.file_extension)?;

        info!("Processing transaction file: {}", source.display());

        let mut batches = open_batches(&source, &settings.read_options()?)?;
        let first = batches.next().transpose()?;
        validate(first.as_ref(), &settings.mandatory_fields)
            .with_context(|| format!("Invalid transaction file '{}'", source.display()))?;

        let mut categorised: Option<TransactionBatch> = None;
        let mut rows_read = 0usize;

        for (index, batch) in first.into_iter().map(Ok::<_, IngestError>).chain(batches).enumerate() {
            let batch = batch?;
            let processed = self.process_batch(&batch)
                .with_context(|| format!("Failed to process batch {index} starting at data row {}", rows_read + 1))?;

            debug!("Batch {index}: kept {} of {} rows", processed.len(), batch.len());
            rows_read += batch.len();

            match categorised.as_mut() {
                Some(all) => all.append(processed)?,
                None => categorised = Some(processed)
            }
        }

        let categorised = categorised.ok_or_else(|| anyhow!("No batches were read from '{}'", source.display()))?;
        let categorised = start_with_no_category(&categorised, CATEGORY_FIELD, NO_CATEGORY)?;
        let uncategorised_contractors = no_category_values(&categorised, &settings.contractor_field, CATEGORY_FIELD, NO_CATEGORY)?;
        let uncategorised_titles = no_category_values(&categorised, &settings.title_field, CATEGORY_FIELD, NO_CATEGORY)?;

        info!(
            "Categorised {} of {} rows; {} contractors and {} titles left without a category",
            categorised.len(),
            rows_read,
            uncategorised_contractors.len(),
            uncategorised_titles.len()
        );

        Ok(RunOutput {
            source,
            categorised,
            uncategorised_contractors,
            uncategorised_titles,
            rows_read
        })
    }

    fn process_batch(&self, batch: &TransactionBatch) -> Result<TransactionBatch, BatchError> {
        let settings = &self.settings;
        let spending = transform(
            batch,
            &settings.mandatory_fields,
            &settings.amount_field,
            &settings.account_field,
            &settings.account_value
        )?;

        categorise(
            &spending,
            &self.contractor_mapping,
            &settings.contractor_field,
            &self.title_mapping,
            &settings.title_field
        )
    }
}
