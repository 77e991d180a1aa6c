use crate::ingest::errors::IngestError;
use crate::models::TransactionBatch;

/// Checks the first batch of a freshly opened export.
///
/// `None` means the reader produced nothing at all, i.e. the file had no header.
/// A header without data rows is reported separately, and every missing mandatory
/// column is named in a single error.
pub fn validate<S: AsRef<str>>(first_batch: Option<&TransactionBatch>, mandatory_columns: &[S]) -> Result<(), IngestError> {
    let Some(batch) = first_batch else {
        return Err(IngestError::EmptyFile)
    };

    if batch.is_empty() {
        return Err(IngestError::NoRows)
    }

    let missing = batch.missing_columns(mandatory_columns);

    if !missing.is_empty() {
        return Err(IngestError::MissingColumns { columns: missing })
    }

    Ok(())
}
