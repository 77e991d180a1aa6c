use crate::models::{BatchError, CategoryMapping, TransactionBatch};
use crate::types::{Cell, CATEGORY_FIELD, NO_CATEGORY};
use tracing::debug;

/// Contractor column of the bank export.
pub const CONTRACTOR_FIELD: &str = "Dane kontrahenta";
/// Title column of the bank export.
pub const TITLE_FIELD: &str = "Tytuł";

/// Labels every row by looking for the mapping's keys inside `field_name`.
///
/// Matching is a case-insensitive substring test on the field's text, without
/// trimming. Keys are tried in mapping order and each match overwrites the row's
/// `category`, so the last matching key decides. Rows that match nothing keep the
/// category they already had, or `NO CATEGORY` if the column is new.
///
/// Applying the same mapping twice gives the same result as applying it once.
///
/// # Errors
/// `FieldNotFound` if `field_name` is not a column. Column names are compared
/// exactly; a differently cased name does not count.
pub fn categorise_field(batch: &TransactionBatch, mapping: &CategoryMapping, field_name: &str) -> Result<TransactionBatch, BatchError> {
    let Some(field) = batch.column_index(field_name) else {
        debug!("Field '{field_name}' does not exist. Available fields: {:?}", batch.columns());
        return Err(BatchError::field_not_found(field_name))
    };

    let mut data = batch.clone();
    let category = match data.column_index(CATEGORY_FIELD) {
        Some(index) => index,
        None => data.add_column(CATEGORY_FIELD, Cell::from(NO_CATEGORY))?
    };

    let lowered: Vec<String> = data.rows()
        .iter()
        .map(|row| row[field].to_string().to_lowercase())
        .collect();

    for (key, label) in mapping.iter() {
        let needle = key.to_lowercase();
        let mut matches = 0usize;

        for (row, text) in data.rows_mut().iter_mut().zip(&lowered) {
            if text.contains(&needle) {
                row[category] = Cell::from(label);
                matches += 1;
            }
        }

        debug!("Found {matches} matches for key: {needle}");
    }

    Ok(data)
}

pub fn categorise_contractor(batch: &TransactionBatch, mapping: &CategoryMapping, contractor_field: &str) -> Result<TransactionBatch, BatchError> {
    categorise_field(batch, mapping, contractor_field)
}

pub fn categorise_title(batch: &TransactionBatch, mapping: &CategoryMapping, title_field: &str) -> Result<TransactionBatch, BatchError> {
    categorise_field(batch, mapping, title_field)
}

/// Contractor pass first, then title pass, so a title match refines whatever the
/// contractor gave.
pub fn categorise(
    batch: &TransactionBatch,
    contractor_mapping: &CategoryMapping,
    contractor_field: &str,
    title_mapping: &CategoryMapping,
    title_field: &str
) -> Result<TransactionBatch, BatchError> {
    let data = categorise_contractor(batch, contractor_mapping, contractor_field)?;

    categorise_title(&data, title_mapping, title_field)
}
