use crate::models::{BatchError, TransactionBatch};
use std::collections::BTreeMap;

/// Unique values of `field` among rows still labelled `sentinel`, sorted.
///
/// Each value maps to `sentinel`, which is the shape of a mapping file entry
/// waiting for a real label.
pub fn no_category_values(
    batch: &TransactionBatch,
    field: &str,
    category_field: &str,
    sentinel: &str
) -> Result<BTreeMap<String, String>, BatchError> {
    let values = batch.require_column(field)?;
    let categories = batch.require_column(category_field)?;

    Ok(batch.rows()
        .iter()
        .filter(|row| row[categories].as_text() == Some(sentinel))
        .map(|row| (row[values].to_string(), sentinel.to_string()))
        .collect())
}

/// Moves rows labelled `sentinel` to the top, keeping the order within each group.
pub fn start_with_no_category(batch: &TransactionBatch, category_field: &str, sentinel: &str) -> Result<TransactionBatch, BatchError> {
    let category = batch.require_column(category_field)?;
    let mut data = batch.clone();

    data.sort_rows_by_key(|row| row[category].as_text() != Some(sentinel));

    Ok(data)
}
