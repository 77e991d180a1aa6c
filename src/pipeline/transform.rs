use crate::models::{BatchError, TransactionBatch};
use tracing::debug;

/// Reduces a raw batch to the spending rows of one account.
///
/// Steps, in this order:
/// 1. keep only `mandatory_fields` (in the given order)
/// 2. drop rows whose amount is empty or whitespace (blocked transactions)
/// 3. keep rows whose account equals `account_value`
/// 4. read decimal-comma amounts as numbers
/// 5. keep strictly negative amounts
///
/// Blank amounts must be gone before step 4, which would otherwise reject them.
///
/// # Errors
/// - `MissingFields` if any mandatory field is absent, naming all of them.
/// - `FieldNotFound` if the amount or account field is not mandatory.
/// - `InvalidAmount` if a remaining amount is not a number.
pub fn transform<S: AsRef<str>>(
    batch: &TransactionBatch,
    mandatory_fields: &[S],
    amount_field: &str,
    account_field: &str,
    account_value: &str
) -> Result<TransactionBatch, BatchError> {
    let mut data = batch.select(mandatory_fields)?;
    let amount = data.require_column(amount_field)?;
    let account = data.require_column(account_field)?;

    data.retain_rows(|row| !row[amount].is_blank());
    data.retain_rows(|row| row[account].as_text() == Some(account_value));

    for row in data.rows_mut() {
        row[amount] = row[amount]
            .normalise_amount()
            .map_err(|error| BatchError::invalid_amount(amount_field, error))?;
    }

    data.retain_rows(|row| row[amount].is_negative());

    debug!("Kept {} of {} rows for account '{account_value}'", data.len(), batch.len());

    Ok(data)
}
