use crate::types::CellError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Missing mandatory fields: {}", .fields.join(", "))]
    MissingFields {
        fields: Vec<String>
    },
    #[error("Field '{field}' does not exist.")]
    FieldNotFound {
        field: String
    },
    #[error("Invalid amount in field '{field}': {source}")]
    InvalidAmount {
        field: String,
        #[source]
        source: CellError
    },
    #[error("Row has {found} values but the batch has {expected} columns")]
    RowLength {
        expected: usize,
        found: usize
    },
    #[error("Column '{column}' appears more than once")]
    DuplicateColumn {
        column: String
    },
    #[error("Cannot append columns [{}] to a batch with columns [{}]", .found.join(", "), .expected.join(", "))]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>
    }
}

impl BatchError {
    pub fn missing_fields(fields: Vec<String>) -> Self {
        Self::MissingFields { fields }
    }

    pub fn field_not_found(field: &str) -> Self {
        Self::FieldNotFound { field: field.to_string() }
    }

    pub fn invalid_amount(field: &str, source: CellError) -> Self {
        Self::InvalidAmount { field: field.to_string(), source }
    }
}
