use crate::models::errors::BatchError;
use crate::types::Cell;
use std::collections::HashSet;

/// One record of a batch, holding a cell per column in column order.
pub type Row = Vec<Cell>;

/// An ordered table of rows read from (or derived from) a transaction export.
///
/// Column names are unique and keep their order. Every row holds exactly one cell
/// per column. Pipeline stages take a batch by reference and return a new one, so
/// the caller's table is never modified by a stage that fails halfway.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionBatch {
    columns: Vec<String>,
    rows: Vec<Row>
}

impl TransactionBatch {
    /// Creates an empty batch with the given header.
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Result<Self, BatchError> {
        let columns: Vec<String> = columns.into_iter().map(Into::into).collect();
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(BatchError::DuplicateColumn { column: column.clone() })
            }
        }

        Ok(Self { columns, rows: Vec::new() })
    }

    /// Creates a batch from a header and its rows, checking every row's width.
    #[cfg(test)]
    pub fn from_rows<S: Into<String>>(columns: impl IntoIterator<Item = S>, rows: Vec<Row>) -> Result<Self, BatchError> {
        let mut batch = Self::new(columns)?;

        for row in rows {
            batch.push_row(row)?;
        }

        Ok(batch)
    }

    pub fn push_row(&mut self, row: Row) -> Result<(), BatchError> {
        if row.len() != self.columns.len() {
            return Err(BatchError::RowLength { expected: self.columns.len(), found: row.len() })
        }

        self.rows.push(row);

        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column. Names are matched exactly, including case.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    pub fn require_column(&self, name: &str) -> Result<usize, BatchError> {
        self.column_index(name).ok_or_else(|| BatchError::field_not_found(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// All cells of one column, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&Cell>, BatchError> {
        let index = self.require_column(name)?;

        Ok(self.rows.iter().map(|row| &row[index]).collect())
    }

    #[cfg(test)]
    pub fn value(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;

        self.rows.get(row).map(|row| &row[index])
    }

    /// Names from `required` that this batch lacks, in the order they were asked for.
    pub fn missing_columns<S: AsRef<str>>(&self, required: &[S]) -> Vec<String> {
        required.iter()
            .map(AsRef::as_ref)
            .filter(|name| !self.has_column(name))
            .map(str::to_string)
            .collect()
    }

    /// Projects the batch onto `columns`, in that order.
    pub fn select<S: AsRef<str>>(&self, columns: &[S]) -> Result<Self, BatchError> {
        let missing = self.missing_columns(columns);

        if !missing.is_empty() {
            return Err(BatchError::missing_fields(missing))
        }

        let indexes: Vec<usize> = columns.iter()
            .filter_map(|name| self.column_index(name.as_ref()))
            .collect();

        let mut selected = Self::new(columns.iter().map(|name| name.as_ref().to_string()))?;
        selected.rows = self.rows.iter()
            .map(|row| indexes.iter().map(|&index| row[index].clone()).collect())
            .collect();

        Ok(selected)
    }

    /// Appends a column filled with `fill` and returns its position.
    pub fn add_column(&mut self, name: &str, fill: Cell) -> Result<usize, BatchError> {
        if self.has_column(name) {
            return Err(BatchError::DuplicateColumn { column: name.to_string() })
        }

        self.columns.push(name.to_string());

        for row in &mut self.rows {
            row.push(fill.clone());
        }

        Ok(self.columns.len() - 1)
    }

    pub fn retain_rows<F>(&mut self, keep: F)
    where
        F: FnMut(&Row) -> bool
    {
        self.rows.retain(keep);
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Row] {
        &mut self.rows
    }

    /// Stable sort: rows with equal keys keep their relative order.
    pub fn sort_rows_by_key<K, F>(&mut self, key: F)
    where
        K: Ord,
        F: FnMut(&Row) -> K
    {
        self.rows.sort_by_key(key);
    }

    /// Moves the rows of `other` to the end of this batch. Both must share a header.
    pub fn append(&mut self, other: TransactionBatch) -> Result<(), BatchError> {
        if self.columns != other.columns {
            return Err(BatchError::SchemaMismatch { expected: self.columns.clone(), found: other.columns })
        }

        self.rows.extend(other.rows);

        Ok(())
    }
}
