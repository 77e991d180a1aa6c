use crate::ingest::errors::IngestError;
use crate::models::TransactionBatch;
use crate::types::Cell;
use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, WINDOWS_1250};
use encoding_rs_io::{DecodeReaderBytes, DecodeReaderBytesBuilder};
use std::collections::HashSet;
use std::fs::File;
use std::path::Path;
use tracing::debug;

/// How a transaction export is read.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    pub separator: u8,
    pub batch_size: usize,
    /// Polish bank exports are written in the Windows-1250 code page.
    pub encoding: &'static Encoding
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            batch_size: 100,
            encoding: WINDOWS_1250
        }
    }
}

impl ReadOptions {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }
}

/// Forward-only producer of [`TransactionBatch`]es from one CSV file.
///
/// Each batch holds at most `batch_size` rows, in file order. A file with a header
/// but no rows yields one empty batch; a file without a header yields nothing.
/// The reader cannot be rewound; open the file again to start over.
pub struct BatchReader {
    reader: csv::Reader<DecodeReaderBytes<File, Vec<u8>>>,
    columns: Vec<String>,
    batch_size: usize,
    record: StringRecord,
    started: bool,
    finished: bool
}

/// Opens `path` for batched reading.
///
/// Only the header is read here; rows are pulled lazily as batches are requested.
pub fn open_batches(path: &Path, options: &ReadOptions) -> Result<BatchReader, IngestError> {
    let file = File::open(path).map_err(|error| IngestError::io(path, error))?;

    let decoded = DecodeReaderBytesBuilder::new()
        .encoding(Some(options.encoding))
        .build(file);

    let mut reader = ReaderBuilder::new()
        .delimiter(options.separator)
        .has_headers(true)
        .from_reader(decoded);

    let columns = unique_column_names(reader.headers()?);

    debug!("Opened {} with {} columns: {:?}", path.display(), columns.len(), columns);

    Ok(BatchReader {
        reader,
        columns,
        batch_size: options.batch_size.max(1),
        record: StringRecord::new(),
        started: false,
        finished: false
    })
}

impl BatchReader {
    #[cfg(test)]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    fn read_batch(&mut self) -> Result<TransactionBatch, IngestError> {
        let mut batch = TransactionBatch::new(self.columns.iter().cloned())?;

        while batch.len() < self.batch_size {
            if !self.reader.read_record(&mut self.record)? {
                break;
            }

            batch.push_row(self.record.iter().map(Cell::from).collect())?;
        }

        Ok(batch)
    }
}

impl Iterator for BatchReader {
    type Item = Result<TransactionBatch, IngestError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.columns.is_empty() {
            return None;
        }

        match self.read_batch() {
            Ok(batch) if batch.is_empty() && self.started => {
                self.finished = true;
                None
            }
            Ok(batch) => {
                self.started = true;
                self.finished = batch.len() < self.batch_size;
                debug!("Read batch of {} rows", batch.len());
                Some(Ok(batch))
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

/// Makes header names unique the way spreadsheet tools do.
///
/// Repeats get a `.1`, `.2`, ... suffix and empty names become `Unnamed: <position>`.
fn unique_column_names(headers: &StringRecord) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut columns = Vec::with_capacity(headers.len());

    for (position, header) in headers.iter().enumerate() {
        let base = if header.is_empty() {
            format!("Unnamed: {position}")
        } else {
            header.to_string()
        };

        let mut name = base.clone();
        let mut suffix = 1;

        while seen.contains(&name) {
            name = format!("{base}.{suffix}");
            suffix += 1;
        }

        seen.insert(name.clone());
        columns.push(name);
    }

    columns
}
