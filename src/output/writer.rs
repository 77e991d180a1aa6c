use crate::models::TransactionBatch;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes the categorised table as `<source stem>_categorised.csv` inside `folder`.
pub fn write_categorised(folder: &Path, source: &Path, batch: &TransactionBatch, separator: u8) -> Result<PathBuf> {
    fs::create_dir_all(folder).with_context(|| format!("Could not create output folder '{}'", folder.display()))?;

    let stem = source.file_stem()
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| "transactions".to_string());
    let path = folder.join(format!("{stem}_categorised.csv"));

    let mut writer = WriterBuilder::new()
        .delimiter(separator)
        .from_path(&path)
        .with_context(|| format!("Could not create '{}'", path.display()))?;

    writer.write_record(batch.columns())?;

    for row in batch.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }

    writer.flush()?;

    info!("Saved {} categorised rows to {}", batch.len(), path.display());

    Ok(path)
}

/// Writes an uncategorised dictionary as pretty JSON to `<folder>/<name>.json`.
///
/// The file has the same shape as a mapping file, so entries can be given a label
/// and moved over by hand.
pub fn write_uncategorised(folder: &Path, name: &str, values: &BTreeMap<String, String>) -> Result<PathBuf> {
    fs::create_dir_all(folder).with_context(|| format!("Could not create uncategorised folder '{}'", folder.display()))?;

    let path = folder.join(format!("{name}.json"));
    let json = serde_json::to_string_pretty(values)?;

    fs::write(&path, format!("{json}\n")).with_context(|| format!("Could not write '{}'", path.display()))?;

    info!("Saved {} uncategorised {name} values to {}", values.len(), path.display());

    Ok(path)
}
