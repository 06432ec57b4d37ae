use crate::models::CompanyRecord;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

const INDENT: &[u8] = b"    ";

/// A JSON file holding an array of company records.
pub struct DatasetStore {
    path: PathBuf,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DatasetStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<Vec<CompanyRecord>> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to read dataset file: {}", self.path.display()))?;

        let records: Vec<CompanyRecord> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse dataset file: {}", self.path.display()))?;

        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Rewrites the whole file: 4-space indent, non-ASCII written as-is.
    pub fn save(&self, records: &[CompanyRecord]) -> Result<()> {
        let file = File::create(&self.path)
            .with_context(|| format!("Failed to create dataset file: {}", self.path.display()))?;

        let mut writer = BufWriter::new(file);
        write_pretty(&mut writer, records)
            .with_context(|| format!("Failed to write dataset file: {}", self.path.display()))?;
        writer
            .flush()
            .with_context(|| format!("Failed to flush dataset file: {}", self.path.display()))?;

        info!("Wrote {} records to {}", records.len(), self.path.display());
        Ok(())
    }
}

pub fn write_pretty<W: Write, T: Serialize + ?Sized>(writer: W, value: &T) -> Result<()> {
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(writer, formatter);
    value.serialize(&mut serializer)?;
    Ok(())
}
