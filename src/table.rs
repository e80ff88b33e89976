//! The transient tabular payload: parsed CSV, written back gzip-compressed.

use std::{fs::File, path::Path};

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, WriterBuilder};
use flate2::{write::GzEncoder, Compression};

/// A CSV table held in memory between download and write. Values are kept
/// as text so the upstream bytes survive the round trip unchanged.
#[derive(Debug)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parses comma-separated text with a header row.
    pub fn from_csv(text: &str) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let headers = reader
            .headers()
            .context("Failed to read CSV header")?
            .iter()
            .map(|h| h.to_string())
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|f| f.to_string()).collect());
        }

        Ok(Table { headers, rows })
    }

    /// Writes the table as gzip-compressed CSV, overwriting any existing
    /// file at the path. No index column is added.
    pub fn write_gzip(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Failed to create `{}`", path.display()))?;
        let encoder = GzEncoder::new(file, Compression::default());
        let mut writer = WriterBuilder::new().from_writer(encoder);

        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }

        writer.flush()?;
        writer
            .into_inner()
            .map_err(|e| anyhow!("Failed to flush CSV writer: {}", e))?
            .finish()
            .context("Failed to finish gzip stream")?;

        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.headers.len()
    }
}

// -- Tests -------------------------------------------------------------------
