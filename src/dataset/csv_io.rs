//! CSV row source and sink.
//!
//! The header row defines the column names. Column descriptions travel in an
//! optional JSON sidecar next to the CSV file (`<file>.schema.json`), holding
//! an array of [`ColumnSchema`].

use crate::dataset::{ColumnSchema, Row, RowSink, RowSource};
use anyhow::{Context, Result};
use csv::{Reader, StringRecord, Writer};
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the schema sidecar of a CSV file.
pub fn schema_sidecar_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".schema.json");
    PathBuf::from(name)
}

/// Chunked reader over a CSV file.
pub struct CsvRowSource {
    reader: Reader<File>,
    schema: Vec<ColumnSchema>,
    record: StringRecord,
}

impl CsvRowSource {
    /// Open a CSV file and read its header and schema sidecar.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("Failed to open input CSV {}", path.display()))?;
        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read header of {}", path.display()))?
            .clone();

        let comments = read_sidecar_comments(&schema_sidecar_path(path))?;
        let schema = headers
            .iter()
            .map(|name| ColumnSchema {
                name: name.to_string(),
                comment: comments.get(name).cloned().flatten(),
            })
            .collect();

        Ok(Self {
            reader,
            schema,
            record: StringRecord::new(),
        })
    }
}

impl RowSource for CsvRowSource {
    fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    fn next_chunk(&mut self, chunk_size: usize) -> Result<Option<Vec<Row>>> {
        let chunk_size = chunk_size.max(1);
        let mut rows = Vec::new();

        while rows.len() < chunk_size {
            let has_record = self
                .reader
                .read_record(&mut self.record)
                .context("Failed to read CSV record")?;
            if !has_record {
                break;
            }
            rows.push(self.record.iter().map(String::from).collect());
        }

        if rows.is_empty() {
            Ok(None)
        } else {
            Ok(Some(rows))
        }
    }
}

/// CSV writer that also writes the schema sidecar.
pub struct CsvRowSink {
    writer: Writer<File>,
    sidecar_path: PathBuf,
}

impl CsvRowSink {
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let writer = Writer::from_path(path)
            .with_context(|| format!("Failed to create output CSV {}", path.display()))?;

        Ok(Self {
            writer,
            sidecar_path: schema_sidecar_path(path),
        })
    }
}

impl RowSink for CsvRowSink {
    fn write_schema(&mut self, schema: &[ColumnSchema]) -> Result<()> {
        self.writer
            .write_record(schema.iter().map(|col| col.name.as_str()))
            .context("Failed to write CSV header")?;

        let json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
        fs::write(&self.sidecar_path, json).with_context(|| {
            format!(
                "Failed to write schema sidecar {}",
                self.sidecar_path.display()
            )
        })?;
        Ok(())
    }

    fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        for row in rows {
            self.writer
                .write_record(row)
                .context("Failed to write CSV record")?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush().context("Failed to flush output CSV")?;
        Ok(())
    }
}

fn read_sidecar_comments(path: &Path) -> Result<HashMap<String, Option<String>>> {
    if !path.exists() {
        debug!("No schema sidecar at {}", path.display());
        return Ok(HashMap::new());
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema sidecar {}", path.display()))?;
    let columns: Vec<ColumnSchema> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse schema sidecar {}", path.display()))?;

    Ok(columns
        .into_iter()
        .map(|col| (col.name, col.comment))
        .collect())
}
