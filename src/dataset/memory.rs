//! In-memory row source and sink.

use crate::dataset::{ColumnSchema, Row, RowSink, RowSource};
use anyhow::Result;

/// Row source over rows held in memory.
#[derive(Debug, Clone)]
pub struct MemoryRowSource {
    schema: Vec<ColumnSchema>,
    rows: Vec<Row>,
    position: usize,
}

impl MemoryRowSource {
    pub fn new(schema: Vec<ColumnSchema>, rows: Vec<Row>) -> Self {
        Self {
            schema,
            rows,
            position: 0,
        }
    }

    /// Build a source from column names and string rows.
    pub fn from_rows(columns: &[&str], rows: &[&[&str]]) -> Self {
        let schema = columns.iter().map(|name| ColumnSchema::new(*name)).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();
        Self::new(schema, rows)
    }
}

impl RowSource for MemoryRowSource {
    fn schema(&self) -> &[ColumnSchema] {
        &self.schema
    }

    fn next_chunk(&mut self, chunk_size: usize) -> Result<Option<Vec<Row>>> {
        if self.position >= self.rows.len() {
            return Ok(None);
        }

        let end = (self.position + chunk_size.max(1)).min(self.rows.len());
        let chunk = self.rows[self.position..end].to_vec();
        self.position = end;
        Ok(Some(chunk))
    }
}

/// Row sink collecting everything in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRowSink {
    pub schema: Vec<ColumnSchema>,
    pub rows: Vec<Row>,
    pub finished: bool,
}

impl MemoryRowSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Position of a column in the written schema.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.schema.iter().position(|col| col.name == name)
    }

    /// All values of a column, by name.
    pub fn column(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_str()).collect())
    }
}

impl RowSink for MemoryRowSink {
    fn write_schema(&mut self, schema: &[ColumnSchema]) -> Result<()> {
        self.schema = schema.to_vec();
        Ok(())
    }

    fn write_rows(&mut self, rows: &[Row]) -> Result<()> {
        self.rows.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
