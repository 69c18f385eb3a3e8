//! Tabular dataset plumbing around the detection policy.
//!
//! Rows are streamed chunk by chunk from a [`RowSource`], annotated with
//! three language columns per text column, and written to a [`RowSink`].

mod csv_io;
mod memory;
mod naming;
mod recipe;
mod schema;

use anyhow::Result;

pub use csv_io::{schema_sidecar_path, CsvRowSink, CsvRowSource};
pub use memory::{MemoryRowSink, MemoryRowSource};
pub use naming::generate_unique;
pub use recipe::{
    detect_languages, detect_languages_with_policy, run, ProcessingOptions, RunSummary,
    DEFAULT_CHUNK_SIZE,
};
pub use schema::{describe_output_schema, ColumnSchema, OUTPUT_COLUMN_DESCRIPTIONS};

/// One row, positionally aligned with the schema. Empty cells are nulls.
pub type Row = Vec<String>;

/// A chunked stream of rows.
pub trait RowSource {
    /// Columns of every row yielded by this source.
    fn schema(&self) -> &[ColumnSchema];

    /// Read up to `chunk_size` rows, or `None` once the source is exhausted.
    fn next_chunk(&mut self, chunk_size: usize) -> Result<Option<Vec<Row>>>;
}

/// Destination of annotated rows.
pub trait RowSink {
    /// Write the output schema. Called once, before any rows.
    fn write_schema(&mut self, schema: &[ColumnSchema]) -> Result<()>;

    fn write_rows(&mut self, rows: &[Row]) -> Result<()>;

    /// Flush everything written so far.
    fn finish(&mut self) -> Result<()>;
}
