//! Language detection recipe: annotate every text column of a dataset.

use crate::config::{Config, RecipeParams};
use crate::dataset::{
    describe_output_schema, generate_unique, CsvRowSink, CsvRowSource, Row, RowSink, RowSource,
    OUTPUT_COLUMN_DESCRIPTIONS,
};
use crate::detection::{
    detect_batch_with_outcomes, DetectionPolicy, DetectionReport, DetectionResult,
    DEFAULT_NUM_WORKERS,
};
use crate::error::ConfigError;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Default number of rows per chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Tuning knobs with no effect on the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub chunk_size: usize,
    pub num_workers: usize,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            num_workers: DEFAULT_NUM_WORKERS,
        }
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub rows: usize,
    pub chunks: usize,
    pub report: DetectionReport,
}

/// Run the recipe from CSV input to CSV output.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let mut source = CsvRowSource::open(&config.input_path)?;
    let mut sink = CsvRowSink::create(&config.output_path)?;
    detect_languages(
        &mut source,
        &mut sink,
        &config.recipe,
        &config.processing_options(),
    )
    .await
}

/// Detect languages with the lingua/whatlang policy built from `params`.
pub async fn detect_languages<S, W>(
    source: &mut S,
    sink: &mut W,
    params: &RecipeParams,
    options: &ProcessingOptions,
) -> Result<RunSummary>
where
    S: RowSource,
    W: RowSink,
{
    // Columns are checked before paying for detector construction
    locate_text_columns(source, &params.text_columns)?;
    let policy = Arc::new(DetectionPolicy::new(params.policy.clone())?);
    detect_languages_with_policy(source, sink, &params.text_columns, policy, options).await
}

/// Detect languages of `text_columns` with a given policy.
///
/// # Errors
/// * `UnknownTextColumn` if a text column is missing from the input schema
/// * `NamingError` if no unique output column name can be found
/// * any error of the source or sink
pub async fn detect_languages_with_policy<S, W>(
    source: &mut S,
    sink: &mut W,
    text_columns: &[String],
    policy: Arc<DetectionPolicy>,
    options: &ProcessingOptions,
) -> Result<RunSummary>
where
    S: RowSource,
    W: RowSink,
{
    let indices = locate_text_columns(source, text_columns)?;
    let input_schema = source.schema().to_vec();
    let input_width = input_schema.len();

    let mut column_names: Vec<String> = input_schema.iter().map(|col| col.name.clone()).collect();
    let mut descriptions = HashMap::new();

    for name in text_columns {
        let mut output_names = Vec::with_capacity(OUTPUT_COLUMN_DESCRIPTIONS.len());
        for (suffix, description) in OUTPUT_COLUMN_DESCRIPTIONS {
            let output_name = generate_unique(suffix, &column_names, name)?;
            descriptions.insert(output_name.clone(), description.to_string());
            column_names.push(output_name.clone());
            output_names.push(output_name);
        }
        info!("Text column '{}' -> {:?}", name, output_names);
    }

    let output_schema = describe_output_schema(&input_schema, &column_names, &descriptions);
    sink.write_schema(&output_schema)?;

    let chunk_size = options.chunk_size.max(1);
    info!("Processing dataset chunks of size {}...", chunk_size);

    let mut summary = RunSummary::default();
    while let Some(mut rows) = source.next_chunk(chunk_size)? {
        for row in rows.iter_mut() {
            row.resize(input_width, String::new());
        }

        let mut chunk_report = DetectionReport::new();
        for &index in &indices {
            let documents: Vec<Option<String>> = rows
                .iter()
                .map(|row| Some(row[index].clone()).filter(|cell| !cell.is_empty()))
                .collect();

            let classified =
                detect_batch_with_outcomes(Arc::clone(&policy), documents, options.num_workers)
                    .await?;

            for (row, (result, outcome)) in rows.iter_mut().zip(classified) {
                append_result(row, result);
                chunk_report.record(outcome);
            }
        }

        sink.write_rows(&rows)?;
        summary.rows += rows.len();
        summary.chunks += 1;
        summary.report.merge(&chunk_report);
        info!(
            "Chunk {}: {} rows, {} fallbacks",
            summary.chunks,
            rows.len(),
            chunk_report.fallbacks()
        );
    }

    sink.finish()?;
    info!(
        "Processing dataset chunks: Done! {} rows, {:.1}% fallbacks",
        summary.rows,
        summary.report.fallback_rate()
    );

    Ok(summary)
}

fn locate_text_columns<S: RowSource>(
    source: &S,
    text_columns: &[String],
) -> Result<Vec<usize>, ConfigError> {
    if text_columns.is_empty() {
        return Err(ConfigError::MissingTextColumn);
    }

    text_columns
        .iter()
        .map(|name| {
            source
                .schema()
                .iter()
                .position(|col| &col.name == name)
                .ok_or_else(|| ConfigError::UnknownTextColumn(name.clone()))
        })
        .collect()
}

fn append_result(row: &mut Row, result: DetectionResult) {
    let score = result.score.map(|s| s.to_string()).unwrap_or_default();
    row.push(result.code);
    row.push(result.name);
    row.push(score);
}
