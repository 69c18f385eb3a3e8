//! Batch adapter: classify many documents on a fixed pool of blocking workers.

use crate::detection::{DetectionPolicy, DetectionResult, Outcome};
use anyhow::{Context, Result};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

/// Default size of the detection worker pool.
pub const DEFAULT_NUM_WORKERS: usize = 4;

/// Classify documents in parallel.
///
/// # Arguments
/// * `policy` - Detection policy shared by all workers
/// * `documents` - Documents to classify (`None` for null cells)
/// * `num_workers` - Worker pool size (0 is treated as 1)
///
/// # Returns
/// One result per document, in input order.
pub async fn detect_batch(
    policy: Arc<DetectionPolicy>,
    documents: Vec<Option<String>>,
    num_workers: usize,
) -> Result<Vec<DetectionResult>> {
    let classified = detect_batch_with_outcomes(policy, documents, num_workers).await?;
    Ok(classified.into_iter().map(|(result, _)| result).collect())
}

/// Classify documents in parallel, keeping each result's outcome.
pub async fn detect_batch_with_outcomes(
    policy: Arc<DetectionPolicy>,
    documents: Vec<Option<String>>,
    num_workers: usize,
) -> Result<Vec<(DetectionResult, Outcome)>> {
    if documents.is_empty() {
        return Ok(Vec::new());
    }

    let num_workers = num_workers.max(1);
    let slice_len = documents.len().div_ceil(num_workers);
    debug!(
        "Classifying {} documents on {} workers",
        documents.len(),
        num_workers.min(documents.len())
    );

    let mut slices = Vec::with_capacity(num_workers);
    let mut remaining = documents.into_iter().peekable();
    while remaining.peek().is_some() {
        let slice: Vec<Option<String>> = remaining.by_ref().take(slice_len).collect();
        let policy = Arc::clone(&policy);
        slices.push(tokio::task::spawn_blocking(move || {
            slice
                .iter()
                .map(|doc| policy.classify_with_outcome(doc.as_deref()))
                .collect::<Vec<_>>()
        }));
    }

    // Handles are joined in spawn order, so results stay aligned with input
    let classified = try_join_all(slices)
        .await
        .context("Detection worker failed")?;

    Ok(classified.into_iter().flatten().collect())
}
