//! Detection run report.
//!
//! Tallies how each document of a run was decided. Counts are aggregated
//! from collected outcomes after each batch, never from inside workers.

use crate::detection::{Outcome, RejectionReason};
use serde::Serialize;

/// Outcome counts for a detection run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    /// Documents seen, including empty ones
    pub documents: usize,

    /// Null or empty documents
    pub empty: usize,

    /// Detections kept as-is
    pub detected: usize,

    /// Detections replaced because the language was out of scope
    pub out_of_scope: usize,

    /// Detections replaced because the score was below the minimum
    pub below_threshold: usize,
}

impl DetectionReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one outcome.
    pub fn record(&mut self, outcome: Outcome) {
        self.documents += 1;
        match outcome {
            Outcome::Empty => self.empty += 1,
            Outcome::Detected => self.detected += 1,
            Outcome::Fallback(RejectionReason::OutOfScope) => self.out_of_scope += 1,
            Outcome::Fallback(RejectionReason::BelowThreshold) => self.below_threshold += 1,
        }
    }

    /// Add the counts of another report.
    pub fn merge(&mut self, other: &DetectionReport) {
        self.documents += other.documents;
        self.empty += other.empty;
        self.detected += other.detected;
        self.out_of_scope += other.out_of_scope;
        self.below_threshold += other.below_threshold;
    }

    /// Number of detections replaced by the fallback language.
    pub fn fallbacks(&self) -> usize {
        self.out_of_scope + self.below_threshold
    }

    /// Percentage of non-empty documents that fell back (0 if none).
    pub fn fallback_rate(&self) -> f64 {
        let classified = self.documents - self.empty;
        if classified > 0 {
            (self.fallbacks() as f64 / classified as f64) * 100.0
        } else {
            0.0
        }
    }
}

impl FromIterator<Outcome> for DetectionReport {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        let mut report = DetectionReport::new();
        for outcome in iter {
            report.record(outcome);
        }
        report
    }
}
