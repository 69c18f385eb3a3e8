//! Language detection.
//!
//! # Architecture
//!
//! - `classifier`: the `Classifier` seam over language identification backends
//! - `lingua_classifier`: short-text backend, restricted to the language scope
//! - `whatlang_classifier`: long-text backend over its full vocabulary
//! - `policy`: routing by length, code harmonization, scope/score gate
//! - `batch`: positional parallel classification on a fixed worker pool
//! - `report`: per-run outcome counts

mod batch;
mod classifier;
mod lingua_classifier;
mod policy;
mod report;
mod whatlang_classifier;

pub use batch::{detect_batch, detect_batch_with_outcomes, DEFAULT_NUM_WORKERS};
pub use classifier::{Classifier, RawDetection};
pub use lingua_classifier::LinguaClassifier;
pub use policy::{
    DetectionPolicy, DetectionResult, Outcome, PolicyConfig, RejectionReason,
    SHORT_TEXT_MAX_CHARS,
};
pub use report::DetectionReport;
pub use whatlang_classifier::WhatlangClassifier;
