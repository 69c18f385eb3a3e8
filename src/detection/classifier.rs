//! Classifier seam between the detection policy and language identification
//! backends.

/// Raw answer of a language identification backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDetection {
    /// Language code as reported by the backend (not yet harmonized)
    pub code: String,

    /// Backend confidence, from 0 to 1
    pub confidence: f64,
}

impl RawDetection {
    pub fn new(code: impl Into<String>, confidence: f64) -> Self {
        Self {
            code: code.into(),
            confidence,
        }
    }
}

/// A language identification backend: text in, `(code, confidence)` out.
///
/// Implementations are shared read-only across detection workers.
pub trait Classifier: Send + Sync {
    /// Identify the language of `text`.
    ///
    /// Returns `None` when the backend has no answer at all.
    fn classify(&self, text: &str) -> Option<RawDetection>;
}
