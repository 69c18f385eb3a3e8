//! Detection policy: routing, harmonization and the scope/confidence gate.
//!
//! A document is routed to the short-text classifier or the long-text
//! classifier depending on its length, codes are harmonized to one ISO 639-1
//! vocabulary, and answers outside the language scope or below the minimum
//! score are replaced by the fallback language.

use crate::detection::{Classifier, LinguaClassifier, RawDetection, WhatlangClassifier};
use crate::error::ConfigError;
use crate::language::LanguageRegistry;
use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};

/// Documents up to this many characters go to the short-text classifier.
pub const SHORT_TEXT_MAX_CHARS: usize = 140;

/// Detection policy configuration for one run.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyConfig {
    /// Allowed output codes (an empty list means the full registry)
    pub language_scope: Vec<String>,

    /// Minimum confidence score, from 0 to 1
    pub minimum_score: f64,

    /// Code substituted for rejected detections ("" for none)
    pub fallback_language: String,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            language_scope: Vec::new(),
            minimum_score: 0.0,
            fallback_language: String::new(),
        }
    }
}

/// Language detected for one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionResult {
    /// ISO 639-1 code, the fallback code, or "" for empty documents
    pub code: String,

    /// Registry name of `code`, or "" when not registered
    pub name: String,

    /// Confidence rounded to 3 decimals, absent for fallbacks
    pub score: Option<f64>,
}

impl DetectionResult {
    /// Result for null or empty documents.
    pub fn empty() -> Self {
        Self {
            code: String::new(),
            name: String::new(),
            score: None,
        }
    }
}

/// Why the gate rejected a detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    OutOfScope,
    BelowThreshold,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::OutOfScope => write!(f, "out of scope"),
            RejectionReason::BelowThreshold => write!(f, "below minimum score"),
        }
    }
}

/// How a result was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Null or empty document, no classifier invoked
    Empty,
    /// Classifier answer kept
    Detected,
    /// Classifier answer replaced by the fallback language
    Fallback(RejectionReason),
}

/// Language detection policy on top of a short-text and a long-text
/// classifier.
pub struct DetectionPolicy {
    /// Scope in configuration order, for diagnostics
    scope_codes: Vec<String>,
    scope: HashSet<String>,
    minimum_score: f64,
    fallback_language: String,
    short_text: Box<dyn Classifier>,
    long_text: Box<dyn Classifier>,
}

impl DetectionPolicy {
    /// Build a policy backed by lingua (short texts) and whatlang (long texts).
    pub fn new(config: PolicyConfig) -> Result<Self, ConfigError> {
        Self::with_classifiers(
            config,
            |codes| Box::new(LinguaClassifier::with_scope(codes)),
            Box::new(WhatlangClassifier::new()),
        )
    }

    /// Build a policy with custom classifiers.
    ///
    /// `build_short_text` receives the scope minus the codes the short-text
    /// classifier cannot be restricted to.
    ///
    /// # Errors
    /// * `MinimumScoreOutOfRange` if the minimum score is not within [0, 1]
    /// * `EmptyLanguageScope` if the scope is empty after defaulting
    pub fn with_classifiers<F>(
        config: PolicyConfig,
        build_short_text: F,
        long_text: Box<dyn Classifier>,
    ) -> Result<Self, ConfigError>
    where
        F: FnOnce(&[&str]) -> Box<dyn Classifier>,
    {
        if !(0.0..=1.0).contains(&config.minimum_score) {
            return Err(ConfigError::MinimumScoreOutOfRange(config.minimum_score));
        }

        let registry = LanguageRegistry::get();
        let scope_codes: Vec<String> = if config.language_scope.is_empty() {
            registry.codes().into_iter().map(String::from).collect()
        } else {
            config.language_scope
        };
        if scope_codes.is_empty() {
            return Err(ConfigError::EmptyLanguageScope);
        }

        for code in scope_codes.iter().filter(|code| !registry.contains(code)) {
            warn!("Language '{}' in scope is not a supported language", code);
        }

        let short_text_codes: Vec<&str> = scope_codes
            .iter()
            .map(String::as_str)
            .filter(|code| registry.supports_short_text(code))
            .collect();

        info!(
            "Detection policy: {} languages in scope ({} for short texts), minimum score {:.2}, fallback '{}'",
            scope_codes.len(),
            short_text_codes.len(),
            config.minimum_score,
            config.fallback_language
        );

        let short_text = build_short_text(&short_text_codes);
        let scope = scope_codes.iter().cloned().collect();

        Ok(Self {
            scope_codes,
            scope,
            minimum_score: config.minimum_score,
            fallback_language: config.fallback_language,
            short_text,
            long_text,
        })
    }

    /// Detect the language of one document.
    pub fn classify(&self, document: Option<&str>) -> DetectionResult {
        self.classify_with_outcome(document).0
    }

    /// Detect the language of one document and report how it was decided.
    pub fn classify_with_outcome(&self, document: Option<&str>) -> (DetectionResult, Outcome) {
        let doc = match document {
            Some(doc) if !doc.is_empty() => doc,
            _ => return (DetectionResult::empty(), Outcome::Empty),
        };

        let raw = self.route(doc);

        let (code, score, outcome) = match self.gate(&raw) {
            Ok(()) => (raw.code, Some(raw.confidence), Outcome::Detected),
            Err(reason) => {
                self.warn_rejection(doc, &raw, reason);
                (
                    self.fallback_language.clone(),
                    None,
                    Outcome::Fallback(reason),
                )
            }
        };

        let name = LanguageRegistry::get().name_of(&code).to_string();
        let result = DetectionResult {
            code,
            name,
            score: score.map(round_score),
        };

        (result, outcome)
    }

    /// The effective language scope, in configuration order.
    pub fn language_scope(&self) -> &[String] {
        &self.scope_codes
    }

    pub fn minimum_score(&self) -> f64 {
        self.minimum_score
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    fn route(&self, doc: &str) -> RawDetection {
        if doc.chars().count() <= SHORT_TEXT_MAX_CHARS {
            let raw = self.short_text.classify(doc);
            harmonize(raw, false)
        } else {
            let raw = self.long_text.classify(doc);
            harmonize(raw, true)
        }
    }

    // Scope is checked before the score
    fn gate(&self, raw: &RawDetection) -> Result<(), RejectionReason> {
        if !self.scope.contains(&raw.code) {
            return Err(RejectionReason::OutOfScope);
        }
        if raw.confidence < self.minimum_score {
            return Err(RejectionReason::BelowThreshold);
        }
        Ok(())
    }

    fn warn_rejection(&self, doc: &str, raw: &RawDetection, reason: RejectionReason) {
        let detail = match reason {
            RejectionReason::OutOfScope => format!(
                "Detected language: '{}' not within language scope: {:?}.",
                raw.code, self.scope_codes
            ),
            RejectionReason::BelowThreshold => format!(
                "Confidence score: {:.2} below minimum: {:.2}.",
                raw.confidence, self.minimum_score
            ),
        };

        warn!(
            document = doc,
            detected = %raw.code,
            reason = %reason,
            fallback = %self.fallback_language,
            "Problem encountered for document: '{}'. {} Replacing detected language: '{}' by fallback: '{}'.",
            doc,
            detail,
            raw.code,
            self.fallback_language
        );
    }
}

/// Bring a raw classifier answer into the registry vocabulary.
///
/// Codes are lower-cased and stripped of region or script subtags. Long-text
/// codes also go through the legacy alias table. No answer becomes `("", 0)`.
fn harmonize(raw: Option<RawDetection>, remap_aliases: bool) -> RawDetection {
    let Some(raw) = raw else {
        return RawDetection::new("", 0.0);
    };

    let base = raw
        .code
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let code = if remap_aliases {
        LanguageRegistry::get().remap(&base).to_string()
    } else {
        base
    };

    RawDetection::new(code, raw.confidence)
}

fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}
