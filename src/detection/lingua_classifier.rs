//! Lingua-based short-text classifier.
//!
//! Lingua is accurate on terse inputs and can be restricted to an explicit
//! set of candidate languages, which keeps its answers inside the language
//! scope and reduces the number of models it has to load.

use crate::detection::{Classifier, RawDetection};
use lingua::{IsoCode639_1, Language, LanguageDetector, LanguageDetectorBuilder};
use tracing::{debug, info, warn};

/// Lingua-based language classifier restricted to a set of candidates.
pub struct LinguaClassifier {
    /// `None` when none of the candidates is known to lingua
    detector: Option<LanguageDetector>,
}

impl LinguaClassifier {
    /// Create a classifier restricted to the given ISO 639-1 codes.
    ///
    /// Codes lingua does not know are skipped. If no candidate remains,
    /// the classifier never answers.
    pub fn with_scope(codes: &[&str]) -> Self {
        let languages: Vec<Language> = codes
            .iter()
            .filter_map(|code| {
                let language = to_lingua_language(code);
                if language.is_none() {
                    debug!("Code '{}' has no lingua model, skipping", code);
                }
                language
            })
            .collect();

        if languages.is_empty() {
            warn!("No language in scope is supported by the short-text detector");
            return Self { detector: None };
        }

        info!(
            "Initializing lingua short-text detector for {} languages",
            languages.len()
        );
        let detector = LanguageDetectorBuilder::from_languages(&languages).build();

        Self {
            detector: Some(detector),
        }
    }
}

impl Classifier for LinguaClassifier {
    fn classify(&self, text: &str) -> Option<RawDetection> {
        let detector = self.detector.as_ref()?;

        // Confidence values come sorted from most to least likely
        let (language, confidence) = detector
            .compute_language_confidence_values(text)
            .into_iter()
            .next()?;

        if confidence <= 0.0 {
            return None;
        }

        Some(RawDetection::new(
            language.iso_code_639_1().to_string(),
            confidence,
        ))
    }
}

fn to_lingua_language(code: &str) -> Option<Language> {
    let iso_code = code.parse::<IsoCode639_1>().ok()?;
    Some(Language::from_iso_code_639_1(&iso_code))
}
