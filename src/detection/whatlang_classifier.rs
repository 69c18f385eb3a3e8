//! Whatlang-based long-text classifier.
//!
//! Uses the whatlang crate for fast, trigram-based language detection over
//! its full internal vocabulary. Whatlang reports ISO 639-3 codes, which are
//! converted to ISO 639-1 here.

use crate::detection::{Classifier, RawDetection};
use tracing::info;
use whatlang::Detector;

/// Whatlang-based language classifier
pub struct WhatlangClassifier {
    detector: Detector,
}

impl WhatlangClassifier {
    /// Create a new Whatlang classifier
    pub fn new() -> Self {
        info!("Initializing whatlang long-text detector");
        Self {
            detector: Detector::new(),
        }
    }
}

impl Default for WhatlangClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for WhatlangClassifier {
    fn classify(&self, text: &str) -> Option<RawDetection> {
        let info = self.detector.detect(text)?;
        let code = iso_639_1(info.lang().code());
        Some(RawDetection::new(code, info.confidence()))
    }
}

/// Convert a whatlang ISO 639-3 code to ISO 639-1.
///
/// Languages without a two-letter code keep their three-letter code.
fn iso_639_1(code: &str) -> &str {
    match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        other => other,
    }
}
