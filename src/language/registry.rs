//! Language registry: Single source of truth for all supported languages.
//!
//! This module provides a centralized registry of every language the plugin
//! can emit, together with the small harmonization tables needed to make the
//! two detectors speak the same vocabulary. It uses a singleton pattern with
//! `OnceLock` to ensure thread-safe initialization and access.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Metadata for a supported language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,

    /// English name of the language (e.g., "English", "French")
    pub name: &'static str,
}

/// Global language registry singleton.
///
/// Initialized once on first access and immutable thereafter, so it can be
/// shared freely across detection workers.
pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
    by_code: HashMap<&'static str, usize>,
    aliases: HashMap<&'static str, &'static str>,
    short_text_unsupported: Vec<&'static str>,
}

/// Global registry instance (initialized lazily)
static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global language registry instance.
    pub fn get() -> &'static LanguageRegistry {
        REGISTRY.get_or_init(|| {
            let languages = default_languages();
            let by_code = languages
                .iter()
                .enumerate()
                .map(|(index, lang)| (lang.code, index))
                .collect();

            LanguageRegistry {
                languages,
                by_code,
                aliases: LANGUAGE_ALIASES.iter().copied().collect(),
                short_text_unsupported: SHORT_TEXT_UNSUPPORTED.to_vec(),
            }
        })
    }

    /// Get a language by its code.
    ///
    /// # Returns
    /// * `Some(&LanguageInfo)` if the language exists
    /// * `None` if the language is not found
    pub fn get_by_code(&self, code: &str) -> Option<&LanguageInfo> {
        self.by_code.get(code).map(|&index| &self.languages[index])
    }

    /// Human readable name for a code, or `""` when the code is unknown.
    pub fn name_of(&self, code: &str) -> &'static str {
        self.get_by_code(code).map(|lang| lang.name).unwrap_or("")
    }

    /// Check if a code is a registry key.
    pub fn contains(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Get all languages, in display order.
    pub fn list_all(&self) -> &[LanguageInfo] {
        &self.languages
    }

    /// All registry codes, in display order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.languages.iter().map(|lang| lang.code).collect()
    }

    /// Rewrite a legacy or variant code to its modern replacement.
    ///
    /// Codes without an alias are returned unchanged.
    pub fn remap<'a>(&self, code: &'a str) -> &'a str {
        match self.aliases.get(code) {
            Some(&replacement) => replacement,
            None => code,
        }
    }

    /// Check if the short-text detector can be restricted to this code.
    pub fn supports_short_text(&self, code: &str) -> bool {
        !self.short_text_unsupported.contains(&code)
    }
}

/// Rare cases of ISO code replacements and oddities.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[("iw", "he"), ("co", "it"), ("ji", "yi"), ("in", "id")];

/// Registry languages that have no model in the short-text detector.
const SHORT_TEXT_UNSUPPORTED: &[&str] = &[
    "am", "an", "as", "br", "dz", "fo", "fy", "gd", "gl", "ha", "ht", "ig", "jv", "km", "kn", "ku",
    "ky", "lb", "lo", "mg", "ml", "mt", "my", "ne", "no", "ny", "oc", "or", "ps", "qu", "rw", "sd",
    "se", "si", "sm", "su", "tg", "ug", "uz", "vo", "wa", "yi",
];

macro_rules! languages {
    ($($code:literal => $name:literal),* $(,)?) => {
        vec![$(LanguageInfo { code: $code, name: $name }),*]
    };
}

/// Default language table, sorted by English name.
fn default_languages() -> Vec<LanguageInfo> {
    languages![
        "af" => "Afrikaans",
        "sq" => "Albanian",
        "am" => "Amharic",
        "ar" => "Arabic",
        "an" => "Aragonese",
        "hy" => "Armenian",
        "as" => "Assamese",
        "az" => "Azerbaijani",
        "eu" => "Basque",
        "be" => "Belarusian",
        "bn" => "Bengali",
        "bs" => "Bosnian",
        "br" => "Breton",
        "bg" => "Bulgarian",
        "my" => "Burmese",
        "ca" => "Catalan",
        "km" => "Central Khmer",
        "zh" => "Chinese",
        "hr" => "Croatian",
        "cs" => "Czech",
        "da" => "Danish",
        "nl" => "Dutch",
        "dz" => "Dzongkha",
        "en" => "English",
        "eo" => "Esperanto",
        "et" => "Estonian",
        "fo" => "Faroese",
        "fi" => "Finnish",
        "fr" => "French",
        "gl" => "Galician",
        "ka" => "Georgian",
        "de" => "German",
        "el" => "Greek",
        "gu" => "Gujarati",
        "ht" => "Haitian",
        "ha" => "Hausa",
        "he" => "Hebrew",
        "hi" => "Hindi",
        "hu" => "Hungarian",
        "is" => "Icelandic",
        "ig" => "Igbo",
        "id" => "Indonesian",
        "ga" => "Irish",
        "it" => "Italian",
        "ja" => "Japanese",
        "jv" => "Javanese",
        "kn" => "Kannada",
        "kk" => "Kazakh",
        "rw" => "Kinyarwanda",
        "ky" => "Kirghiz",
        "ko" => "Korean",
        "ku" => "Kurdish",
        "lo" => "Lao",
        "la" => "Latin",
        "lv" => "Latvian",
        "lt" => "Lithuanian",
        "lb" => "Luxembourgish",
        "mk" => "Macedonian",
        "mg" => "Malagasy",
        "ms" => "Malay",
        "ml" => "Malayalam",
        "mt" => "Maltese",
        "mi" => "Maori",
        "mr" => "Marathi",
        "mn" => "Mongolian",
        "ne" => "Nepali",
        "se" => "Northern Sami",
        "nb" => "Norwegian Bokmål",
        "nn" => "Norwegian Nynorsk",
        "no" => "Norwegian",
        "ny" => "Nyanja",
        "oc" => "Occitan",
        "or" => "Oriya",
        "pa" => "Panjabi",
        "fa" => "Persian",
        "pl" => "Polish",
        "pt" => "Portuguese",
        "ps" => "Pushto",
        "qu" => "Quechua",
        "ro" => "Romanian",
        "ru" => "Russian",
        "sm" => "Samoan",
        "gd" => "Scottish Gaelic",
        "sr" => "Serbian",
        "sn" => "Shona",
        "sd" => "Sindhi",
        "si" => "Sinhala",
        "sk" => "Slovak",
        "sl" => "Slovenian",
        "so" => "Somali",
        "st" => "Southern Sotho",
        "es" => "Spanish",
        "su" => "Sundanese",
        "sw" => "Swahili",
        "sv" => "Swedish",
        "tl" => "Tagalog",
        "tg" => "Tajik",
        "ta" => "Tamil",
        "te" => "Telugu",
        "th" => "Thai",
        "tr" => "Turkish",
        "ug" => "Uighur",
        "uk" => "Ukrainian",
        "ur" => "Urdu",
        "uz" => "Uzbek",
        "vi" => "Vietnamese",
        "vo" => "Volapük",
        "wa" => "Walloon",
        "cy" => "Welsh",
        "fy" => "Western Frisian",
        "xh" => "Xhosa",
        "yi" => "Yiddish",
        "yo" => "Yoruba",
        "zu" => "Zulu",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_get_returns_singleton() {
        let registry1 = LanguageRegistry::get();
        let registry2 = LanguageRegistry::get();

        // Should return the same instance (same memory address)
        assert!(std::ptr::eq(registry1, registry2));
    }

    // ==================== Lookup Tests ====================

    #[test]
    fn test_get_by_code_french() {
        let registry = LanguageRegistry::get();
        let info = registry.get_by_code("fr").expect("French should be registered");
        assert_eq!(info.code, "fr");
        assert_eq!(info.name, "French");
    }

    #[test]
    fn test_get_by_code_nonexistent() {
        let registry = LanguageRegistry::get();
        assert!(registry.get_by_code("xx").is_none());
        assert!(registry.get_by_code("").is_none());
    }

    #[test]
    fn test_name_of_unknown_is_empty() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.name_of("nb"), "Norwegian Bokmål");
        assert_eq!(registry.name_of(""), "");
        assert_eq!(registry.name_of("iw"), "");
    }

    #[test]
    fn test_registry_size_and_uniqueness() {
        let registry = LanguageRegistry::get();
        let codes = registry.codes();
        assert_eq!(codes.len(), 114);

        let unique: HashSet<_> = codes.iter().collect();
        assert_eq!(unique.len(), codes.len(), "registry codes must be unique");
        assert!(codes.iter().all(|code| code.len() == 2));
    }

    // ==================== Alias Tests ====================

    #[test]
    fn test_remap_legacy_codes() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.remap("iw"), "he");
        assert_eq!(registry.remap("in"), "id");
        assert_eq!(registry.remap("ji"), "yi");
        assert_eq!(registry.remap("co"), "it");
    }

    #[test]
    fn test_remap_passes_through_modern_codes() {
        let registry = LanguageRegistry::get();
        assert_eq!(registry.remap("de"), "de");
        assert_eq!(registry.remap(""), "");
    }

    #[test]
    fn test_alias_targets_are_registered() {
        let registry = LanguageRegistry::get();
        for (_, target) in LANGUAGE_ALIASES {
            assert!(registry.contains(target), "alias target {target} missing");
        }
    }

    // ==================== Short-Text Support Tests ====================

    #[test]
    fn test_short_text_support() {
        let registry = LanguageRegistry::get();
        assert!(registry.supports_short_text("en"));
        assert!(registry.supports_short_text("fr"));
        assert!(!registry.supports_short_text("yi"));
        assert!(!registry.supports_short_text("uz"));
    }

    #[test]
    fn test_short_text_unsupported_are_registered() {
        let registry = LanguageRegistry::get();
        for code in SHORT_TEXT_UNSUPPORTED {
            assert!(registry.contains(code), "{code} is not a registry code");
        }
    }
}
