//! Language registry and language pickers.
//!
//! # Architecture
//!
//! - `registry`: Single source of truth for supported languages, legacy code
//!   aliases, and the languages the short-text detector cannot be restricted to
//! - `choices`: `{label, value}` lists for parameter selectors
//!
//! # Example
//!
//! ```rust
//! use language_detection::language::LanguageRegistry;
//!
//! let registry = LanguageRegistry::get();
//! assert_eq!(registry.name_of("fr"), "French");
//! assert_eq!(registry.remap("iw"), "he");
//! ```

mod choices;
mod registry;

pub use choices::{language_choices, LanguageChoice, FALLBACK_PARAMETER, NO_FALLBACK};
pub use registry::{LanguageInfo, LanguageRegistry};
