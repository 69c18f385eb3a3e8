//! Language choices for parameter pickers.
//!
//! The plugin's parameter UI asks for a list of `{label, value}` pairs when
//! rendering the language scope and fallback language selectors. The
//! fallback selector gets an extra "None" entry so users can opt out.

use crate::language::LanguageRegistry;
use serde::Serialize;

/// Parameter name of the fallback language selector.
pub const FALLBACK_PARAMETER: &str = "fallback_language";

/// Sentinel value the fallback selector uses for "no fallback".
pub const NO_FALLBACK: &str = "None";

/// A single entry of a language selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageChoice {
    pub label: &'static str,
    pub value: &'static str,
}

/// Build the choice list for a given parameter.
///
/// # Arguments
/// * `parameter_name` - Name of the parameter being rendered
///
/// # Returns
/// One choice per registry language, preceded by a "None" choice when
/// `parameter_name` is the fallback language selector.
pub fn language_choices(parameter_name: &str) -> Vec<LanguageChoice> {
    let registry = LanguageRegistry::get();
    let mut choices = Vec::with_capacity(registry.list_all().len() + 1);

    if parameter_name == FALLBACK_PARAMETER {
        choices.push(LanguageChoice {
            label: NO_FALLBACK,
            value: NO_FALLBACK,
        });
    }

    choices.extend(registry.list_all().iter().map(|lang| LanguageChoice {
        label: lang.name,
        value: lang.code,
    }));

    choices
}
