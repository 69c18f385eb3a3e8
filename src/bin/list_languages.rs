use anyhow::{Context, Result};
use language_detection::language::language_choices;
use serde_json::json;

/// Print the language choices of a parameter selector as JSON.
///
/// Usage: `list-languages [parameter_name]`
fn main() -> Result<()> {
    let parameter_name = std::env::args().nth(1).unwrap_or_default();
    let choices = language_choices(&parameter_name);

    let output = serde_json::to_string_pretty(&json!({ "choices": choices }))
        .context("Failed to serialize language choices")?;
    println!("{}", output);

    Ok(())
}
