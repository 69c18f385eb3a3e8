//! Column schema and output column descriptions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Suffix and description of each column appended per text column, in
/// output order.
pub const OUTPUT_COLUMN_DESCRIPTIONS: [(&str, &str); 3] = [
    ("language_code", "Language code in ISO 639-1 format"),
    ("language_name", "Language name in ISO 639-1 format"),
    ("language_score", "Confidence score from 0 to 1"),
];

/// One column of a dataset schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,

    /// Human readable description of the column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: None,
        }
    }

    pub fn with_comment(name: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            comment: Some(comment.into()),
        }
    }
}

/// Build the described output schema.
///
/// Every output column takes its description from `descriptions`, except
/// columns whose name exists in the input schema, which keep the input's
/// comment.
pub fn describe_output_schema(
    input: &[ColumnSchema],
    output_names: &[String],
    descriptions: &HashMap<String, String>,
) -> Vec<ColumnSchema> {
    output_names
        .iter()
        .map(|name| {
            let comment = match input.iter().find(|col| &col.name == name) {
                Some(input_col) => input_col.comment.clone(),
                None => descriptions.get(name).cloned(),
            };
            ColumnSchema {
                name: name.clone(),
                comment,
            }
        })
        .collect()
}
