//! Detect the language of text columns in tabular datasets.
//!
//! Short documents are classified by lingua restricted to the language scope,
//! long documents by whatlang. Answers outside the scope or below the minimum
//! score are replaced by a fallback language.

pub mod config;
pub mod dataset;
pub mod detection;
pub mod error;
pub mod language;
