use crate::dataset::{ProcessingOptions, DEFAULT_CHUNK_SIZE};
use crate::detection::{PolicyConfig, DEFAULT_NUM_WORKERS};
use crate::error::ConfigError;
use crate::language::{LanguageRegistry, NO_FALLBACK};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

/// A single value or a list of values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// A number, possibly written as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Raw recipe configuration, as written by the plugin UI.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub text_column: Option<OneOrMany>,
    #[serde(default)]
    pub language_scope: Vec<String>,
    #[serde(default)]
    pub minimum_score: Option<NumberOrText>,
    #[serde(default)]
    pub fallback_language: Option<String>,
}

impl RecipeConfig {
    /// Read a recipe configuration JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe config {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse recipe config {}", path.display()))
    }

    /// Build a recipe configuration from environment variables.
    ///
    /// `TEXT_COLUMN` and `LANGUAGE_SCOPE` are comma separated lists.
    pub fn from_env() -> Self {
        Self {
            text_column: std::env::var("TEXT_COLUMN")
                .ok()
                .map(|v| OneOrMany::Many(split_list(&v))),
            language_scope: std::env::var("LANGUAGE_SCOPE")
                .map(|v| split_list(&v))
                .unwrap_or_default(),
            minimum_score: std::env::var("MINIMUM_SCORE").ok().map(NumberOrText::Text),
            fallback_language: std::env::var("FALLBACK_LANGUAGE").ok(),
        }
    }
}

/// Validated recipe parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeParams {
    pub text_columns: Vec<String>,
    pub policy: PolicyConfig,
}

impl RecipeParams {
    /// Validate a raw recipe configuration.
    ///
    /// # Errors
    /// * `MissingTextColumn` if no non-empty text column is given
    /// * `MissingMinimumScore` / `InvalidMinimumScore` / `MinimumScoreOutOfRange`
    /// * `EmptyLanguageScope` if the scope is empty after defaulting
    pub fn from_recipe(recipe: &RecipeConfig) -> Result<Self, ConfigError> {
        // Text column
        let text_columns: Vec<String> = match &recipe.text_column {
            Some(OneOrMany::One(column)) => vec![column.trim().to_string()],
            Some(OneOrMany::Many(columns)) => {
                columns.iter().map(|c| c.trim().to_string()).collect()
            }
            None => Vec::new(),
        };
        if text_columns.is_empty() || text_columns.iter().any(String::is_empty) {
            return Err(ConfigError::MissingTextColumn);
        }
        info!("Text column: {}", text_columns.join(", "));

        // Language scope
        let language_scope: Vec<String> = if recipe.language_scope.is_empty() {
            LanguageRegistry::get()
                .codes()
                .into_iter()
                .map(String::from)
                .collect()
        } else {
            recipe.language_scope.clone()
        };
        if language_scope.is_empty() {
            return Err(ConfigError::EmptyLanguageScope);
        }
        info!(
            "Scope of {} languages: {:?}",
            language_scope.len(),
            language_scope
        );

        // Minimum score
        let minimum_score = match &recipe.minimum_score {
            Some(NumberOrText::Number(score)) => *score,
            Some(NumberOrText::Text(text)) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidMinimumScore(text.clone()))?,
            None => return Err(ConfigError::MissingMinimumScore),
        };
        if !(0.0..=1.0).contains(&minimum_score) {
            return Err(ConfigError::MinimumScoreOutOfRange(minimum_score));
        }
        if minimum_score == 0.0 {
            info!("No minimum score for detection");
        } else {
            info!("Minimum score for detection: {:.2}", minimum_score);
        }

        // Fallback language
        let fallback_language = match recipe.fallback_language.as_deref().map(str::trim) {
            None | Some("") | Some(NO_FALLBACK) => String::new(),
            Some(code) => code.to_string(),
        };
        if fallback_language.is_empty() {
            info!("No fallback language");
        } else {
            info!("Fallback language: {}", fallback_language);
        }

        Ok(Self {
            text_columns,
            policy: PolicyConfig {
                language_scope,
                minimum_score,
                fallback_language,
            },
        })
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    // Recipe
    pub recipe: RecipeParams,

    // Input / output
    pub input_path: PathBuf,
    pub output_path: PathBuf,

    // Processing
    pub chunk_size: usize,
    pub num_workers: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // Recipe - from a JSON file if RECIPE_CONFIG is set, else from variables
        let recipe_config = match std::env::var("RECIPE_CONFIG") {
            Ok(path) => RecipeConfig::from_file(Path::new(&path))?,
            Err(_) => RecipeConfig::from_env(),
        };
        let recipe = RecipeParams::from_recipe(&recipe_config)?;

        Ok(Self {
            recipe,

            // Input / output
            input_path: required_var("INPUT_PATH")?.into(),
            output_path: required_var("OUTPUT_PATH")?.into(),

            // Processing
            chunk_size: parsed_var("CHUNK_SIZE", DEFAULT_CHUNK_SIZE)?,
            num_workers: parsed_var("NUM_WORKERS", DEFAULT_NUM_WORKERS)?,
        })
    }

    pub fn processing_options(&self) -> ProcessingOptions {
        ProcessingOptions {
            chunk_size: self.chunk_size,
            num_workers: self.num_workers,
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn required_var(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or(ConfigError::MissingSetting(name))
}

fn parsed_var(name: &'static str, default: usize) -> Result<usize, ConfigError> {
    match std::env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .ok()
            .filter(|&parsed: &usize| parsed > 0)
            .ok_or(ConfigError::InvalidSetting { name, value }),
        Err(_) => Ok(default),
    }
}
