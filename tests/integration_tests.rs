//! Integration tests for the language detection recipe
//!
//! These tests run the public API end to end: recipe configuration, the
//! detection policy with the real lingua and whatlang backends, and the CSV
//! source and sink.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use language_detection::config::{RecipeConfig, RecipeParams};
use language_detection::dataset::{
    detect_languages, detect_languages_with_policy, schema_sidecar_path, ColumnSchema,
    CsvRowSink, CsvRowSource, MemoryRowSink, MemoryRowSource, ProcessingOptions,
};
use language_detection::detection::{
    detect_batch, Classifier, DetectionPolicy, DetectionResult, PolicyConfig, RawDetection,
    SHORT_TEXT_MAX_CHARS,
};
use language_detection::error::ConfigError;

// ==================== Test Helpers ====================

const GERMAN_DOCUMENT: &str = "Die Stadtverwaltung hat am Montag angekündigt, dass die \
    Bibliothek im Zentrum ab dem nächsten Monat auch am Wochenende geöffnet sein wird. \
    Viele Bürger hatten sich längere Öffnungszeiten gewünscht.";

fn policy_config(scope: &[&str], minimum_score: f64, fallback: &str) -> PolicyConfig {
    PolicyConfig {
        language_scope: scope.iter().map(|code| code.to_string()).collect(),
        minimum_score,
        fallback_language: fallback.to_string(),
    }
}

fn recipe_params(json: &str) -> RecipeParams {
    let recipe: RecipeConfig = serde_json::from_str(json).expect("Should deserialize");
    RecipeParams::from_recipe(&recipe).expect("Should validate")
}

fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let mut reader = csv::Reader::from_path(path).expect("Should open CSV");
    let mut rows = vec![reader
        .headers()
        .expect("Should read header")
        .iter()
        .map(String::from)
        .collect()];
    rows.extend(
        reader
            .records()
            .map(|record| record.expect("Should read record").iter().map(String::from).collect()),
    );
    rows
}

/// Long-text classifier always answering with a legacy code.
struct LegacyCodeClassifier;

impl Classifier for LegacyCodeClassifier {
    fn classify(&self, _text: &str) -> Option<RawDetection> {
        Some(RawDetection::new("in", 0.97))
    }
}

/// Classifier reading the code from a `code:` prefix, e.g. "fr: bonjour".
struct PrefixClassifier;

impl Classifier for PrefixClassifier {
    fn classify(&self, text: &str) -> Option<RawDetection> {
        let (code, _) = text.split_once(':')?;
        Some(RawDetection::new(code.trim(), 0.9))
    }
}

// ==================== Policy Scenarios ====================

#[test]
fn test_short_french_document() {
    let policy = DetectionPolicy::new(policy_config(&["en", "fr"], 0.5, "en"))
        .expect("Policy should build");

    let result = policy.classify(Some("Bonjour tout le monde"));

    match result.score {
        Some(score) => {
            assert_eq!(result.code, "fr");
            assert_eq!(result.name, "French");
            assert!(score >= 0.5);
        }
        None => {
            assert_eq!(result.code, "en");
            assert_eq!(result.name, "English");
        }
    }
}

#[test]
fn test_long_german_document_uses_long_text_path() {
    assert!(GERMAN_DOCUMENT.chars().count() > SHORT_TEXT_MAX_CHARS);

    let policy = DetectionPolicy::new(policy_config(&["de", "en", "fr"], 0.0, ""))
        .expect("Policy should build");

    let result = policy.classify(Some(GERMAN_DOCUMENT));
    assert_eq!(result.code, "de");
    assert_eq!(result.name, "German");
    assert!(result.score.is_some());
}

#[test]
fn test_long_document_legacy_code_is_rewritten_before_scope_check() {
    let policy = DetectionPolicy::with_classifiers(
        policy_config(&["id"], 0.5, "en"),
        |_| Box::new(PrefixClassifier),
        Box::new(LegacyCodeClassifier),
    )
    .expect("Policy should build");

    let result = policy.classify(Some(GERMAN_DOCUMENT));
    assert_eq!(
        result,
        DetectionResult {
            code: "id".to_string(),
            name: "Indonesian".to_string(),
            score: Some(0.97),
        }
    );
}

#[test]
fn test_empty_scope_defaults_to_full_registry() {
    let policy = DetectionPolicy::with_classifiers(
        PolicyConfig::default(),
        |_| Box::new(PrefixClassifier),
        Box::new(PrefixClassifier),
    )
    .expect("Policy should build");

    assert_eq!(policy.language_scope().len(), 114);
    assert_eq!(policy.classify(Some("yo: bawo ni")).code, "yo");
}

#[test]
fn test_out_of_range_minimum_score_is_rejected() {
    let result = DetectionPolicy::with_classifiers(
        policy_config(&["en"], 2.0, ""),
        |_| Box::new(PrefixClassifier),
        Box::new(PrefixClassifier),
    );
    assert!(matches!(
        result,
        Err(ConfigError::MinimumScoreOutOfRange(_))
    ));

    let recipe: RecipeConfig =
        serde_json::from_str(r#"{"text_column": "text", "minimum_score": -1}"#).unwrap();
    assert_eq!(
        RecipeParams::from_recipe(&recipe),
        Err(ConfigError::MinimumScoreOutOfRange(-1.0))
    );
}

#[test]
fn test_null_and_empty_documents_with_real_backends() {
    let policy = DetectionPolicy::new(policy_config(&["en"], 0.0, "en"))
        .expect("Policy should build");

    assert_eq!(policy.classify(None), DetectionResult::empty());
    assert_eq!(policy.classify(Some("")), DetectionResult::empty());
}

#[test]
fn test_classification_is_deterministic() {
    let policy = DetectionPolicy::new(policy_config(&["en", "fr", "de"], 0.2, "en"))
        .expect("Policy should build");

    for doc in ["Bonjour tout le monde", "Good morning everyone", GERMAN_DOCUMENT] {
        assert_eq!(policy.classify(Some(doc)), policy.classify(Some(doc)));
    }
}

#[tokio::test]
async fn test_batch_with_real_backends_keeps_order() {
    let policy = Arc::new(
        DetectionPolicy::new(policy_config(&["en", "fr", "de"], 0.0, ""))
            .expect("Policy should build"),
    );
    let documents = vec![
        Some(GERMAN_DOCUMENT.to_string()),
        None,
        Some(GERMAN_DOCUMENT.to_string()),
    ];

    let results = detect_batch(policy, documents, 4)
        .await
        .expect("Batch should succeed");

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].code, "de");
    assert_eq!(results[1], DetectionResult::empty());
    assert_eq!(results[2].code, "de");
}

// ==================== Recipe Scenarios ====================

#[tokio::test]
async fn test_csv_recipe_end_to_end() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let input_path = temp_dir.path().join("input.csv");
    let output_path = temp_dir.path().join("output.csv");

    let mut writer = csv::Writer::from_path(&input_path).expect("Should create input");
    writer.write_record(["id", "text"]).unwrap();
    writer.write_record(["1", GERMAN_DOCUMENT]).unwrap();
    writer.write_record(["2", ""]).unwrap();
    writer.flush().unwrap();
    fs::write(
        schema_sidecar_path(&input_path),
        r#"[{"name": "id", "comment": "Row identifier"}]"#,
    )
    .unwrap();

    let params = recipe_params(
        r#"{"text_column": "text", "language_scope": ["de", "en"], "minimum_score": 0, "fallback_language": "None"}"#,
    );

    let mut source = CsvRowSource::open(&input_path).expect("Should open input");
    let mut sink = CsvRowSink::create(&output_path).expect("Should create output");
    let summary = detect_languages(&mut source, &mut sink, &params, &ProcessingOptions::default())
        .await
        .expect("Run should succeed");

    assert_eq!(summary.rows, 2);
    assert_eq!(summary.report.detected, 1);
    assert_eq!(summary.report.empty, 1);

    let rows = read_csv(&output_path);
    assert_eq!(
        rows[0],
        vec![
            "id",
            "text",
            "text_language_code",
            "text_language_name",
            "text_language_score"
        ]
    );
    assert_eq!(rows[1][2], "de");
    assert_eq!(rows[1][3], "German");
    assert!(rows[1][4].parse::<f64>().is_ok());
    assert_eq!(rows[2][2..], ["", "", ""]);

    let sidecar = fs::read_to_string(schema_sidecar_path(&output_path)).unwrap();
    let schema: Vec<ColumnSchema> = serde_json::from_str(&sidecar).unwrap();
    assert_eq!(schema[0].comment.as_deref(), Some("Row identifier"));
    assert_eq!(schema[1].comment, None);
    assert_eq!(
        schema[4].comment.as_deref(),
        Some("Confidence score from 0 to 1")
    );
}

#[tokio::test]
async fn test_two_text_columns_produce_independent_triples() {
    let mut source = MemoryRowSource::from_rows(
        &["title", "body", "body_language_code"],
        &[
            &["fr: Le titre", "de: Der Text", "user value"],
            &["en: A title", "", "other"],
        ],
    );
    let mut sink = MemoryRowSink::new();
    let policy = Arc::new(
        DetectionPolicy::with_classifiers(
            policy_config(&["en", "fr", "de"], 0.5, ""),
            |_| Box::new(PrefixClassifier),
            Box::new(PrefixClassifier),
        )
        .expect("Policy should build"),
    );

    detect_languages_with_policy(
        &mut source,
        &mut sink,
        &["title".to_string(), "body".to_string()],
        policy,
        &ProcessingOptions {
            chunk_size: 1,
            num_workers: 2,
        },
    )
    .await
    .expect("Run should succeed");

    assert_eq!(sink.column("title_language_code"), Some(vec!["fr", "en"]));
    assert_eq!(
        sink.column("title_language_name"),
        Some(vec!["French", "English"])
    );
    assert_eq!(sink.column("body_language_code"), Some(vec!["user value", "other"]));
    assert_eq!(sink.column("body_language_code_0"), Some(vec!["de", ""]));
    assert_eq!(sink.column("body_language_name"), Some(vec!["German", ""]));
    assert_eq!(sink.column("body_language_score"), Some(vec!["0.9", ""]));
}

#[tokio::test]
async fn test_unknown_text_column_aborts_before_output() {
    let temp_dir = TempDir::new().expect("Should create temp dir");
    let input_path = temp_dir.path().join("input.csv");
    let output_path = temp_dir.path().join("output.csv");
    fs::write(&input_path, "id,text\n1,hello\n").unwrap();

    let params = recipe_params(r#"{"text_column": "body", "minimum_score": 0}"#);
    let mut source = CsvRowSource::open(&input_path).unwrap();
    let mut sink = CsvRowSink::create(&output_path).unwrap();

    let err = detect_languages(&mut source, &mut sink, &params, &ProcessingOptions::default())
        .await
        .expect_err("Run should fail");

    assert_eq!(
        err.downcast_ref::<ConfigError>(),
        Some(&ConfigError::UnknownTextColumn("body".to_string()))
    );
    assert!(!schema_sidecar_path(&output_path).exists());
}
