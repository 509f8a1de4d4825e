//! Error handling and degradation tests for the redaction engine

use cvscrub::adapters::llm::{Oracle, OracleRequest, StaticOracle};
use cvscrub::domain::{OracleError, ScrubError};
use cvscrub::redaction::audit::hash_pii_value;
use cvscrub::redaction::{AuditConfig, RedactionConfig, RedactionEngine, RedactionLevel};
use async_trait::async_trait;
use std::io::Write;
use std::path::PathBuf;
use tempfile::tempdir;

struct UnreachableOracle;

#[async_trait]
impl Oracle for UnreachableOracle {
    async fn complete(&self, _request: &OracleRequest) -> Result<String, OracleError> {
        Err(OracleError::Network("connection refused".to_string()))
    }

    fn name(&self) -> &str {
        "unreachable"
    }
}

fn create_test_config() -> RedactionConfig {
    RedactionConfig {
        phone_strategy: "regex".to_string(),
        ..Default::default()
    }
}

#[test]
fn test_invalid_pattern_library_path() {
    let config = RedactionConfig {
        pattern_library: Some(PathBuf::from("/nonexistent/path/patterns.toml")),
        ..create_test_config()
    };

    let result = RedactionEngine::new(config);
    assert!(
        matches!(result, Err(ScrubError::Configuration(_))),
        "Should fail with invalid pattern library path"
    );
}

#[test]
fn test_invalid_regex_in_pattern_library() {
    let mut library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        library,
        "[[patterns]]\ncategory = \"email\"\nconfidence = 0.9\npatterns = ['''[unclosed''']"
    )
    .unwrap();

    let config = RedactionConfig {
        pattern_library: Some(library.path().to_path_buf()),
        ..create_test_config()
    };

    assert!(matches!(
        RedactionEngine::new(config),
        Err(ScrubError::Pattern(_))
    ));
}

#[test]
fn test_custom_pattern_library_replaces_catalog() {
    let mut library = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        library,
        "[[patterns]]\ncategory = \"employee_number\"\nconfidence = 0.8\npatterns = ['''\\bEMP-\\d{{5}}\\b''']"
    )
    .unwrap();

    let config = RedactionConfig {
        pattern_library: Some(library.path().to_path_buf()),
        ..create_test_config()
    };
    let engine = RedactionEngine::new(config).unwrap();

    let detections = engine.detect_structured("Badge EMP-12345, mail jane@example.com");
    assert_eq!(detections.tokens.len(), 1);
    assert_eq!(detections.tokens[0].category.as_str(), "employee_number");
    assert_eq!(detections.tokens[0].original_value, "EMP-12345");
}

#[test]
fn test_invalid_phone_strategy() {
    let config = RedactionConfig {
        phone_strategy: "carrier-pigeon".to_string(),
        ..Default::default()
    };

    assert!(matches!(
        RedactionEngine::new(config),
        Err(ScrubError::Configuration(_))
    ));
}

#[tokio::test]
async fn test_missing_oracle_is_configuration_error() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();

    let err = engine
        .redact("jane@example.com", None, RedactionLevel::Standard)
        .await
        .unwrap_err();

    assert!(matches!(err, ScrubError::OracleNotConfigured));
}

#[tokio::test]
async fn test_unreachable_oracle_keeps_structured_results() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();
    let text = "Jane Doe - jane@example.com - ID 784-1985-1234567-8";

    let result = engine
        .redact(text, Some(&UnreachableOracle), RedactionLevel::Standard)
        .await
        .unwrap();

    assert_eq!(result.quality_metrics.semantic_pii_count, 0);
    assert_eq!(result.tokens.len(), 2);
    assert_eq!(
        result.redacted_text,
        "Jane Doe - [PII_EMAIL_001] - ID [PII_UAE_EMIRATES_ID_002]"
    );
}

#[tokio::test]
async fn test_malformed_json_handling() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();
    let text = "Jane Doe - jane@example.com";

    for payload in [
        "",
        "{",
        r#"{"pii_entities": "not a list"}"#,
        r#"[{"original_value": 42}]"#,
        "```json\n{\"pii_entities\": [\n```",
    ] {
        let result = engine
            .redact(text, Some(&StaticOracle::new(payload)), RedactionLevel::Standard)
            .await
            .unwrap();
        assert_eq!(result.tokens.len(), 1, "payload {payload:?}");
    }
}

#[tokio::test]
async fn test_fenced_payload_is_accepted() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();
    let payload = "```json\n{\"pii_entities\": [{\"original_value\": \"Jane Doe\", \"pii_type\": \"name\"}]}\n```";

    let result = engine
        .redact(
            "Jane Doe - jane@example.com",
            Some(&StaticOracle::new(payload)),
            RedactionLevel::Standard,
        )
        .await
        .unwrap();

    assert_eq!(result.redacted_text, "[PII_NAME_001] - [PII_EMAIL_002]");
}

#[tokio::test]
async fn test_empty_text() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();

    let result = engine
        .redact("", Some(&StaticOracle::empty()), RedactionLevel::Complete)
        .await
        .unwrap();

    assert!(result.redacted_text.is_empty());
    assert!(result.tokens.is_empty());
    assert_eq!(result.quality_metrics.total_pii_detected, 0);
}

#[tokio::test]
async fn test_unicode_text_keeps_char_boundaries() {
    let engine = RedactionEngine::new(create_test_config()).unwrap();
    let text = "السيرة الذاتية - Zoë Ångström, zoe@example.com, هاتف +971 50 123 4567";
    let oracle = StaticOracle::new(
        r#"{"pii_entities": [{"original_value": "Zoë Ångström", "pii_type": "name"}]}"#,
    );

    let result = engine
        .redact(text, Some(&oracle), RedactionLevel::Standard)
        .await
        .unwrap();

    assert!(result.tokens.iter().all(|t| t.is_faithful_to(text)));
    assert_eq!(
        result.redacted_text,
        "السيرة الذاتية - [PII_NAME_001], [PII_EMAIL_002], هاتف [PII_PHONE_003]"
    );
}

#[tokio::test]
async fn test_audit_log_records_hashes_only() {
    let dir = tempdir().unwrap();
    let log_path = dir.path().join("audit").join("redaction.log");
    let config = RedactionConfig {
        audit: AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        },
        ..create_test_config()
    };
    let engine = RedactionEngine::new(config).unwrap();

    engine
        .redact(
            "Email jane@example.com",
            Some(&StaticOracle::empty()),
            RedactionLevel::Standard,
        )
        .await
        .unwrap();

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(!contents.contains("jane@example.com"));
    assert!(contents.contains(&hash_pii_value("jane@example.com")));

    let entry: serde_json::Value = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(entry["level"], "standard");
    assert_eq!(entry["redacted_count"], 1);
}
