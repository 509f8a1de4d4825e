//! Integration tests for configuration loading and validation
//!
//! Tests that modify environment variables hold `ENV_MUTEX` to avoid
//! interfering with each other.

use cvscrub::config::{load_config, load_config_or_default, OracleProvider};
use cvscrub::redaction::{AnonymizerStrategy, RedactionLevel};
use secrecy::ExposeSecret;
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;

// Mutex to serialize tests that modify environment variables
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Helper function to clean up environment variables
fn cleanup_env_vars() {
    for var in [
        "CVSCRUB_APPLICATION_LOG_LEVEL",
        "CVSCRUB_REDACTION_LEVEL",
        "CVSCRUB_REDACTION_PHONE_STRATEGY",
        "CVSCRUB_REDACTION_ANONYMIZER",
        "CVSCRUB_REDACTION_WORD_BOUNDARIES",
        "CVSCRUB_ORACLE_PROVIDER",
        "CVSCRUB_ORACLE_BASE_URL",
        "CVSCRUB_ORACLE_API_KEY",
        "CVSCRUB_ORACLE_MODEL",
        "CVSCRUB_ORACLE_API_VERSION",
        "CVSCRUB_ORACLE_TIMEOUT_SECONDS",
        "CVSCRUB_ORACLE_MAX_RETRIES",
        "CVSCRUB_LOGGING_LOCAL_ENABLED",
        "TEST_CVSCRUB_ORACLE_KEY",
    ] {
        std::env::remove_var(var);
    }
}

fn write_config(contents: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(contents.as_bytes()).unwrap();
    temp_file.flush().unwrap();
    temp_file
}

#[test]
fn test_load_complete_config() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[application]
log_level = "debug"

[redaction]
level = "strict"
phone_strategy = "regex"
anonymizer = "span_based"
word_boundaries = true

[redaction.audit]
enabled = false
log_path = "/tmp/cvscrub/audit.log"
json_format = true

[oracle]
provider = "openai"
base_url = "https://llm.example.com/v1"
api_key = "sk-test"
model = "extractor-large"
temperature = 0.0
max_tokens = 2048
timeout_seconds = 30

[oracle.retry]
max_retries = 5
initial_delay_ms = 100
max_delay_ms = 2000
backoff_multiplier = 2.0

[logging]
local_enabled = false
local_path = "/tmp/cvscrub/logs"
local_rotation = "daily"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "debug");
    assert_eq!(config.redaction.level, RedactionLevel::Strict);
    assert_eq!(config.redaction.phone_strategy, "regex");
    assert_eq!(config.redaction.anonymizer, AnonymizerStrategy::SpanBased);
    assert!(config.redaction.word_boundaries);

    let oracle = config.oracle.expect("oracle section");
    assert_eq!(oracle.provider, OracleProvider::OpenAi);
    assert_eq!(oracle.model, "extractor-large");
    assert_eq!(oracle.max_tokens, 2048);
    assert_eq!(oracle.retry.max_retries, 5);
    assert_eq!(oracle.retry.delay_for_attempt(1), 100);
    assert_eq!(oracle.retry.delay_for_attempt(3), 400);
    assert_eq!(oracle.retry.delay_for_attempt(10), 2000);
    assert_eq!(
        oracle.api_key.as_ref().map(|k| k.expose_secret().as_str()),
        Some("sk-test")
    );
}

#[test]
fn test_minimal_config_uses_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config("[redaction]\n");
    let config = load_config(temp_file.path()).unwrap();

    assert_eq!(config.application.log_level, "info");
    assert_eq!(config.redaction.level, RedactionLevel::Standard);
    assert_eq!(config.redaction.anonymizer, AnonymizerStrategy::VariationSweep);
    assert!(!config.redaction.word_boundaries);
    assert!(config.oracle.is_none());
}

#[test]
fn test_env_var_substitution() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("TEST_CVSCRUB_ORACLE_KEY", "substituted-key");

    let temp_file = write_config(
        r#"
[oracle]
base_url = "https://llm.example.com/v1"
api_key = "${TEST_CVSCRUB_ORACLE_KEY}"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    let key = config.oracle.and_then(|o| o.api_key).unwrap();
    assert_eq!(key.expose_secret().as_str(), "substituted-key");

    cleanup_env_vars();
}

#[test]
fn test_missing_substitution_variable_is_reported() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let temp_file = write_config(
        r#"
[oracle]
api_key = "${TEST_CVSCRUB_ORACLE_KEY}"
"#,
    );

    let err = load_config(temp_file.path()).unwrap_err().to_string();
    assert!(err.contains("TEST_CVSCRUB_ORACLE_KEY"), "{err}");
}

#[test]
fn test_env_overrides_take_precedence() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CVSCRUB_APPLICATION_LOG_LEVEL", "trace");
    std::env::set_var("CVSCRUB_REDACTION_LEVEL", "complete");
    std::env::set_var("CVSCRUB_REDACTION_ANONYMIZER", "span-based");
    std::env::set_var("CVSCRUB_ORACLE_MODEL", "override-model");

    let temp_file = write_config(
        r#"
[application]
log_level = "info"

[redaction]
level = "minimal"

[oracle]
base_url = "https://llm.example.com/v1"
model = "file-model"
"#,
    );

    let config = load_config(temp_file.path()).unwrap();
    assert_eq!(config.application.log_level, "trace");
    assert_eq!(config.redaction.level, RedactionLevel::Complete);
    assert_eq!(config.redaction.anonymizer, AnonymizerStrategy::SpanBased);
    assert_eq!(config.oracle.unwrap().model, "override-model");

    cleanup_env_vars();
}

#[test]
fn test_api_key_env_enables_default_oracle() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CVSCRUB_ORACLE_API_KEY", "env-key");

    let temp_file = write_config("[redaction]\nlevel = \"standard\"\n");
    let config = load_config(temp_file.path()).unwrap();

    let oracle = config.oracle.expect("oracle enabled from env");
    assert_eq!(oracle.provider, OracleProvider::OpenAi);
    assert_eq!(oracle.api_key.unwrap().expose_secret().as_str(), "env-key");

    cleanup_env_vars();
}

#[test]
fn test_invalid_env_level_is_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();
    std::env::set_var("CVSCRUB_REDACTION_LEVEL", "paranoid");

    let temp_file = write_config("[redaction]\n");
    let result = load_config(temp_file.path());
    assert!(result.is_err());

    cleanup_env_vars();
}

#[test]
fn test_missing_file_is_error_for_strict_loader() {
    let result = load_config("/nonexistent/cvscrub.toml");
    let err = result.unwrap_err().to_string();
    assert!(err.contains("not found"), "{err}");
}

#[test]
fn test_missing_file_falls_back_to_defaults() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let config = load_config_or_default("/nonexistent/cvscrub.toml").unwrap();
    assert_eq!(config.redaction.level, RedactionLevel::Standard);
    assert!(config.oracle.is_none());
}

#[test]
fn test_azure_requires_api_version_and_key() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    let without_version = write_config(
        r#"
[oracle]
provider = "azure"
base_url = "https://contoso.openai.azure.com"
api_key = "azure-key"
model = "pii-extractor"
"#,
    );
    let err = load_config(without_version.path()).unwrap_err().to_string();
    assert!(err.contains("api_version"), "{err}");

    let without_key = write_config(
        r#"
[oracle]
provider = "azure"
base_url = "https://contoso.openai.azure.com"
model = "pii-extractor"
api_version = "2024-08-01-preview"
"#,
    );
    let err = load_config(without_key.path()).unwrap_err().to_string();
    assert!(err.contains("api_key"), "{err}");

    let complete = write_config(
        r#"
[oracle]
provider = "azure"
base_url = "https://contoso.openai.azure.com"
api_key = "azure-key"
model = "pii-extractor"
api_version = "2024-08-01-preview"
"#,
    );
    let config = load_config(complete.path()).unwrap();
    assert_eq!(config.oracle.unwrap().provider, OracleProvider::Azure);
}

#[test]
fn test_invalid_values_are_rejected() {
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    cleanup_env_vars();

    for contents in [
        "[application]\nlog_level = \"verbose\"\n",
        "[redaction]\nphone_strategy = \"psychic\"\n",
        "[oracle]\nbase_url = \"ftp://llm.example.com\"\n",
        "[oracle]\ntemperature = 3.5\n",
        "[oracle.retry]\nmax_retries = 0\n",
    ] {
        let temp_file = write_config(contents);
        assert!(
            load_config(temp_file.path()).is_err(),
            "expected rejection for {contents:?}"
        );
    }
}
