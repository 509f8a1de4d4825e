//! Redaction configuration

use crate::redaction::models::RedactionLevel;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Entity-list anonymizer strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnonymizerStrategy {
    /// Replace every occurrence of every variation, longest entity first
    #[default]
    VariationSweep,
    /// Locate variations as spans, resolve overlaps, substitute end-to-start
    SpanBased,
}

impl std::str::FromStr for AnonymizerStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "variation_sweep" | "sweep" => Ok(Self::VariationSweep),
            "span_based" | "span" => Ok(Self::SpanBased),
            other => Err(format!(
                "Invalid anonymizer '{other}'. Must be one of: variation_sweep, span_based"
            )),
        }
    }
}

/// Redaction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Default redaction level
    #[serde(default)]
    pub level: RedactionLevel,

    /// Phone detection strategy: auto, validated or regex
    #[serde(default = "default_phone_strategy")]
    pub phone_strategy: String,

    /// Path to a custom pattern library TOML file
    #[serde(default)]
    pub pattern_library: Option<PathBuf>,

    /// Strategy for the entity-list anonymizer
    #[serde(default)]
    pub anonymizer: AnonymizerStrategy,

    /// Require word boundaries around swept variations
    #[serde(default)]
    pub word_boundaries: bool,

    /// Audit logging configuration
    #[serde(default)]
    pub audit: AuditConfig,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            level: RedactionLevel::default(),
            phone_strategy: default_phone_strategy(),
            pattern_library: None,
            anonymizer: AnonymizerStrategy::default(),
            word_boundaries: false,
            audit: AuditConfig::default(),
        }
    }
}

impl RedactionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let valid_strategies = ["auto", "validated", "regex"];
        if !valid_strategies.contains(&self.phone_strategy.to_lowercase().as_str()) {
            anyhow::bail!(
                "Invalid phone_strategy '{}'. Must be one of: {}",
                self.phone_strategy,
                valid_strategies.join(", ")
            );
        }

        if let Some(ref path) = self.pattern_library {
            if !path.exists() {
                anyhow::bail!("Pattern library file not found: {}", path.display());
            }
            if path.extension().and_then(|s| s.to_str()) != Some("toml") {
                anyhow::bail!("Pattern library must be a TOML file: {}", path.display());
            }
        }

        self.audit
            .validate()
            .context("Invalid audit configuration")?;

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_LEVEL") {
            self.level = val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid CVSCRUB_REDACTION_LEVEL value")?;
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_PHONE_STRATEGY") {
            self.phone_strategy = val;
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_PATTERN_LIBRARY") {
            self.pattern_library = Some(PathBuf::from(val));
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_ANONYMIZER") {
            self.anonymizer = val
                .parse()
                .map_err(|e: String| anyhow::anyhow!(e))
                .context("Invalid CVSCRUB_REDACTION_ANONYMIZER value")?;
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_WORD_BOUNDARIES") {
            self.word_boundaries = val
                .parse()
                .context("Invalid CVSCRUB_REDACTION_WORD_BOUNDARIES value")?;
        }

        self.audit.apply_env_overrides()?;

        Ok(())
    }
}

/// Audit logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Enable audit logging
    #[serde(default)]
    pub enabled: bool,

    /// Audit log file path
    #[serde(default = "default_audit_log_path")]
    pub log_path: PathBuf,

    /// Use JSON lines instead of plain text
    #[serde(default = "default_audit_json_format")]
    pub json_format: bool,
}

fn default_phone_strategy() -> String {
    "auto".to_string()
}

fn default_audit_log_path() -> PathBuf {
    PathBuf::from("./audit/redaction.log")
}

fn default_audit_json_format() -> bool {
    true
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            log_path: default_audit_log_path(),
            json_format: default_audit_json_format(),
        }
    }
}

impl AuditConfig {
    /// Validate audit configuration
    pub fn validate(&self) -> Result<()> {
        if self.enabled {
            if let Some(parent) = self.log_path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!(
                            "Failed to create audit log directory: {}",
                            parent.display()
                        )
                    })?;
                }
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_AUDIT_ENABLED") {
            self.enabled = val
                .parse()
                .context("Invalid CVSCRUB_REDACTION_AUDIT_ENABLED value")?;
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_AUDIT_LOG_PATH") {
            self.log_path = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("CVSCRUB_REDACTION_AUDIT_JSON_FORMAT") {
            self.json_format = val
                .parse()
                .context("Invalid CVSCRUB_REDACTION_AUDIT_JSON_FORMAT value")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = RedactionConfig::default();
        assert_eq!(config.level, RedactionLevel::Standard);
        assert_eq!(config.phone_strategy, "auto");
        assert_eq!(config.anonymizer, AnonymizerStrategy::VariationSweep);
        assert!(!config.word_boundaries);
        assert!(!config.audit.enabled);
        assert!(config.audit.json_format);
    }

    #[test]
    fn test_config_validation() {
        let config = RedactionConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_phone_strategy() {
        let config = RedactionConfig {
            phone_strategy: "guess".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_pattern_library() {
        let config = RedactionConfig {
            pattern_library: Some(PathBuf::from("/nonexistent/patterns.toml")),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_audit_validation_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("nested/audit/redaction.log");
        let config = AuditConfig {
            enabled: true,
            log_path: log_path.clone(),
            json_format: true,
        };

        assert!(config.validate().is_ok());
        assert!(log_path.parent().unwrap().exists());
    }

    #[test]
    fn test_anonymizer_strategy_parsing() {
        assert_eq!(
            "span-based".parse::<AnonymizerStrategy>(),
            Ok(AnonymizerStrategy::SpanBased)
        );
        assert_eq!(
            "variation_sweep".parse::<AnonymizerStrategy>(),
            Ok(AnonymizerStrategy::VariationSweep)
        );
        assert!("magic".parse::<AnonymizerStrategy>().is_err());
    }

    #[test]
    fn test_deserialize_partial_section() {
        let config: RedactionConfig = toml::from_str(
            r#"
level = "strict"
anonymizer = "span_based"

[audit]
enabled = false
"#,
        )
        .unwrap();
        assert_eq!(config.level, RedactionLevel::Strict);
        assert_eq!(config.anonymizer, AnonymizerStrategy::SpanBased);
        assert_eq!(config.phone_strategy, "auto");
    }
}
