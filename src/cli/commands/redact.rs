//! Redact command implementation
//!
//! Runs the full detection pipeline over one document and writes the
//! redacted text (or the complete result as JSON).

use super::{read_document, resolve_oracle, write_output};
use crate::config::load_config_or_default;
use crate::domain::ScrubError;
use crate::redaction::{RedactionEngine, RedactionLevel};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the redact command
#[derive(Args, Debug)]
pub struct RedactArgs {
    /// Document to redact (plain text or markdown)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Redaction level (minimal, standard, strict, complete)
    #[arg(short, long)]
    pub level: Option<RedactionLevel>,

    /// Pre-computed oracle response to use instead of the configured service
    #[arg(long, value_name = "FILE")]
    pub entities: Option<PathBuf>,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl RedactArgs {
    /// Execute the redact command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting redact command");

        if self.format != "text" && self.format != "json" {
            eprintln!("❌ Invalid format '{}'. Must be one of: text, json", self.format);
            return Ok(2);
        }

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let level = self.level.unwrap_or(config.redaction.level);
        let engine = match RedactionEngine::new(config.redaction.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let oracle = resolve_oracle(&config, self.entities.as_deref())?;
        let text = read_document(&self.input)?;

        let result = match engine.redact(&text, oracle.as_deref(), level).await {
            Ok(result) => result,
            Err(ScrubError::OracleNotConfigured) => {
                eprintln!("❌ Redaction requires a semantic oracle");
                eprintln!("   Configure an [oracle] section or pass --entities <FILE>");
                return Ok(2);
            }
            Err(e) => return Err(e.into()),
        };

        let rendered = if self.format == "json" {
            serde_json::to_string_pretty(&result)?
        } else {
            result.redacted_text.clone()
        };
        write_output(self.output.as_deref(), &rendered)?;

        let metrics = &result.quality_metrics;
        eprintln!(
            "✅ Redacted {} of {} detected PII tokens (level: {}, coverage: {:.0}%)",
            metrics.pii_redacted,
            metrics.total_pii_detected,
            level,
            metrics.redaction_coverage * 100.0
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    #[tokio::test]
    async fn test_redact_with_entity_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cv.txt");
        std::fs::write(&input, "Layla Haddad - layla@example.com").unwrap();

        let mut entities = NamedTempFile::new().unwrap();
        write!(
            entities,
            r#"{{"pii_entities": [{{"original_value": "Layla Haddad", "pii_type": "name", "sensitivity_level": 4, "all_variations": [], "context": "header"}}]}}"#
        )
        .unwrap();

        let output = dir.path().join("out.txt");
        let args = RedactArgs {
            input,
            level: Some(RedactionLevel::Standard),
            entities: Some(entities.path().to_path_buf()),
            output: Some(output.clone()),
            format: "text".to_string(),
        };

        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
        assert_eq!(
            std::fs::read_to_string(output).unwrap(),
            "[PII_NAME_001] - [PII_EMAIL_002]"
        );
    }

    #[tokio::test]
    async fn test_redact_without_oracle_is_configuration_error() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cv.txt");
        std::fs::write(&input, "layla@example.com").unwrap();

        let args = RedactArgs {
            input,
            level: None,
            entities: None,
            output: None,
            format: "text".to_string(),
        };

        let code = args
            .execute(dir.path().join("missing.toml").to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
