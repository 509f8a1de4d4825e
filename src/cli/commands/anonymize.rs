//! Anonymize command implementation
//!
//! Candidate-pipeline anonymization: entities come from an entity file or
//! from the oracle's PII identification stage, never from the pattern pass.

use super::{read_document, resolve_oracle, write_output};
use crate::config::load_config_or_default;
use crate::core::pipeline::CandidatePipeline;
use crate::redaction::anonymizer::build_anonymizer;
use crate::redaction::detector::parse_entities;
use crate::redaction::AnonymizerStrategy;
use anyhow::Context;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Document to anonymize (plain text or markdown)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Entity list (oracle response JSON); the configured oracle is asked
    /// when omitted
    #[arg(long, value_name = "FILE")]
    pub entities: Option<PathBuf>,

    /// Anonymizer strategy (variation-sweep or span-based)
    #[arg(long)]
    pub strategy: Option<AnonymizerStrategy>,

    /// Only replace variations at word boundaries
    #[arg(long)]
    pub word_boundaries: bool,

    /// Write output here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(input = %self.input.display(), "Starting anonymize command");

        let mut config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        if let Some(strategy) = self.strategy {
            tracing::info!(strategy = ?strategy, "Overriding anonymizer from CLI");
            config.redaction.anonymizer = strategy;
        }
        if self.word_boundaries {
            config.redaction.word_boundaries = true;
        }

        let text = read_document(&self.input)?;

        let anonymized = match self.entities {
            Some(ref path) => {
                let payload = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read entity file: {}", path.display()))?;
                let entities = parse_entities(&payload).context("Invalid entity file")?;
                build_anonymizer(&config.redaction).anonymize(&text, &entities)
            }
            None => {
                let Some(oracle) = resolve_oracle(&config, None)? else {
                    eprintln!("❌ Anonymization requires an entity list");
                    eprintln!("   Configure an [oracle] section or pass --entities <FILE>");
                    return Ok(2);
                };

                let stage = CandidatePipeline::from_config(&config.redaction)
                    .identify_pii(&text, oracle.as_ref())
                    .await;
                match stage.anonymized_content {
                    Some(content) => content,
                    None => {
                        eprintln!(
                            "❌ PII identification failed: {}",
                            stage.stage_log.error.as_deref().unwrap_or("unknown error")
                        );
                        return Ok(5);
                    }
                }
            }
        };

        write_output(self.output.as_deref(), &anonymized)?;
        eprintln!("✅ Anonymized {}", self.input.display());
        Ok(0)
    }
}
