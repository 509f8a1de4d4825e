//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod anonymize;
pub mod init;
pub mod redact;
pub mod scan;
pub mod validate;

use crate::adapters::llm::{ChatCompletionsOracle, Oracle, StaticOracle};
use crate::config::CvscrubConfig;
use anyhow::Context;
use std::path::Path;

/// Read a UTF-8 input document
pub(crate) fn read_document(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read input document: {}", path.display()))
}

/// Oracle for a command: a pre-computed entity file wins over the
/// configured service; `None` when neither is available
pub(crate) fn resolve_oracle(
    config: &CvscrubConfig,
    entities: Option<&Path>,
) -> anyhow::Result<Option<Box<dyn Oracle>>> {
    if let Some(path) = entities {
        let payload = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read entity file: {}", path.display()))?;
        tracing::info!(path = %path.display(), "Using pre-computed oracle entities");
        return Ok(Some(Box::new(StaticOracle::new(payload))));
    }

    match config.oracle {
        Some(ref oracle_config) => {
            let oracle = ChatCompletionsOracle::new(oracle_config.clone())
                .context("Failed to create oracle client")?;
            Ok(Some(Box::new(oracle)))
        }
        None => Ok(None),
    }
}

/// Write `content` to `output`, or stdout when no path is given
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output: {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
