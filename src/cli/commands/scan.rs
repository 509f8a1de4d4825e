//! Scan command implementation
//!
//! Detect-only dry run of the structured pass. Nothing is rewritten and no
//! oracle is contacted.

use crate::config::load_config_or_default;
use crate::redaction::{RedactionEngine, ScanReport};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Documents to scan
    #[arg(short, long, required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// Report format (console or json)
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Also write the JSON report to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

impl ScanArgs {
    /// Execute the scan command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(documents = self.input.len(), "Starting scan command");

        if self.format != "console" && self.format != "json" {
            eprintln!("❌ Invalid format '{}'. Must be one of: console, json", self.format);
            return Ok(2);
        }

        let config = match load_config_or_default(config_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let engine = match RedactionEngine::new(config.redaction) {
            Ok(engine) => engine,
            Err(e) => {
                eprintln!("❌ {e}");
                return Ok(2);
            }
        };

        let report = self.scan_all(&engine);

        if self.format == "json" {
            println!("{}", report.format_json()?);
        } else {
            print!("{}", report.format_console());
        }

        if let Some(ref path) = self.report {
            report.write_to_file(path)?;
            eprintln!("📄 Report written to {}", path.display());
        }

        Ok(0)
    }

    fn scan_all(&self, engine: &RedactionEngine) -> ScanReport {
        let mut report = ScanReport::new();
        for path in &self.input {
            let name = path.display().to_string();
            match std::fs::read_to_string(path) {
                Ok(text) => engine.scan(&name, &text, &mut report),
                Err(e) => {
                    tracing::warn!(document = %name, error = %e, "Skipping unreadable document");
                    report.add_warning(format!("{name}: {e}"));
                }
            }
        }
        report
    }
}
