//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for cvscrub using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// cvscrub - PII detection and anonymization for candidate résumés
#[derive(Parser, Debug)]
#[command(name = "cvscrub")]
#[command(version, about, long_about = None)]
#[command(author = "cvscrub Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "cvscrub.toml", env = "CVSCRUB_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "CVSCRUB_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Detect, merge and redact PII in a document
    Redact(commands::redact::RedactArgs),

    /// Replace oracle-identified entities with profile placeholders
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Detect-only dry run of the structured pass over documents
    Scan(commands::scan::ScanArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::{AnonymizerStrategy, RedactionLevel};

    #[test]
    fn test_cli_parse_redact() {
        let cli = Cli::parse_from(["cvscrub", "redact", "--input", "cv.txt", "--level", "strict"]);
        assert_eq!(cli.config, "cvscrub.toml");
        match cli.command {
            Commands::Redact(args) => {
                assert_eq!(args.level, Some(RedactionLevel::Strict));
                assert_eq!(args.format, "text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["cvscrub", "--config", "custom.toml", "validate-config"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["cvscrub", "--log-level", "debug", "init"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_anonymize_strategy() {
        let cli = Cli::parse_from([
            "cvscrub",
            "anonymize",
            "--input",
            "cv.md",
            "--strategy",
            "span-based",
            "--word-boundaries",
        ]);
        match cli.command {
            Commands::Anonymize(args) => {
                assert_eq!(args.strategy, Some(AnonymizerStrategy::SpanBased));
                assert!(args.word_boundaries);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_scan_many_inputs() {
        let cli = Cli::parse_from(["cvscrub", "scan", "--input", "a.txt", "b.txt"]);
        match cli.command {
            Commands::Scan(args) => assert_eq!(args.input.len(), 2),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_rejects_unknown_level() {
        let result = Cli::try_parse_from(["cvscrub", "redact", "--input", "cv.txt", "--level", "max"]);
        assert!(result.is_err());
    }
}
