//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the cvscrub configuration file.

use crate::config::load_config;
use crate::redaction::detector::PhoneStrategy;
use crate::redaction::RedactionEngine;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading applies env overrides and validates
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration file loaded successfully");
                c
            }
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        // Building the engine compiles the pattern library and resolves the
        // phone strategy
        let engine = match RedactionEngine::new(config.redaction.clone()) {
            Ok(engine) => engine,
            Err(e) => {
                println!("❌ Redaction settings are not usable");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!("✅ Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Redaction Level: {}", config.redaction.level);
        println!(
            "  Phone Strategy: {} (configured: {}, library available: {})",
            engine.phone_strategy(),
            config.redaction.phone_strategy,
            PhoneStrategy::Validated.is_available()
        );
        println!("  Anonymizer: {}", engine.anonymizer().name());
        println!("  Word Boundaries: {}", config.redaction.word_boundaries);
        match config.redaction.pattern_library {
            Some(ref path) => println!("  Pattern Library: {}", path.display()),
            None => println!("  Pattern Library: built-in"),
        }
        if config.redaction.audit.enabled {
            println!("  Audit Log: {}", config.redaction.audit.log_path.display());
        } else {
            println!("  Audit Log: disabled");
        }

        match config.oracle {
            Some(ref oracle) => {
                println!("  Oracle Provider: {:?}", oracle.provider);
                println!("  Oracle Endpoint: {}", oracle.base_url);
                println!("  Oracle Model: {}", oracle.model);
                println!("  Oracle Key: {}", if oracle.api_key.is_some() { "set" } else { "not set" });
            }
            None => println!("  Oracle: not configured (redact requires --entities)"),
        }
        println!();
        Ok(0)
    }
}
