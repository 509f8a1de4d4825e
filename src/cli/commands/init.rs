//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "cvscrub.toml")]
    pub output: String,

    /// Include every option with comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing cvscrub configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with CVSCRUB_ORACLE_API_KEY");
                println!("  3. Validate configuration: cvscrub validate-config");
                println!("  4. Try a dry run: cvscrub scan --input cv.txt");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# cvscrub Configuration File
# PII detection and anonymization for candidate résumés

[application]
log_level = "info"

[redaction]
level = "standard"          # minimal | standard | strict | complete
phone_strategy = "auto"     # auto | validated | regex
anonymizer = "variation_sweep"
word_boundaries = false

[redaction.audit]
enabled = false
log_path = "./audit/redaction.log"
json_format = true

[oracle]
provider = "openai"
base_url = "https://api.openai.com/v1"
api_key = "${CVSCRUB_ORACLE_API_KEY}"
model = "gpt-4o-mini"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# cvscrub Configuration File
# PII detection and anonymization for candidate résumés
#
# This file contains all configuration options with examples and explanations.
# Values of the form ${VAR_NAME} are replaced from the environment before
# parsing. CVSCRUB_* environment variables override the file afterwards.

# ============================================================================
# Application Settings
# ============================================================================
[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Redaction Settings
# ============================================================================
[redaction]
# Default redaction level; tokens with sensitivity >= threshold are replaced
#   minimal  -> 4 (national IDs, passports, cards, IBANs)
#   standard -> 3 (adds names, emails, phones, addresses, dates)
#   strict   -> 2 (adds organizations, schools, URLs, postal codes)
#   complete -> 1 (everything, including job titles)
level = "standard"

# Phone number detection
#   auto      - library validation when compiled in, regex battery otherwise
#   validated - always use library validation (requires the phone-validation feature)
#   regex     - always use the regex battery
phone_strategy = "auto"

# Optional custom pattern library (TOML, same format as patterns/pii_patterns.toml)
# pattern_library = "./patterns/custom.toml"

# Entity-list anonymizer used by `cvscrub anonymize`
#   variation_sweep - replace every occurrence of every variation
#   span_based      - word-bounded spans, longest variation first
anonymizer = "variation_sweep"

# Only sweep variations at word boundaries ("John" no longer hits "Johnson")
word_boundaries = false

[redaction.audit]
# Append one entry per redaction call; original values are stored as SHA-256
enabled = false
log_path = "./audit/redaction.log"
json_format = true

# ============================================================================
# Semantic Oracle
# ============================================================================
[oracle]
# openai | azure
provider = "openai"

# OpenAI: https://api.openai.com/v1
# Azure:  https://<resource>.openai.azure.com
base_url = "https://api.openai.com/v1"

# API key (use environment variable)
api_key = "${CVSCRUB_ORACLE_API_KEY}"

# Model name, or deployment name for Azure
model = "gpt-4o-mini"

# Required for Azure
# api_version = "2024-08-01-preview"

temperature = 0.0
max_tokens = 3000
timeout_seconds = 60

[oracle.retry]
max_retries = 3
initial_delay_ms = 1000
max_delay_ms = 30000
backoff_multiplier = 2.0

# ============================================================================
# Logging Configuration
# ============================================================================
[logging]
# Enable JSON file logging in addition to console output
local_enabled = false

# Log directory
local_path = "./logs"

# Log rotation (daily, hourly, never)
local_rotation = "daily"
"#
        .to_string()
    }
}
