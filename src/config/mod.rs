//! Configuration management for cvscrub.
//!
//! TOML configuration with `${VAR_NAME}` substitution, `CVSCRUB_*`
//! environment overrides and validation on load.
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [redaction]
//! level = "standard"
//! phone_strategy = "auto"
//! anonymizer = "variation_sweep"
//!
//! [redaction.audit]
//! enabled = true
//! log_path = "./audit/redaction.log"
//!
//! [oracle]
//! provider = "openai"
//! base_url = "https://api.openai.com/v1"
//! api_key = "${CVSCRUB_ORACLE_API_KEY}"
//! model = "gpt-4o-mini"
//! ```
//!
//! # Loading
//!
//! ```rust,no_run
//! use cvscrub::config::load_config;
//!
//! # fn example() {
//! match load_config("cvscrub.toml") {
//!     Ok(config) => println!("Redaction level: {}", config.redaction.level),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! # }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::{load_config, load_config_or_default};
pub use schema::{
    ApplicationConfig, CvscrubConfig, LoggingConfig, OracleConfig, OracleProvider, RetryConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
