// cvscrub - PII detection and anonymization for candidate résumés
// Copyright (c) 2025 cvscrub Contributors
// Licensed under the MIT License

//! # cvscrub - PII scrubbing for candidate résumés
//!
//! cvscrub finds personally identifiable information in résumé text and
//! replaces it with placeholders before the text reaches any analysis stage.
//!
//! ## Overview
//!
//! - **Structured detection**: an ordered pattern catalog tuned for Gulf and
//!   Middle-East identifiers plus a phone number finder
//! - **Semantic detection**: entities reported by a language-model oracle,
//!   re-located in the source text
//! - **Merging**: one overlap-free span set, confidence and provenance break
//!   ties
//! - **Redaction**: sensitivity threshold per level, `[PII_*]` placeholders,
//!   end-to-start substitution
//! - **Anonymization**: candidate-profile placeholders (`[CANDIDATE_NAME]`,
//!   `[COMPANY_1]`, ...) for the candidate pipeline
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Candidate pipeline stages
//! - [`redaction`] - Detection, merge, redaction and anonymization
//! - [`adapters`] - External integrations (oracle clients)
//! - [`domain`] - Error types
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cvscrub::adapters::llm::ChatCompletionsOracle;
//! use cvscrub::config::load_config;
//! use cvscrub::redaction::{RedactionEngine, RedactionLevel};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("cvscrub.toml")?;
//!     let engine = RedactionEngine::new(config.redaction.clone())?;
//!     let oracle = ChatCompletionsOracle::new(config.oracle.clone().unwrap_or_default())?;
//!
//!     let text = std::fs::read_to_string("cv.txt")?;
//!     let result = engine
//!         .redact(&text, Some(&oracle), RedactionLevel::Standard)
//!         .await?;
//!
//!     println!("{}", result.redacted_text);
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::ScrubError`]. Oracle failures during
//! detection are not errors: the semantic pass degrades to an empty result
//! and the structured findings still stand. The only hard failure of
//! redaction is a missing oracle ([`domain::ScrubError::OracleNotConfigured`]).
//!
//! ## Logging
//!
//! cvscrub uses structured logging with the `tracing` crate. Only counts,
//! categories and hashes are logged, never PII values.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
pub mod redaction;
