//! Candidate pipeline stages.
//!
//! - [`pipeline`] - PII identification: oracle entity extraction followed by
//!   profile-placeholder anonymization, recorded as a stage log
//!
//! # Example
//!
//! ```rust,no_run
//! use cvscrub::adapters::llm::StaticOracle;
//! use cvscrub::core::pipeline::CandidatePipeline;
//! use cvscrub::redaction::RedactionConfig;
//!
//! # async fn example() {
//! let pipeline = CandidatePipeline::from_config(&RedactionConfig::default());
//! let oracle = StaticOracle::empty();
//!
//! let stage = pipeline.identify_pii("Layla Haddad, Dubai", &oracle).await;
//! if let Some(content) = stage.anonymized_content {
//!     println!("{content}");
//! }
//! # }
//! ```

pub mod pipeline;
