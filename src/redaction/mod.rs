//! PII detection, span resolution and anonymization
//!
//! # Architecture
//!
//! - **Detection**: pattern catalog, phone number finder and the oracle-backed
//!   semantic finder, each producing non-overlapping [`PiiToken`]s
//! - **Merge**: one overlap-free token set with a confidence/provenance
//!   tie-break
//! - **Redaction**: sensitivity threshold, `[PII_*]` placeholders and
//!   end-to-start substitution
//! - **Anonymizers**: entity-list strategies used by the candidate pipeline
//! - **Audit**: hashed, append-only record of redaction calls
//!
//! # Usage
//!
//! ```rust,ignore
//! use cvscrub::redaction::{RedactionConfig, RedactionEngine, RedactionLevel};
//!
//! let engine = RedactionEngine::new(RedactionConfig::default())?;
//! let result = engine.redact(text, Some(&oracle), RedactionLevel::Strict).await?;
//! ```

pub mod anonymizer;
pub mod audit;
pub mod config;
pub mod detector;
pub mod engine;
pub mod merge;
pub mod models;
pub mod report;
pub mod span;

pub use anonymizer::{Anonymizer, SpanBasedAnonymizer, VariationSweepAnonymizer};
pub use config::{AnonymizerStrategy, AuditConfig, RedactionConfig};
pub use engine::{RedactionEngine, StructuredDetections};
pub use merge::merge;
pub use models::{DetectionMethod, PiiCategory, PiiEntity, PiiToken, RedactionLevel, Span};
pub use report::{MappingEntry, QualityMetrics, RedactionResult, ScanReport};
