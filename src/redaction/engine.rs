//! Redaction engine
//!
//! Orchestrates the structured pass, the phone pass, the semantic pass, the
//! merge, the threshold filter and placeholder substitution.
//!
//! # Example
//!
//! ```no_run
//! use cvscrub::adapters::llm::StaticOracle;
//! use cvscrub::redaction::{RedactionConfig, RedactionEngine, RedactionLevel};
//!
//! # async fn example() -> cvscrub::domain::Result<()> {
//! let engine = RedactionEngine::new(RedactionConfig::default())?;
//! let oracle = StaticOracle::empty();
//!
//! let result = engine
//!     .redact("Contact: jane@example.com", Some(&oracle), RedactionLevel::Standard)
//!     .await?;
//! assert_eq!(result.redacted_text, "Contact: [PII_EMAIL_001]");
//! # Ok(())
//! # }
//! ```

use crate::adapters::llm::Oracle;
use crate::domain::{Result, ScrubError};
use crate::log_redaction_summary;
use crate::redaction::anonymizer::{build_anonymizer, Anonymizer, SequentialPlaceholders};
use crate::redaction::audit::AuditLogger;
use crate::redaction::config::RedactionConfig;
use crate::redaction::detector::{
    PatternRegistry, PhoneNumberFinder, PhoneStrategy, SemanticSpanFinder, StructuredSpanFinder,
};
use crate::redaction::merge::merge;
use crate::redaction::models::{PiiEntity, PiiToken, RedactionLevel, Span};
use crate::redaction::report::{MappingEntry, QualityMetrics, RedactionResult, ScanReport};
use crate::redaction::span::apply_replacements;
use std::collections::BTreeMap;
use std::time::Instant;

/// Output of the structured pass
#[derive(Debug, Clone, Default)]
pub struct StructuredDetections {
    /// Pattern and phone tokens, sorted by start
    pub tokens: Vec<PiiToken>,
    /// How many of `tokens` came from the phone finder
    pub phone_count: usize,
}

/// Main redaction engine
///
/// Holds only immutable finders, so one engine can serve concurrent calls;
/// every call owns its own placeholder counter.
pub struct RedactionEngine {
    config: RedactionConfig,
    structured: StructuredSpanFinder,
    phone: PhoneNumberFinder,
    semantic: SemanticSpanFinder,
    anonymizer: Box<dyn Anonymizer>,
    audit_logger: Option<AuditLogger>,
}

impl RedactionEngine {
    /// Create an engine from configuration
    ///
    /// The phone strategy is resolved here, once. Fails on an invalid
    /// configuration, an unreadable pattern library or an unusable audit log.
    pub fn new(config: RedactionConfig) -> Result<Self> {
        config
            .validate()
            .map_err(|e| ScrubError::Configuration(format!("Invalid redaction configuration: {e:#}")))?;

        let structured = match config.pattern_library {
            Some(ref path) => StructuredSpanFinder::with_registry(PatternRegistry::from_file(path)?),
            None => StructuredSpanFinder::new()?,
        };

        let strategy = PhoneStrategy::resolve(&config.phone_strategy)?;
        let phone = PhoneNumberFinder::new(strategy)?;
        let audit_logger = AuditLogger::from_config(&config.audit)?;
        let anonymizer = build_anonymizer(&config);

        tracing::debug!(
            patterns = structured.registry().len(),
            phone_strategy = %strategy,
            anonymizer = anonymizer.name(),
            audit = audit_logger.is_some(),
            "Redaction engine ready"
        );

        Ok(Self {
            config,
            structured,
            phone,
            semantic: SemanticSpanFinder::new(),
            anonymizer,
            audit_logger,
        })
    }

    pub fn config(&self) -> &RedactionConfig {
        &self.config
    }

    pub fn phone_strategy(&self) -> PhoneStrategy {
        self.phone.strategy()
    }

    /// Pattern catalog followed by the phone finder
    pub fn detect_structured(&self, text: &str) -> StructuredDetections {
        let mut tokens = self.structured.find(text);
        let seen: Vec<Span> = tokens.iter().map(|t| t.span).collect();

        let phones = self.phone.find(text, &seen);
        let phone_count = phones.len();
        tokens.extend(phones);
        tokens.sort_by_key(|t| t.span.start);

        StructuredDetections {
            tokens,
            phone_count,
        }
    }

    /// Detect, merge, filter and substitute
    ///
    /// A missing oracle is a configuration error. Oracle failures are not:
    /// the semantic pass degrades to nothing and structured results stand.
    pub async fn redact(
        &self,
        text: &str,
        oracle: Option<&dyn Oracle>,
        level: RedactionLevel,
    ) -> Result<RedactionResult> {
        let oracle = oracle.ok_or(ScrubError::OracleNotConfigured)?;
        let start = Instant::now();

        let structured = self.detect_structured(text);
        let semantic = self.semantic.find(text, oracle).await;
        let result = self.redact_tokens(text, structured, semantic, level);

        let elapsed = start.elapsed();
        log_redaction_summary!(
            level,
            result.quality_metrics.total_pii_detected,
            result.quality_metrics.pii_redacted,
            elapsed
        );

        if let Some(ref logger) = self.audit_logger {
            logger.log_redaction(&result, elapsed.as_millis() as u64)?;
        }

        Ok(result)
    }

    /// Merge already-found tokens and apply the threshold for `level`
    ///
    /// Placeholders are `[PII_{CATEGORY}_{NNN}]`, numbered from 1 in text
    /// order with a single counter for all categories.
    pub fn redact_tokens(
        &self,
        text: &str,
        structured: StructuredDetections,
        semantic: Vec<PiiToken>,
        level: RedactionLevel,
    ) -> RedactionResult {
        let structured_count = structured.tokens.len();
        let semantic_count = semantic.len();
        let merged = merge(structured.tokens, semantic);

        let threshold = level.threshold();
        let to_redact: Vec<PiiToken> = merged
            .iter()
            .filter(|t| t.sensitivity >= threshold)
            .cloned()
            .collect();

        let mut placeholders = SequentialPlaceholders::new();
        let mut mapping = BTreeMap::new();
        let mut replacements = Vec::with_capacity(to_redact.len());
        for token in &to_redact {
            let placeholder = placeholders.next(&token.category);
            mapping.insert(placeholder.clone(), MappingEntry::from(token));
            replacements.push((token.span, placeholder));
        }

        let redacted_text = apply_replacements(text, &replacements);
        let quality_metrics = QualityMetrics::compute(
            structured_count,
            structured.phone_count,
            semantic_count,
            &merged,
            &to_redact,
        );

        RedactionResult {
            redacted_text,
            mapping,
            tokens: merged,
            quality_metrics,
            level,
        }
    }

    /// Anonymize with the configured entity-list strategy
    pub fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> String {
        self.anonymizer.anonymize(text, entities)
    }

    pub fn anonymizer(&self) -> &dyn Anonymizer {
        self.anonymizer.as_ref()
    }

    /// Structured-only dry run of one document into `report`
    pub fn scan(&self, document: &str, text: &str, report: &mut ScanReport) {
        let start = Instant::now();
        let detections = self.detect_structured(text);
        report.add_document(document, &detections.tokens, start.elapsed().as_millis() as u64);
    }
}
