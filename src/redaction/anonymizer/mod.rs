//! Entity-list anonymizers
//!
//! Both strategies take the oracle's entity list (no structured pass), order
//! entities longest value first and assign candidate-profile placeholders.
//! They differ in how surface forms are matched in the text.

pub mod placeholder;
pub mod span_based;
pub mod variation_sweep;

use crate::redaction::config::{AnonymizerStrategy, RedactionConfig};
use crate::redaction::models::PiiEntity;
use std::cmp::Reverse;

pub use placeholder::{ProfilePlaceholders, SequentialPlaceholders, CANDIDATE_NAME};
pub use span_based::SpanBasedAnonymizer;
pub use variation_sweep::VariationSweepAnonymizer;

/// Replace entity surface forms in `text` with placeholders
pub trait Anonymizer: Send + Sync {
    /// Anonymize `text` using the given entities
    fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> String;

    /// Strategy name used in logs and stage records
    fn name(&self) -> &'static str;
}

/// Build the anonymizer selected in the configuration
pub fn build_anonymizer(config: &RedactionConfig) -> Box<dyn Anonymizer> {
    match config.anonymizer {
        AnonymizerStrategy::VariationSweep => {
            Box::new(VariationSweepAnonymizer::new(config.word_boundaries))
        }
        AnonymizerStrategy::SpanBased => Box::new(SpanBasedAnonymizer::new()),
    }
}

/// Entities longest `original_value` first; ties keep input order
pub(crate) fn processing_order(entities: &[PiiEntity]) -> Vec<&PiiEntity> {
    let mut ordered: Vec<&PiiEntity> = entities.iter().collect();
    ordered.sort_by_key(|e| Reverse(e.original_value.chars().count()));
    ordered
}
