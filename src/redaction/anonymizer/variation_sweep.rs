//! Variation sweep anonymizer

use super::placeholder::ProfilePlaceholders;
use super::{processing_order, Anonymizer};
use crate::redaction::models::PiiEntity;
use crate::redaction::span::{apply_replacements, find_occurrences};

/// Replaces every occurrence of every variation, entity by entity
///
/// In literal mode a short variation also matches inside longer words
/// (`"John"` inside `"Johnson"`). Enable `word_boundaries` to require
/// non-alphanumeric neighbours.
#[derive(Debug, Clone, Default)]
pub struct VariationSweepAnonymizer {
    word_boundaries: bool,
}

impl VariationSweepAnonymizer {
    pub fn new(word_boundaries: bool) -> Self {
        Self { word_boundaries }
    }

    /// Literal sweep, the historical behaviour
    pub fn literal() -> Self {
        Self::new(false)
    }

    /// Sweep guarded by word boundaries
    pub fn word_bounded() -> Self {
        Self::new(true)
    }

    fn replace_form(&self, text: String, form: &str, placeholder: &str) -> (String, usize) {
        if self.word_boundaries {
            let spans = find_occurrences(&text, form, true);
            if spans.is_empty() {
                return (text, 0);
            }
            let replacements: Vec<_> = spans
                .iter()
                .map(|span| (*span, placeholder.to_string()))
                .collect();
            (apply_replacements(&text, &replacements), spans.len())
        } else {
            let count = text.matches(form).count();
            if count == 0 {
                return (text, 0);
            }
            (text.replace(form, placeholder), count)
        }
    }
}

impl Anonymizer for VariationSweepAnonymizer {
    fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> String {
        let mut placeholders = ProfilePlaceholders::new();
        let mut anonymized = text.to_string();
        let mut replaced = 0usize;

        for entity in processing_order(entities) {
            let placeholder = placeholders.placeholder_for(entity);
            for form in entity.surface_forms() {
                let (next, count) = self.replace_form(anonymized, form, &placeholder);
                anonymized = next;
                replaced += count;
            }
        }

        tracing::info!(
            entities = entities.len(),
            replacements = replaced,
            word_boundaries = self.word_boundaries,
            "Created anonymized content"
        );
        anonymized
    }

    fn name(&self) -> &'static str {
        "variation_sweep"
    }
}
