//! Span-based anonymizer

use super::placeholder::ProfilePlaceholders;
use super::{processing_order, Anonymizer};
use crate::redaction::models::{PiiEntity, Span};
use crate::redaction::span::{apply_replacements, find_occurrences, overlaps_any};
use std::cmp::Reverse;

/// Locates every variation as word-bounded spans over the original text,
/// longest variation first, and substitutes the overlap-free set end-to-start
///
/// Replacements never see each other's placeholders, and a short variation
/// cannot split a region already claimed by a longer one.
#[derive(Debug, Clone, Default)]
pub struct SpanBasedAnonymizer;

impl SpanBasedAnonymizer {
    pub fn new() -> Self {
        Self
    }

    /// The replacement list this anonymizer would apply, sorted by start
    pub fn plan(&self, text: &str, entities: &[PiiEntity]) -> Vec<(Span, String)> {
        let mut placeholders = ProfilePlaceholders::new();
        let mut forms: Vec<(&str, String)> = Vec::new();
        for entity in processing_order(entities) {
            let placeholder = placeholders.placeholder_for(entity);
            for form in entity.surface_forms() {
                forms.push((form, placeholder.clone()));
            }
        }
        forms.sort_by_key(|(form, _)| Reverse(form.chars().count()));

        let mut taken: Vec<Span> = Vec::new();
        let mut replacements: Vec<(Span, String)> = Vec::new();
        for (form, placeholder) in forms {
            for span in find_occurrences(text, form, true) {
                if overlaps_any(&span, &taken) {
                    continue;
                }
                taken.push(span);
                replacements.push((span, placeholder.clone()));
            }
        }

        replacements.sort_by_key(|(span, _)| span.start);
        replacements
    }
}

impl Anonymizer for SpanBasedAnonymizer {
    fn anonymize(&self, text: &str, entities: &[PiiEntity]) -> String {
        let replacements = self.plan(text, entities);
        tracing::info!(
            entities = entities.len(),
            replacements = replacements.len(),
            "Created anonymized content"
        );
        apply_replacements(text, &replacements)
    }

    fn name(&self) -> &'static str {
        "span_based"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::models::PiiCategory;

    #[test]
    fn test_short_variation_does_not_split_longer_one() {
        let entities = vec![PiiEntity::new("John Smith", PiiCategory::Name)
            .with_variations(["John", "John Smith"])];
        let text = "John Smith and Johnson, then John.";

        let anonymized = SpanBasedAnonymizer::new().anonymize(text, &entities);
        assert_eq!(
            anonymized,
            "[CANDIDATE_NAME] and Johnson, then [CANDIDATE_NAME]."
        );
    }

    #[test]
    fn test_plan_is_sorted_and_disjoint() {
        let entities = vec![
            PiiEntity::new("Acme Trading LLC", PiiCategory::Organization)
                .with_variations(["Acme Trading LLC", "Acme"]),
            PiiEntity::new("Dubai", PiiCategory::Address),
        ];
        let text = "Acme Trading LLC, Dubai. Acme again.";
        let plan = SpanBasedAnonymizer::new().plan(text, &entities);

        assert_eq!(plan.len(), 3);
        assert!(plan.windows(2).all(|w| w[0].0.end <= w[1].0.start));
        assert_eq!(plan[0].1, "[COMPANY_1]");
        assert_eq!(plan[1].1, "[ADDRESS_1]");
        assert_eq!(plan[2].1, "[COMPANY_1]");
    }

    #[test]
    fn test_punctuated_values() {
        let entities = vec![
            PiiEntity::new("O'Connor", PiiCategory::Name),
            PiiEntity::new("AT&T", PiiCategory::Organization),
        ];
        let anonymized =
            SpanBasedAnonymizer::new().anonymize("Mary O'Connor worked at AT&T.", &entities);
        assert_eq!(anonymized, "Mary [CANDIDATE_NAME] worked at [COMPANY_1].");
    }
}
