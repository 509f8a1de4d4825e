//! Structured span finder: runs the pattern catalog over free text

use super::patterns::PatternRegistry;
use crate::domain::Result;
use crate::redaction::models::{DetectionMethod, PiiToken, Span};
use crate::redaction::span::overlaps_any;
use std::sync::Arc;

/// Pattern-catalog based PII finder
///
/// Within one pass the first pattern to claim a region of text wins; later
/// overlapping matches are discarded without comparing quality.
#[derive(Debug, Clone)]
pub struct StructuredSpanFinder {
    pattern_registry: Arc<PatternRegistry>,
}

impl StructuredSpanFinder {
    /// Create a finder over the built-in catalog
    pub fn new() -> Result<Self> {
        let registry = PatternRegistry::default_patterns()?;
        Ok(Self::with_registry(registry))
    }

    /// Create a finder over a custom registry
    pub fn with_registry(registry: PatternRegistry) -> Self {
        Self {
            pattern_registry: Arc::new(registry),
        }
    }

    pub fn registry(&self) -> &PatternRegistry {
        &self.pattern_registry
    }

    /// Find non-overlapping structured PII tokens, sorted by start offset
    pub fn find(&self, text: &str) -> Vec<PiiToken> {
        let mut tokens: Vec<PiiToken> = Vec::new();
        let mut seen_spans: Vec<Span> = Vec::new();

        for pattern in self.pattern_registry.all_patterns() {
            for matched in pattern.regex.find_iter(text) {
                let span = Span::new(matched.start(), matched.end());
                if span.is_empty() || overlaps_any(&span, &seen_spans) {
                    continue;
                }

                seen_spans.push(span);
                tokens.push(PiiToken::new(
                    matched.as_str(),
                    pattern.category.clone(),
                    span,
                    pattern.confidence,
                    DetectionMethod::Pattern,
                ));
            }
        }

        tokens.sort_by_key(|t| t.span.start);
        tracing::debug!(count = tokens.len(), "Structured pass complete");
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redaction::models::PiiCategory;

    fn finder() -> StructuredSpanFinder {
        StructuredSpanFinder::new().expect("Failed to load default patterns")
    }

    #[test]
    fn test_detects_email() {
        let text = "Contact: jane@example.com for details";
        let tokens = finder().find(text);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, PiiCategory::Email);
        assert_eq!(tokens[0].original_value, "jane@example.com");
        assert_eq!(tokens[0].sensitivity, 3);
        assert_eq!(tokens[0].confidence, 0.95);
        assert!(tokens[0].is_faithful_to(text));
    }

    #[test]
    fn test_email_domain_not_reported_as_url() {
        let tokens = finder().find("Mail john.doe@example.com now");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, PiiCategory::Email);
    }

    #[test]
    fn test_detects_emirates_id_before_generic_patterns() {
        let text = "Emirates ID: 784-1985-1234567-8.";
        let tokens = finder().find(text);

        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, PiiCategory::UaeEmiratesId);
        assert_eq!(tokens[0].sensitivity, 4);
        assert_eq!(tokens[0].original_value, "784-1985-1234567-8");
    }

    #[test]
    fn test_first_pattern_wins_on_ten_digit_ids() {
        // Saudi and Jordan national ids share a shape; Saudi is listed first
        let tokens = finder().find("National ID 1023456789");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].category, PiiCategory::SaudiNationalId);
    }

    #[test]
    fn test_detects_po_box_and_iban() {
        let text = "P.O. Box 12345, Dubai. IBAN SA0380000000608010167519";
        let tokens = finder().find(text);
        let categories: Vec<&PiiCategory> = tokens.iter().map(|t| &t.category).collect();

        assert!(categories.contains(&&PiiCategory::PoBox));
        assert!(categories.contains(&&PiiCategory::IbanGcc));
        assert!(tokens.iter().all(|t| t.is_faithful_to(text)));
    }

    #[test]
    fn test_output_sorted_and_non_overlapping() {
        let text = "Born 12/05/1990, passport A1234567, email a.b@c.org, visa 201/2019/1234567";
        let tokens = finder().find(text);

        assert!(tokens.len() >= 4);
        for pair in tokens.windows(2) {
            assert!(pair[0].span.start <= pair[1].span.start);
            assert!(!pair[0].overlaps(&pair[1]));
        }
    }

    #[test]
    fn test_no_pii() {
        assert!(finder().find("Experienced engineer with strong skills").is_empty());
        assert!(finder().find("").is_empty());
    }
}
