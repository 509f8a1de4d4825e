//! Placeholder numbering schemes
//!
//! Counters live inside a scheme value created for one call, so numbering
//! always restarts at 1 and concurrent calls never share a sequence.

use crate::redaction::models::{PiiCategory, PiiEntity};
use std::collections::HashMap;

/// Fixed placeholder shared by every candidate-name occurrence
pub const CANDIDATE_NAME: &str = "[CANDIDATE_NAME]";

/// `[PII_{LABEL}_{NNN}]` with one counter across all categories
#[derive(Debug, Default)]
pub struct SequentialPlaceholders {
    issued: usize,
}

impl SequentialPlaceholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next placeholder for a token of `category`
    pub fn next(&mut self, category: &PiiCategory) -> String {
        self.issued += 1;
        format!("[PII_{}_{:03}]", category.label(), self.issued)
    }

    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Candidate-profile scheme: `[CANDIDATE_NAME]` for names, `[COMPANY_n]`,
/// `[UNIVERSITY_n]` and friends for everything else
///
/// Entities with the same category and value get the same placeholder.
#[derive(Debug, Default)]
pub struct ProfilePlaceholders {
    counters: HashMap<PiiCategory, usize>,
    assigned: HashMap<(PiiCategory, String), String>,
}

impl ProfilePlaceholders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Placeholder for `entity`, allocating a new number when first seen
    pub fn placeholder_for(&mut self, entity: &PiiEntity) -> String {
        if entity.pii_type == PiiCategory::Name {
            return CANDIDATE_NAME.to_string();
        }

        let key = (
            entity.pii_type.clone(),
            entity.original_value.trim().to_string(),
        );
        if let Some(existing) = self.assigned.get(&key) {
            return existing.clone();
        }

        let counter = self.counters.entry(entity.pii_type.clone()).or_insert(0);
        *counter += 1;
        let placeholder = format!("[{}_{}]", prefix(&entity.pii_type), counter);
        self.assigned.insert(key, placeholder.clone());
        placeholder
    }
}

fn prefix(category: &PiiCategory) -> String {
    match category {
        PiiCategory::Organization => "COMPANY".to_string(),
        PiiCategory::School => "UNIVERSITY".to_string(),
        PiiCategory::CertificationNumber => "CERT_NUMBER".to_string(),
        other => other.label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_sequential_counter_spans_categories() {
        let mut scheme = SequentialPlaceholders::new();
        assert_eq!(scheme.next(&PiiCategory::Email), "[PII_EMAIL_001]");
        assert_eq!(scheme.next(&PiiCategory::Phone), "[PII_PHONE_002]");
        assert_eq!(scheme.next(&PiiCategory::Email), "[PII_EMAIL_003]");
        assert_eq!(scheme.issued(), 3);
    }

    #[test]
    fn test_sequential_restarts_per_instance() {
        let mut first = SequentialPlaceholders::new();
        first.next(&PiiCategory::Email);
        let mut second = SequentialPlaceholders::new();
        assert_eq!(second.next(&PiiCategory::Email), "[PII_EMAIL_001]");
    }

    #[test_case(PiiCategory::Organization, "[COMPANY_1]")]
    #[test_case(PiiCategory::School, "[UNIVERSITY_1]")]
    #[test_case(PiiCategory::Address, "[ADDRESS_1]")]
    #[test_case(PiiCategory::JobTitle, "[JOB_TITLE_1]")]
    #[test_case(PiiCategory::CertificationNumber, "[CERT_NUMBER_1]")]
    #[test_case(PiiCategory::LicenseNumber, "[LICENSE_NUMBER_1]")]
    #[test_case(PiiCategory::NationalId, "[NATIONAL_ID_1]")]
    #[test_case(PiiCategory::Other("hobby".into()), "[HOBBY_1]")]
    #[test_case(PiiCategory::Name, "[CANDIDATE_NAME]")]
    fn test_profile_placeholder_names(category: PiiCategory, expected: &str) {
        let mut scheme = ProfilePlaceholders::new();
        let entity = PiiEntity::new("value", category);
        assert_eq!(scheme.placeholder_for(&entity), expected);
    }

    #[test]
    fn test_profile_numbers_distinct_entities_per_category() {
        let mut scheme = ProfilePlaceholders::new();
        let acme = PiiEntity::new("Acme LLC", PiiCategory::Organization);
        let globex = PiiEntity::new("Globex FZE", PiiCategory::Organization);
        let aus = PiiEntity::new("AUS", PiiCategory::School);

        assert_eq!(scheme.placeholder_for(&acme), "[COMPANY_1]");
        assert_eq!(scheme.placeholder_for(&globex), "[COMPANY_2]");
        assert_eq!(scheme.placeholder_for(&aus), "[UNIVERSITY_1]");
        assert_eq!(scheme.placeholder_for(&acme), "[COMPANY_1]");
    }
}
