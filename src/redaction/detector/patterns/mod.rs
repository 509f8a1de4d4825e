//! Pattern catalog for structured PII detection
//!
//! The catalog is an ordered list of `(category, regex)` pairs. Order is
//! significant: during the structured pass the first pattern to claim a region
//! of text keeps it.

use crate::domain::{Result, ScrubError};
use crate::redaction::models::PiiCategory;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Pattern definition from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct PatternDefinition {
    /// PII category tag
    pub category: String,
    /// Confidence score (0.0 - 1.0)
    #[serde(default = "default_confidence")]
    pub confidence: f32,
    /// Regex patterns for this category, tried in order
    pub patterns: Vec<String>,
}

/// Compiled pattern with metadata
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    pub regex: Regex,
    pub category: PiiCategory,
    pub confidence: f32,
}

/// Pattern library container
#[derive(Debug, Deserialize)]
struct PatternLibrary {
    #[serde(default)]
    patterns: Vec<PatternDefinition>,
}

/// Ordered pattern registry
#[derive(Debug, Clone)]
pub struct PatternRegistry {
    patterns: Vec<CompiledPattern>,
}

impl PatternRegistry {
    /// Load a pattern library from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScrubError::Pattern(format!(
                "Failed to read pattern library {}: {e}",
                path.display()
            ))
        })?;

        Self::from_toml(&content)
    }

    /// Build a registry from TOML content, keeping declaration order
    pub fn from_toml(content: &str) -> Result<Self> {
        let library: PatternLibrary = toml::from_str(content)
            .map_err(|e| ScrubError::Pattern(format!("Failed to parse pattern library: {e}")))?;

        if library.patterns.is_empty() {
            return Err(ScrubError::Pattern(
                "Pattern library defines no patterns".to_string(),
            ));
        }

        let mut patterns = Vec::new();
        for def in library.patterns {
            if !(0.0..=1.0).contains(&def.confidence) {
                return Err(ScrubError::Pattern(format!(
                    "Confidence for '{}' must be between 0.0 and 1.0, got {}",
                    def.category, def.confidence
                )));
            }

            let category = PiiCategory::from(def.category.as_str());
            for pattern_str in &def.patterns {
                let regex = Regex::new(pattern_str).map_err(|e| {
                    ScrubError::Pattern(format!(
                        "Invalid regex for '{}': {pattern_str}: {e}",
                        def.category
                    ))
                })?;

                patterns.push(CompiledPattern {
                    regex,
                    category: category.clone(),
                    confidence: def.confidence,
                });
            }
        }

        Ok(Self { patterns })
    }

    /// Create the registry with the built-in catalog
    pub fn default_patterns() -> Result<Self> {
        let default_toml = include_str!("../../../../patterns/pii_patterns.toml");
        Self::from_toml(default_toml)
    }

    /// All patterns in evaluation order
    pub fn all_patterns(&self) -> &[CompiledPattern] {
        &self.patterns
    }

    /// Patterns for a specific category, in evaluation order
    pub fn patterns_for_category(&self, category: &PiiCategory) -> Vec<&CompiledPattern> {
        self.patterns
            .iter()
            .filter(|p| &p.category == category)
            .collect()
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&PiiCategory> {
        let mut seen = HashSet::new();
        self.patterns
            .iter()
            .map(|p| &p.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

fn default_confidence() -> f32 {
    0.95
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_default_patterns() {
        let registry = PatternRegistry::default_patterns().unwrap();
        assert!(!registry.is_empty());
    }

    #[test]
    fn test_default_catalog_order() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let categories: Vec<String> = registry
            .categories()
            .into_iter()
            .map(|c| c.to_string())
            .collect();

        assert_eq!(categories.first().map(String::as_str), Some("email"));
        assert_eq!(categories.get(1).map(String::as_str), Some("url"));
        assert_eq!(categories.last().map(String::as_str), Some("iban_gcc"));
        assert_eq!(categories.len(), 20);
    }

    #[test]
    fn test_email_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let email_patterns = registry.patterns_for_category(&PiiCategory::Email);
        assert!(!email_patterns.is_empty());

        let pattern = email_patterns[0];
        assert!(pattern.regex.is_match("test@example.com"));
        assert!(!pattern.regex.is_match("not-an-email"));
    }

    #[test]
    fn test_emirates_id_pattern() {
        let registry = PatternRegistry::default_patterns().unwrap();
        let patterns = registry.patterns_for_category(&PiiCategory::UaeEmiratesId);
        assert!(patterns[0].regex.is_match("ID 784-1985-1234567-8 issued"));
        assert!(!patterns[0].regex.is_match("784-85-1234567-8"));
    }

    #[test]
    fn test_from_toml_keeps_declaration_order() {
        let registry = PatternRegistry::from_toml(
            r#"
[[patterns]]
category = "employee_number"
confidence = 0.9
patterns = ['EMP-\d{4}']

[[patterns]]
category = "email"
patterns = ['\S+@\S+']
"#,
        )
        .unwrap();

        let all = registry.all_patterns();
        assert_eq!(all.len(), 2);
        assert_eq!(
            all[0].category,
            PiiCategory::Other("employee_number".to_string())
        );
        assert_eq!(all[1].category, PiiCategory::Email);
        assert_eq!(all[1].confidence, 0.95);
    }

    #[test]
    fn test_from_toml_rejects_bad_regex() {
        let result = PatternRegistry::from_toml(
            r#"
[[patterns]]
category = "email"
patterns = ['(unclosed']
"#,
        );
        assert!(matches!(result, Err(ScrubError::Pattern(_))));
    }

    #[test]
    fn test_from_toml_rejects_bad_confidence() {
        let result = PatternRegistry::from_toml(
            r#"
[[patterns]]
category = "email"
confidence = 1.5
patterns = ['x']
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_rejects_empty_library() {
        assert!(PatternRegistry::from_toml("").is_err());
    }
}
