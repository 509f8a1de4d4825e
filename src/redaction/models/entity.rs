//! Entity records reported by the semantic oracle

use super::category::PiiCategory;
use serde::{Deserialize, Serialize};

/// PII entity as reported by the oracle
///
/// Oracle output is untrusted: `original_value` may not occur in the text and
/// `all_variations` may be empty or contain strings that never appear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiiEntity {
    #[serde(default)]
    pub original_value: String,

    #[serde(default = "default_pii_type")]
    pub pii_type: PiiCategory,

    /// Oracle's own estimate, 1 to 4
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity_level: Option<u8>,

    /// Every surface form of this entity in the text
    #[serde(default)]
    pub all_variations: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_specific: Option<bool>,
}

fn default_pii_type() -> PiiCategory {
    PiiCategory::Other("unknown".to_string())
}

impl PiiEntity {
    pub fn new(original_value: impl Into<String>, pii_type: PiiCategory) -> Self {
        Self {
            original_value: original_value.into(),
            pii_type,
            sensitivity_level: None,
            all_variations: Vec::new(),
            context: None,
            region_specific: None,
        }
    }

    pub fn with_variations<I, S>(mut self, variations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all_variations = variations.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sensitivity(mut self, level: u8) -> Self {
        self.sensitivity_level = Some(level);
        self
    }

    /// The oracle's sensitivity clamped to 1..=4, else the category default
    pub fn effective_sensitivity(&self) -> u8 {
        self.sensitivity_level
            .map(|level| level.clamp(1, 4))
            .unwrap_or_else(|| self.pii_type.sensitivity())
    }

    /// Non-empty, trimmed, de-duplicated variations; falls back to the
    /// original value when the oracle supplied none
    pub fn surface_forms(&self) -> Vec<&str> {
        let mut forms: Vec<&str> = Vec::new();
        for variation in &self.all_variations {
            let variation = variation.trim();
            if !variation.is_empty() && !forms.contains(&variation) {
                forms.push(variation);
            }
        }
        if forms.is_empty() {
            let value = self.original_value.trim();
            if !value.is_empty() {
                forms.push(value);
            }
        }
        forms
    }
}
