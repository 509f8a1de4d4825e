//! Detected-span data models

use super::category::PiiCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Finder that produced a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetectionMethod {
    /// Pattern catalog match
    Pattern,
    /// Phone number confirmed by the validation library
    PhoneValidator,
    /// Phone number matched by the regex battery
    PhoneRegex,
    /// Entity reported by the semantic oracle
    Oracle,
}

impl DetectionMethod {
    /// Structured methods are deterministic and win ties against the oracle
    pub fn is_structured(&self) -> bool {
        !matches!(self, Self::Oracle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::PhoneValidator => "phone_validator",
            Self::PhoneRegex => "phone_regex",
            Self::Oracle => "oracle",
        }
    }
}

/// Half-open byte range `[start, end)` into the analysed text
///
/// Offsets always fall on UTF-8 char boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Two spans overlap unless one ends at or before the other starts
    pub fn overlaps(&self, other: &Span) -> bool {
        !(self.end <= other.start || other.end <= self.start)
    }

    /// The text covered by the span, if the span is valid for `text`
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// One detected PII occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiToken {
    /// Opaque identifier, unique per detection
    pub id: Uuid,
    /// Exact text covered by `span`
    pub original_value: String,
    pub category: PiiCategory,
    /// 1 (low) to 4 (critical)
    pub sensitivity: u8,
    pub span: Span,
    /// Detection confidence in `[0, 1]`
    pub confidence: f32,
    pub method: DetectionMethod,
}

impl PiiToken {
    /// Create a token with the category's default sensitivity
    pub fn new(
        original_value: impl Into<String>,
        category: PiiCategory,
        span: Span,
        confidence: f32,
        method: DetectionMethod,
    ) -> Self {
        let sensitivity = category.sensitivity();
        Self {
            id: Uuid::new_v4(),
            original_value: original_value.into(),
            category,
            sensitivity,
            span,
            confidence: confidence.clamp(0.0, 1.0),
            method,
        }
    }

    /// Override the sensitivity (clamped to 1..=4)
    pub fn with_sensitivity(mut self, sensitivity: u8) -> Self {
        self.sensitivity = sensitivity.clamp(1, 4);
        self
    }

    /// Set the confidence score
    pub fn set_confidence(&mut self, confidence: f32) {
        self.confidence = confidence.clamp(0.0, 1.0);
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    pub fn len(&self) -> usize {
        self.span.len()
    }

    pub fn is_empty(&self) -> bool {
        self.span.is_empty()
    }

    pub fn overlaps(&self, other: &PiiToken) -> bool {
        self.span.overlaps(&other.span)
    }

    /// Whether the token's value is exactly the text its span covers
    pub fn is_faithful_to(&self, text: &str) -> bool {
        self.span.slice(text) == Some(self.original_value.as_str())
    }
}
