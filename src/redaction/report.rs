//! Redaction results, quality metrics and scan reports

use crate::redaction::models::{PiiCategory, PiiToken, RedactionLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a placeholder stands for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingEntry {
    pub original_value: String,
    pub pii_type: PiiCategory,
    pub sensitivity_level: u8,
    pub confidence: f32,
}

impl From<&PiiToken> for MappingEntry {
    fn from(token: &PiiToken) -> Self {
        Self {
            original_value: token.original_value.clone(),
            pii_type: token.category.clone(),
            sensitivity_level: token.sensitivity,
            confidence: token.confidence,
        }
    }
}

/// Detection and redaction statistics for one call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QualityMetrics {
    /// Tokens left after merging, before the threshold filter
    pub total_pii_detected: usize,

    /// Tokens that met the threshold and were replaced
    pub pii_redacted: usize,

    /// Tokens from the structured pass, phone numbers included
    pub structured_pii_count: usize,

    /// Tokens from the phone pass alone
    pub phone_pii_count: usize,

    /// Tokens from the semantic pass
    pub semantic_pii_count: usize,

    /// Mean confidence of the redacted tokens, 0 when none
    pub average_confidence: f32,

    /// Redacted share of detected tokens, 0 when none were detected
    pub redaction_coverage: f32,

    /// Merged detections per category
    pub by_category: BTreeMap<PiiCategory, usize>,
}

impl QualityMetrics {
    /// Build metrics from per-pass counts and the merged/redacted token sets
    pub fn compute(
        structured_count: usize,
        phone_count: usize,
        semantic_count: usize,
        detected: &[PiiToken],
        redacted: &[PiiToken],
    ) -> Self {
        let mut by_category = BTreeMap::new();
        for token in detected {
            *by_category.entry(token.category.clone()).or_insert(0) += 1;
        }

        let average_confidence = if redacted.is_empty() {
            0.0
        } else {
            redacted.iter().map(|t| t.confidence).sum::<f32>() / redacted.len() as f32
        };

        let redaction_coverage = if detected.is_empty() {
            0.0
        } else {
            redacted.len() as f32 / detected.len() as f32
        };

        Self {
            total_pii_detected: detected.len(),
            pii_redacted: redacted.len(),
            structured_pii_count: structured_count,
            phone_pii_count: phone_count,
            semantic_pii_count: semantic_count,
            average_confidence,
            redaction_coverage,
            by_category,
        }
    }
}

/// Output of one redaction call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedactionResult {
    pub redacted_text: String,

    /// Placeholder to original value
    pub mapping: BTreeMap<String, MappingEntry>,

    /// Every merged token, redacted or not, in text order
    pub tokens: Vec<PiiToken>,

    pub quality_metrics: QualityMetrics,

    pub level: RedactionLevel,
}

impl RedactionResult {
    /// Tokens that stayed visible because they fell below the threshold
    pub fn unredacted_tokens(&self) -> impl Iterator<Item = &PiiToken> {
        let threshold = self.level.threshold();
        self.tokens.iter().filter(move |t| t.sensitivity < threshold)
    }
}

/// One masked detection shown in a scan report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanSample {
    pub document: String,
    pub category: PiiCategory,
    /// Leading characters only, the rest masked
    pub masked_value: String,
    pub start: usize,
    pub end: usize,
    pub confidence: f32,
}

/// Detect-only report over one or more documents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanReport {
    pub total_documents: usize,
    pub documents_with_pii: usize,
    pub documents_without_pii: usize,
    pub total_pii_detected: usize,
    pub detections_by_category: BTreeMap<PiiCategory, usize>,
    pub samples: Vec<ScanSample>,
    pub warnings: Vec<String>,
    pub total_processing_time_ms: u64,
    pub avg_processing_time_ms: u64,
}

const MAX_SAMPLES: usize = 20;
const SAMPLES_PER_DOCUMENT: usize = 3;
const VISIBLE_CHARS: usize = 2;

impl ScanReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the detections for one document
    pub fn add_document(&mut self, document: &str, tokens: &[PiiToken], processing_time_ms: u64) {
        self.total_documents += 1;
        self.total_processing_time_ms += processing_time_ms;
        self.avg_processing_time_ms = self.total_processing_time_ms / self.total_documents as u64;

        if tokens.is_empty() {
            self.documents_without_pii += 1;
            return;
        }

        self.documents_with_pii += 1;
        self.total_pii_detected += tokens.len();
        for token in tokens {
            *self
                .detections_by_category
                .entry(token.category.clone())
                .or_insert(0) += 1;
        }

        for token in tokens.iter().take(SAMPLES_PER_DOCUMENT) {
            if self.samples.len() >= MAX_SAMPLES {
                break;
            }
            self.samples.push(ScanSample {
                document: document.to_string(),
                category: token.category.clone(),
                masked_value: mask_value(&token.original_value),
                start: token.start(),
                end: token.end(),
                confidence: token.confidence,
            });
        }
    }

    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    /// Format report for console output
    pub fn format_console(&self) -> String {
        let rule = "───────────────────────────────────────────────────────────────\n";
        let banner = "═══════════════════════════════════════════════════════════════\n";
        let mut output = String::new();

        output.push('\n');
        output.push_str(banner);
        output.push_str("                      PII SCAN REPORT                          \n");
        output.push_str(banner);
        output.push('\n');

        output.push_str("📊 SUMMARY\n");
        output.push_str(rule);
        output.push_str(&format!("  Documents Scanned:         {}\n", self.total_documents));
        output.push_str(&format!("  Documents with PII:        {}\n", self.documents_with_pii));
        output.push_str(&format!("  Documents without PII:     {}\n", self.documents_without_pii));
        output.push_str(&format!("  Total PII Detected:        {}\n", self.total_pii_detected));
        output.push_str(&format!("  Avg Processing Time:       {} ms\n", self.avg_processing_time_ms));
        output.push('\n');

        if !self.detections_by_category.is_empty() {
            output.push_str("🔍 DETECTIONS BY CATEGORY\n");
            output.push_str(rule);

            let mut categories: Vec<_> = self.detections_by_category.iter().collect();
            categories.sort_by(|a, b| b.1.cmp(a.1));
            for (category, count) in categories {
                output.push_str(&format!("  {:30} {:>5}\n", category.as_str(), count));
            }
            output.push('\n');
        }

        if !self.samples.is_empty() {
            output.push_str("📝 SAMPLE DETECTIONS\n");
            output.push_str(rule);
            for (i, sample) in self.samples.iter().take(10).enumerate() {
                output.push_str(&format!("\n  Sample #{}\n", i + 1));
                output.push_str(&format!("    Document:    {}\n", sample.document));
                output.push_str(&format!("    Category:    {}\n", sample.category));
                output.push_str(&format!("    Span:        {}..{}\n", sample.start, sample.end));
                output.push_str(&format!("    Confidence:  {:.2}%\n", sample.confidence * 100.0));
                output.push_str(&format!("    Value:       \"{}\"\n", sample.masked_value));
            }
            output.push('\n');
        }

        if !self.warnings.is_empty() {
            output.push_str("⚠️  WARNINGS\n");
            output.push_str(rule);
            for warning in &self.warnings {
                output.push_str(&format!("  • {}\n", warning));
            }
            output.push('\n');
        }

        output.push_str(banner);
        output.push('\n');
        output
    }

    /// Format report as JSON
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Write the JSON report to `path`
    pub fn write_to_file(&self, path: &std::path::Path) -> std::io::Result<()> {
        let json = self.format_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }
}

/// Keep the first characters of a value and mask the rest
fn mask_value(value: &str) -> String {
    let total = value.chars().count();
    let visible: String = value.chars().take(VISIBLE_CHARS).collect();
    let hidden = total.saturating_sub(VISIBLE_CHARS).min(12);
    format!("{}{}", visible, "*".repeat(hidden))
}
