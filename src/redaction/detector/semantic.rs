//! Semantic span finder backed by the external oracle
//!
//! The oracle reports entities by value, never by offset, so every entity is
//! re-located in the analysed text. Anything that cannot be found is dropped.

use crate::adapters::llm::{Oracle, OracleRequest};
use crate::domain::OracleError;
use crate::redaction::models::{DetectionMethod, PiiCategory, PiiEntity, PiiToken, Span};
use crate::redaction::span::{find_occurrences, find_occurrences_ignore_case, overlaps_any};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Confidence assigned to every oracle-sourced token
pub const ORACLE_CONFIDENCE: f32 = 0.90;

/// Name of the structured-output schema
pub const SCHEMA_NAME: &str = "pii_extraction";

const SYSTEM_PROMPT: &str = "You are a precise PII extraction system specializing in Middle \
Eastern CVs. Extract PII using the provided schema.";

const EXTRACTION_INSTRUCTION: &str = "\
You are an expert PII detection system specializing in Middle Eastern CVs. Extract ALL personally identifiable information from the CV text below.

CRITICAL INSTRUCTIONS:
1. Find EXACT substrings as they appear in the text - do not modify or reformat
2. Pay special attention to Arabic names, Middle Eastern organizations, and regional patterns
3. Look for these PII types: name, address, organization, school, job_title, certification_number, license_number, national_id
4. Include all variations of names (full name, first name only, last name only, nicknames, Arabic transliterations)
5. Detect Middle Eastern companies, universities, government entities, certification bodies
6. Find physical addresses including Arabic address formats, P.O. Boxes, district names
7. Identify professional titles and positions (including Arabic titles if transliterated)
8. Look for national IDs, Emirates IDs, Saudi IDs, passport numbers, visa numbers
9. Detect Gulf-specific certifications and professional licenses

MIDDLE EASTERN SPECIFIC PATTERNS TO LOOK FOR:
- Arabic names and their English transliterations
- Gulf company suffixes (LLC, FZE, FZCO, WLL, etc.)
- Regional universities (AUB, AUS, UAEU, KSU, etc.)
- Emirates ID numbers, Saudi ID numbers, Kuwaiti civil IDs
- P.O. Box addresses common in Gulf countries
- Professional councils and regulatory body certifications

Extract each piece of PII as an exact substring from the original text.";

/// Accepted payload shapes: the schema's wrapper object or a bare list
#[derive(Deserialize)]
#[serde(untagged)]
enum EntityPayload {
    Wrapped { pii_entities: Vec<PiiEntity> },
    Bare(Vec<PiiEntity>),
}

/// JSON schema for one oracle-reported entity
pub fn entity_item_schema() -> Value {
    let categories = PiiCategory::semantic_categories();
    let pii_types: Vec<&str> = categories.iter().map(|c| c.as_str()).collect();

    json!({
        "type": "object",
        "properties": {
            "original_value": {
                "type": "string",
                "description": "Exact substring from the CV text"
            },
            "pii_type": {
                "type": "string",
                "enum": pii_types,
                "description": "Type of PII detected"
            },
            "sensitivity_level": {
                "type": "integer",
                "minimum": 1,
                "maximum": 4,
                "description": "Sensitivity level (1=lowest, 4=highest)"
            },
            "all_variations": {
                "type": "array",
                "items": {"type": "string"},
                "description": "All variations of this entity found in text"
            },
            "context": {
                "type": "string",
                "description": "Brief context where this PII was found"
            },
            "region_specific": {
                "type": "boolean",
                "description": "True if this is Middle Eastern specific PII"
            }
        },
        "required": ["original_value", "pii_type", "sensitivity_level", "all_variations", "context"]
    })
}

/// Full response schema: entities wrapped under `pii_entities`
pub fn entity_list_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "pii_entities": {
                "type": "array",
                "items": entity_item_schema()
            }
        },
        "required": ["pii_entities"]
    })
}

/// Parse an oracle payload into entities
///
/// Accepts `{"pii_entities": [...]}`, a bare array, and either of those inside
/// a fenced code block.
pub fn parse_entities(raw: &str) -> Result<Vec<PiiEntity>, OracleError> {
    let body = strip_code_fence(raw.trim());
    if body.is_empty() {
        return Err(OracleError::EmptyResponse);
    }

    let payload: EntityPayload = serde_json::from_str(body)
        .map_err(|e| OracleError::Parse(format!("Entity payload does not match schema: {}", e)))?;

    Ok(match payload {
        EntityPayload::Wrapped { pii_entities } => pii_entities,
        EntityPayload::Bare(entities) => entities,
    })
}

fn strip_code_fence(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("```") else {
        return raw;
    };
    // Drop an info string such as `json` on the opening fence line
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Oracle-backed PII finder
#[derive(Debug, Clone)]
pub struct SemanticSpanFinder {
    confidence: f32,
}

impl Default for SemanticSpanFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl SemanticSpanFinder {
    pub fn new() -> Self {
        Self {
            confidence: ORACLE_CONFIDENCE,
        }
    }

    /// Build the extraction request for `text`
    pub fn build_request(&self, text: &str) -> OracleRequest {
        OracleRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt: format!("{}\n\nCV TEXT:\n{}", EXTRACTION_INSTRUCTION, text),
            schema_name: SCHEMA_NAME.to_string(),
            schema: entity_list_schema(),
        }
    }

    /// Ask the oracle for entities and locate them in `text`
    ///
    /// Never fails: oracle errors and unusable payloads yield an empty list.
    pub async fn find(&self, text: &str, oracle: &dyn Oracle) -> Vec<PiiToken> {
        let request = self.build_request(text);

        let raw = match oracle.complete(&request).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(oracle = oracle.name(), error = %e, "Semantic PII extraction failed");
                return Vec::new();
            }
        };

        let entities = match parse_entities(&raw) {
            Ok(entities) => entities,
            Err(e) => {
                tracing::warn!(oracle = oracle.name(), error = %e, "Discarding oracle response");
                return Vec::new();
            }
        };

        self.locate(text, &entities)
    }

    /// Re-derive spans for oracle entities
    ///
    /// Exact occurrences are preferred; the case-insensitive scan is only
    /// tried when the exact value never appears. Spans already claimed by an
    /// earlier entity are skipped.
    pub fn locate(&self, text: &str, entities: &[PiiEntity]) -> Vec<PiiToken> {
        let mut tokens: Vec<PiiToken> = Vec::new();
        let mut accepted: Vec<Span> = Vec::new();
        let mut seen: HashSet<Span> = HashSet::new();

        for entity in entities {
            let value = entity.original_value.trim();
            if value.is_empty() {
                continue;
            }

            let mut spans = find_occurrences(text, value, false);
            if spans.is_empty() {
                spans = find_occurrences_ignore_case(text, value);
            }
            if spans.is_empty() {
                tracing::debug!(
                    category = %entity.pii_type,
                    "Dropping oracle entity not present in text"
                );
                continue;
            }

            let sensitivity = entity.effective_sensitivity();
            for span in spans {
                if !seen.insert(span) || overlaps_any(&span, &accepted) {
                    continue;
                }
                let Some(actual) = span.slice(text) else {
                    continue;
                };

                accepted.push(span);
                tokens.push(
                    PiiToken::new(
                        actual,
                        entity.pii_type.clone(),
                        span,
                        self.confidence,
                        DetectionMethod::Oracle,
                    )
                    .with_sensitivity(sensitivity),
                );
            }
        }

        tokens.sort_by_key(|t| t.span.start);
        tracing::debug!(count = tokens.len(), "Semantic pass complete");
        tokens
    }
}
