//! Candidate pipeline: PII identification stage
//!
//! Runs before any analysis of the résumé text. The oracle identifies PII
//! entities, the configured anonymizer rewrites the text, and the stage is
//! recorded. When the stage fails no anonymized content is produced, so
//! downstream stages never receive raw text.

use crate::adapters::llm::{Oracle, OracleRequest};
use crate::domain::OracleError;
use crate::redaction::anonymizer::{build_anonymizer, Anonymizer};
use crate::redaction::config::RedactionConfig;
use crate::redaction::detector::semantic::{entity_list_schema, parse_entities, SCHEMA_NAME};
use crate::redaction::models::PiiEntity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Stage name recorded in stage logs
pub const PII_STAGE: &str = "pii_identification";

const SYSTEM_PROMPT: &str = "You identify personally identifiable information in candidate CVs \
and answer using the provided schema.";

/// Record of one oracle-backed pipeline stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageLog {
    pub stage: String,
    pub model: String,
    pub started_at: DateTime<Utc>,
    pub duration_ms: u64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub entity_count: usize,
}

/// Outcome of the PII identification stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PiiIdentification {
    pub entities: Vec<PiiEntity>,
    /// `None` when the stage failed
    pub anonymized_content: Option<String>,
    pub stage_log: StageLog,
}

impl PiiIdentification {
    pub fn succeeded(&self) -> bool {
        self.stage_log.success
    }
}

/// PII identification and anonymization for the candidate pipeline
pub struct CandidatePipeline {
    anonymizer: Box<dyn Anonymizer>,
}

impl CandidatePipeline {
    pub fn new(anonymizer: Box<dyn Anonymizer>) -> Self {
        Self { anonymizer }
    }

    /// Pipeline using the anonymizer selected in the configuration
    pub fn from_config(config: &RedactionConfig) -> Self {
        Self::new(build_anonymizer(config))
    }

    /// Request asking the oracle to list PII entities in `content`
    pub fn build_request(&self, content: &str) -> OracleRequest {
        let user_prompt = format!(
            "Identify all Personally Identifiable Information (PII) entities in the following CV text.\n\
             Focus on names, organizations, schools, addresses, certification numbers, and other identifying information.\n\n\
             CV Content:\n{}\n\n\
             Return a structured list of PII entities with their types, sensitivity levels, and context.",
            content
        );

        OracleRequest {
            system_prompt: SYSTEM_PROMPT.to_string(),
            user_prompt,
            schema_name: SCHEMA_NAME.to_string(),
            schema: entity_list_schema(),
        }
    }

    /// Identify PII through the oracle and anonymize `content`
    pub async fn identify_pii(&self, content: &str, oracle: &dyn Oracle) -> PiiIdentification {
        let started_at = Utc::now();
        let start = Instant::now();
        let request = self.build_request(content);

        let outcome = match oracle.complete(&request).await {
            Ok(raw) => parse_entities(&raw),
            Err(e) => Err(e),
        };
        let duration_ms = start.elapsed().as_millis() as u64;

        match outcome {
            Ok(entities) => {
                let anonymized = self.anonymizer.anonymize(content, &entities);
                tracing::info!(
                    entities = entities.len(),
                    anonymizer = self.anonymizer.name(),
                    duration_ms,
                    "PII identification completed"
                );
                PiiIdentification {
                    stage_log: stage_log(oracle, started_at, duration_ms, None, entities.len()),
                    entities,
                    anonymized_content: Some(anonymized),
                }
            }
            Err(e) => {
                tracing::error!(error = %e, duration_ms, "PII identification failed");
                PiiIdentification {
                    entities: Vec::new(),
                    anonymized_content: None,
                    stage_log: stage_log(oracle, started_at, duration_ms, Some(&e), 0),
                }
            }
        }
    }
}

fn stage_log(
    oracle: &dyn Oracle,
    started_at: DateTime<Utc>,
    duration_ms: u64,
    error: Option<&OracleError>,
    entity_count: usize,
) -> StageLog {
    StageLog {
        stage: PII_STAGE.to_string(),
        model: oracle.name().to_string(),
        started_at,
        duration_ms,
        success: error.is_none(),
        error: error.map(|e| e.to_string()),
        entity_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::llm::StaticOracle;
    use crate::redaction::anonymizer::VariationSweepAnonymizer;

    fn pipeline() -> CandidatePipeline {
        CandidatePipeline::new(Box::new(VariationSweepAnonymizer::literal()))
    }

    #[tokio::test]
    async fn test_identify_and_anonymize() {
        let oracle = StaticOracle::new(
            r#"{"pii_entities": [
                {"original_value": "John Smith", "pii_type": "name", "sensitivity_level": 4,
                 "all_variations": ["John Smith", "John"], "context": "header"},
                {"original_value": "Tech Innovations Inc", "pii_type": "organization",
                 "sensitivity_level": 2, "all_variations": ["Tech Innovations Inc"], "context": "experience"}
            ]}"#,
        );
        let result = pipeline()
            .identify_pii("John Smith works at Tech Innovations Inc. John codes.", &oracle)
            .await;

        assert!(result.succeeded());
        assert_eq!(result.entities.len(), 2);
        assert_eq!(
            result.anonymized_content.as_deref(),
            Some("[CANDIDATE_NAME] works at [COMPANY_1]. [CANDIDATE_NAME] codes.")
        );
        assert_eq!(result.stage_log.stage, PII_STAGE);
        assert_eq!(result.stage_log.model, "static");
    }

    #[tokio::test]
    async fn test_failed_stage_withholds_content() {
        let oracle = StaticOracle::new("the model refused");
        let result = pipeline().identify_pii("John Smith", &oracle).await;

        assert!(!result.succeeded());
        assert!(result.anonymized_content.is_none());
        assert!(result.stage_log.error.is_some());
    }

    #[test]
    fn test_request_embeds_content() {
        let request = pipeline().build_request("Layla Haddad");
        assert!(request.user_prompt.contains("CV Content:\nLayla Haddad"));
        assert_eq!(request.schema_name, SCHEMA_NAME);
    }
}
