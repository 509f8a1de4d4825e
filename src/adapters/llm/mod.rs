//! Semantic oracle adapters
//!
//! The oracle is a language-model service asked to extract entities from free
//! text. It is treated as unreliable: calls may fail, time out or return
//! payloads that do not match the requested schema, and every call site must
//! handle "nothing usable" as a normal outcome.

pub mod client;
pub mod models;

use crate::domain::OracleError;
use async_trait::async_trait;
use serde_json::Value;

pub use client::ChatCompletionsOracle;

/// One structured-output request to the oracle
#[derive(Debug, Clone)]
pub struct OracleRequest {
    /// System message framing the task
    pub system_prompt: String,
    /// Task instruction, including the document text
    pub user_prompt: String,
    /// Name of the response schema
    pub schema_name: String,
    /// JSON schema the response must follow
    pub schema: Value,
}

/// Narrow capability: send a request, get raw payload text back or an error
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Run one completion and return the raw response content
    async fn complete(&self, request: &OracleRequest) -> Result<String, OracleError>;

    /// Model or source identifier, used in logs and stage records
    fn name(&self) -> &str;
}

/// Oracle that always answers with the same payload
///
/// Used for offline runs with a pre-computed entity file and in tests.
#[derive(Debug, Clone)]
pub struct StaticOracle {
    payload: String,
}

impl StaticOracle {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// An oracle reporting no entities
    pub fn empty() -> Self {
        Self::new(r#"{"pii_entities": []}"#)
    }
}

#[async_trait]
impl Oracle for StaticOracle {
    async fn complete(&self, _request: &OracleRequest) -> Result<String, OracleError> {
        Ok(self.payload.clone())
    }

    fn name(&self) -> &str {
        "static"
    }
}
