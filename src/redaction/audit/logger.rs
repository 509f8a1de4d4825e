//! Audit logger for redaction calls

use crate::domain::{Result, ScrubError};
use crate::redaction::config::AuditConfig;
use crate::redaction::report::RedactionResult;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Serialize)]
struct AuditLogEntry {
    timestamp: String,
    request_id: String,
    level: String,
    detected_count: usize,
    redacted_count: usize,
    processing_time_ms: u64,
    redactions: Vec<AuditRedaction>,
}

/// One replaced token, value hashed
#[derive(Debug, Serialize)]
struct AuditRedaction {
    placeholder: String,
    category: String,
    sensitivity: u8,
    confidence: f32,
    /// SHA-256 of the original value, never the plaintext
    value_hash: String,
}

/// Audit logger for redaction calls
#[derive(Debug)]
pub struct AuditLogger {
    log_path: PathBuf,
    json_format: bool,
}

impl AuditLogger {
    /// Create a logger, making sure the log directory exists
    pub fn new(log_path: PathBuf, json_format: bool) -> Result<Self> {
        if let Some(parent) = log_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    ScrubError::Audit(format!(
                        "Failed to create audit log directory {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(Self {
            log_path,
            json_format,
        })
    }

    /// Logger for the configuration, or `None` when auditing is off
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(config.log_path.clone(), config.json_format).map(Some)
    }

    /// Record one redaction call; returns the generated request id
    pub fn log_redaction(&self, result: &RedactionResult, processing_time_ms: u64) -> Result<Uuid> {
        let request_id = Uuid::new_v4();
        let entry = AuditLogEntry {
            timestamp: Utc::now().to_rfc3339(),
            request_id: request_id.to_string(),
            level: result.level.to_string(),
            detected_count: result.quality_metrics.total_pii_detected,
            redacted_count: result.quality_metrics.pii_redacted,
            processing_time_ms,
            redactions: result
                .mapping
                .iter()
                .map(|(placeholder, entry)| AuditRedaction {
                    placeholder: placeholder.clone(),
                    category: entry.pii_type.to_string(),
                    sensitivity: entry.sensitivity_level,
                    confidence: entry.confidence,
                    value_hash: hash_pii_value(&entry.original_value),
                })
                .collect(),
        };

        self.write_entry(&entry)?;
        Ok(request_id)
    }

    fn write_entry(&self, entry: &AuditLogEntry) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| {
                ScrubError::Audit(format!(
                    "Failed to open audit log {}: {}",
                    self.log_path.display(),
                    e
                ))
            })?;

        let line = if self.json_format {
            serde_json::to_string(entry)?
        } else {
            format!(
                "[{}] Request: {} | Level: {} | Detected: {} | Redacted: {} | Time: {}ms",
                entry.timestamp,
                entry.request_id,
                entry.level,
                entry.detected_count,
                entry.redacted_count,
                entry.processing_time_ms
            )
        };

        writeln!(file, "{line}")
            .map_err(|e| ScrubError::Audit(format!("Failed to write audit entry: {}", e)))
    }
}

/// Hex SHA-256 digest of a PII value
pub fn hash_pii_value(value: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(value.as_bytes());
    format!("{:x}", hasher.finalize())
}
