//! Audit logging module
//!
//! Append-only record of redaction calls. Original values are stored only as
//! SHA-256 digests.

pub mod logger;

pub use logger::{hash_pii_value, AuditLogger};
