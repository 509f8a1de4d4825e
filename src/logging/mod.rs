//! Logging and observability
//!
//! Structured logging through `tracing`: human-readable console output on
//! stderr plus optional rotating JSON files. PII values are never logged;
//! only counts, categories and hashes.
//!
//! # Example
//!
//! ```no_run
//! use cvscrub::logging::init_logging;
//! use cvscrub::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the outcome of a redaction call
///
/// # Example
///
/// ```no_run
/// use cvscrub::log_redaction_summary;
/// use std::time::Duration;
///
/// log_redaction_summary!("standard", 12, 9, Duration::from_millis(840));
/// ```
#[macro_export]
macro_rules! log_redaction_summary {
    ($level:expr, $detected:expr, $redacted:expr, $duration:expr) => {
        tracing::info!(
            level = %$level,
            detected = $detected,
            redacted = $redacted,
            duration_ms = $duration.as_millis() as u64,
            "Redaction completed"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use cvscrub::log_retry_attempt;
///
/// log_retry_attempt!(2, 3, "Connection timeout");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
