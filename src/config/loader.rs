//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::{CvscrubConfig, OracleConfig, OracleProvider};
use super::secret::secret_string;
use crate::domain::errors::ScrubError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CvscrubConfig
/// 4. Applies environment variable overrides (CVSCRUB_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cvscrub::config::loader::load_config;
///
/// let config = load_config("cvscrub.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CvscrubConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ScrubError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ScrubError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CvscrubConfig = toml::from_str(&contents)
        .map_err(|e| ScrubError::Configuration(format!("Failed to parse TOML: {e}")))?;

    finish(&mut config)?;
    Ok(config)
}

/// Loads configuration from `path` when it exists, otherwise starts from
/// defaults; env overrides and validation apply in both cases
pub fn load_config_or_default(path: impl AsRef<Path>) -> Result<CvscrubConfig> {
    let path = path.as_ref();
    if path.exists() {
        return load_config(path);
    }

    tracing::warn!(
        path = %path.display(),
        "Configuration file not found, using defaults"
    );
    let mut config = CvscrubConfig::default();
    finish(&mut config)?;
    Ok(config)
}

fn finish(config: &mut CvscrubConfig) -> Result<()> {
    apply_env_overrides(config)?;

    config.validate().map_err(|e| {
        ScrubError::Configuration(format!("Configuration validation failed: {e}"))
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for (index, line) in input.lines().enumerate() {
        if index > 0 {
            result.push('\n');
        }

        // Comment lines are copied verbatim
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    let placeholder = format!("${{{var_name}}}");
                    processed_line = processed_line.replace(&placeholder, &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ScrubError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using CVSCRUB_* prefix
///
/// Environment variables follow the pattern: CVSCRUB_<SECTION>_<KEY>
/// For example: CVSCRUB_ORACLE_MODEL, CVSCRUB_REDACTION_LEVEL
fn apply_env_overrides(config: &mut CvscrubConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("CVSCRUB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Redaction overrides
    config
        .redaction
        .apply_env_overrides()
        .map_err(|e| ScrubError::Configuration(format!("{e:#}")))?;

    // Oracle overrides; setting the API key alone enables a default oracle
    if config.oracle.is_none() && std::env::var("CVSCRUB_ORACLE_API_KEY").is_ok() {
        config.oracle = Some(OracleConfig::default());
    }
    if let Some(ref mut oracle) = config.oracle {
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_PROVIDER") {
            oracle.provider = match val.to_lowercase().as_str() {
                "openai" => OracleProvider::OpenAi,
                "azure" => OracleProvider::Azure,
                _ => {
                    return Err(ScrubError::Configuration(format!(
                        "Invalid CVSCRUB_ORACLE_PROVIDER: {val}"
                    )))
                }
            };
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_BASE_URL") {
            oracle.base_url = val;
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_API_KEY") {
            oracle.api_key = Some(secret_string(val));
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_MODEL") {
            oracle.model = val;
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_API_VERSION") {
            oracle.api_version = Some(val);
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_TIMEOUT_SECONDS") {
            if let Ok(timeout) = val.parse() {
                oracle.timeout_seconds = timeout;
            }
        }
        if let Ok(val) = std::env::var("CVSCRUB_ORACLE_MAX_RETRIES") {
            if let Ok(retries) = val.parse() {
                oracle.retry.max_retries = retries;
            }
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CVSCRUB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CVSCRUB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CVSCRUB_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}
