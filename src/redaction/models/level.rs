//! Redaction levels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How aggressively detected tokens are replaced
///
/// A token is replaced when its sensitivity is at least the level's threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RedactionLevel {
    /// Only critical identifiers (threshold 4)
    Minimal,
    /// Threshold 3
    #[default]
    Standard,
    /// Threshold 2
    Strict,
    /// Everything detected (threshold 1)
    Complete,
}

impl RedactionLevel {
    pub fn threshold(&self) -> u8 {
        match self {
            Self::Minimal => 4,
            Self::Standard => 3,
            Self::Strict => 2,
            Self::Complete => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Standard => "standard",
            Self::Strict => "strict",
            Self::Complete => "complete",
        }
    }
}

impl FromStr for RedactionLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "minimal" => Ok(Self::Minimal),
            "standard" => Ok(Self::Standard),
            "strict" => Ok(Self::Strict),
            "complete" => Ok(Self::Complete),
            other => Err(format!(
                "Invalid redaction level '{other}'. Must be one of: minimal, standard, strict, complete"
            )),
        }
    }
}

impl fmt::Display for RedactionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
