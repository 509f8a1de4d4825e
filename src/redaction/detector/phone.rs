//! Phone number finder
//!
//! Two strategies share one entry point. With the `phone-validation` feature
//! candidates are parsed and validated by the `phonenumber` crate under a
//! prioritized list of region hints. Without it an ordered battery of regional
//! and generic regexes is used at lower confidence.

use crate::domain::{Result, ScrubError};
use crate::redaction::models::{DetectionMethod, PiiCategory, PiiToken, Span};
use crate::redaction::span::overlaps_any;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Region hints tried first; numbers resolving to these regions score higher
pub const PRIORITY_REGIONS: &[&str] = &[
    "AE", "SA", "KW", "BH", "OM", "QA", "JO", "LB", "EG", "IR", "IQ", "IL", "PS", "SY", "YE",
];

/// Region hints tried after the priority list for national-format numbers
pub const SECONDARY_REGIONS: &[&str] = &["US", "GB", "CA", "AU", "IN", "PK", "BD", "PH", "MY", "SG"];

const PRIORITY_CONFIDENCE: f32 = 0.98;
const VALIDATED_CONFIDENCE: f32 = 0.95;
const REGIONAL_RULE_CONFIDENCE: f32 = 0.90;
const GENERIC_RULE_CONFIDENCE: f32 = 0.80;
const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;

/// Phone-shaped text handed to the validator
const CANDIDATE_PATTERN: &str = r"\+?\(?\d[\d \t().\-]{5,20}\d";

/// Country and regional formats, highest precision first
///
/// Both `_local` rules score like the international ones. `ksa_local` sits at
/// the regional confidence deliberately; do not drop it to the generic tier.
const REGIONAL_RULES: &[(&str, &str)] = &[
    ("uae", r"\+971[\s-]?(?:50|51|52|54|55|56|58|2|3|4|6|7|9)[\s-]?\d{3}[\s-]?\d{4}"),
    ("ksa", r"\+966[\s-]?(?:50|51|53|54|55|56|57|58|59|1[1-9])[\s-]?\d{3}[\s-]?\d{4}"),
    ("kuwait", r"\+965[\s-]?(?:[2469]\d{3}|5\d{3}|[17]\d{3})[\s-]?\d{4}"),
    ("qatar", r"\+974[\s-]?(?:[3567]\d{3}|4[04-9]\d{2}|[2489]\d{3})[\s-]?\d{4}"),
    ("bahrain", r"\+973[\s-]?(?:[13679]\d{3})[\s-]?\d{4}"),
    ("oman", r"\+968[\s-]?(?:[79]\d{3}|2[2-9]\d{2})[\s-]?\d{4}"),
    ("jordan", r"\+962[\s-]?(?:[2-9])[\s-]?\d{4}[\s-]?\d{4}"),
    ("lebanon", r"\+961[\s-]?(?:[1-9]\d?)[\s-]?\d{3}[\s-]?\d{3}"),
    ("egypt", r"\+20[\s-]?(?:1[0125]|2)[\s-]?\d{3}[\s-]?\d{4}"),
    ("uae_local", r"0(?:50|51|52|54|55|56|58|2|3|4|6|7|9)[\s-]?\d{3}[\s-]?\d{4}"),
    ("ksa_local", r"0(?:50|51|53|54|55|56|57|58|59|1[1-9])[\s-]?\d{3}[\s-]?\d{4}"),
];

/// Catch-all international and local formats
const GENERIC_RULES: &[(&str, &str)] = &[
    ("international", r"\+\d{1,3}[\s.-]?\d{1,4}[\s.-]?\d{1,4}[\s.-]?\d{1,9}"),
    ("local", r"(?:\(\d{2,4}\)|\d{2,4})[\s.-]?\d{3,4}[\s.-]?\d{3,4}"),
];

/// Which phone detection path is in use
///
/// Resolved once when the finder is built, never re-checked per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneStrategy {
    /// Regional hints plus library validation
    Validated,
    /// Ordered regex battery
    RegexBattery,
}

impl PhoneStrategy {
    /// Best strategy compiled into this build
    pub fn detect() -> Self {
        if cfg!(feature = "phone-validation") {
            Self::Validated
        } else {
            Self::RegexBattery
        }
    }

    pub fn is_available(&self) -> bool {
        match self {
            Self::Validated => cfg!(feature = "phone-validation"),
            Self::RegexBattery => true,
        }
    }

    /// Resolve a configured preference (`auto`, `validated`, `regex`)
    pub fn resolve(preference: &str) -> Result<Self> {
        let strategy = match preference.trim().to_lowercase().as_str() {
            "auto" | "" => return Ok(Self::detect()),
            other => other.parse::<Self>().map_err(ScrubError::Configuration)?,
        };

        if !strategy.is_available() {
            return Err(ScrubError::Configuration(
                "phone_strategy 'validated' requires the 'phone-validation' feature".to_string(),
            ));
        }
        Ok(strategy)
    }
}

impl FromStr for PhoneStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "validated" => Ok(Self::Validated),
            "regex" | "regex_battery" => Ok(Self::RegexBattery),
            other => Err(format!(
                "Invalid phone_strategy '{other}'. Must be one of: auto, validated, regex"
            )),
        }
    }
}

impl fmt::Display for PhoneStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validated => f.write_str("validated"),
            Self::RegexBattery => f.write_str("regex"),
        }
    }
}

#[derive(Debug, Clone)]
struct PhoneRule {
    label: &'static str,
    regex: Regex,
    confidence: f32,
}

/// Phone number finder
#[derive(Debug, Clone)]
pub struct PhoneNumberFinder {
    strategy: PhoneStrategy,
    candidate_regex: Regex,
    battery: Vec<PhoneRule>,
}

impl PhoneNumberFinder {
    /// Build a finder for the given strategy
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the strategy is not compiled in.
    pub fn new(strategy: PhoneStrategy) -> Result<Self> {
        if !strategy.is_available() {
            return Err(ScrubError::Configuration(format!(
                "Phone strategy '{strategy}' is not available in this build"
            )));
        }

        let mut battery = Vec::with_capacity(REGIONAL_RULES.len() + GENERIC_RULES.len());
        for &(label, pattern) in REGIONAL_RULES {
            battery.push(PhoneRule {
                label,
                regex: Regex::new(pattern)?,
                confidence: REGIONAL_RULE_CONFIDENCE,
            });
        }
        for &(label, pattern) in GENERIC_RULES {
            battery.push(PhoneRule {
                label,
                regex: Regex::new(pattern)?,
                confidence: GENERIC_RULE_CONFIDENCE,
            });
        }

        Ok(Self {
            strategy,
            candidate_regex: Regex::new(CANDIDATE_PATTERN)?,
            battery,
        })
    }

    /// Build a finder with the best strategy available
    pub fn detect() -> Result<Self> {
        Self::new(PhoneStrategy::detect())
    }

    pub fn strategy(&self) -> PhoneStrategy {
        self.strategy
    }

    /// Find phone numbers not overlapping `already_seen`, sorted by start
    pub fn find(&self, text: &str, already_seen: &[Span]) -> Vec<PiiToken> {
        let mut tokens = match self.strategy {
            #[cfg(feature = "phone-validation")]
            PhoneStrategy::Validated => self.find_validated(text, already_seen),
            #[cfg(not(feature = "phone-validation"))]
            PhoneStrategy::Validated => self.find_with_battery(text, already_seen),
            PhoneStrategy::RegexBattery => self.find_with_battery(text, already_seen),
        };

        tokens.sort_by_key(|t| t.span.start);
        tracing::debug!(
            count = tokens.len(),
            strategy = %self.strategy,
            "Phone pass complete"
        );
        tokens
    }

    /// Validate each candidate and its digit-group sub-ranges, longest first
    ///
    /// Only text carrying a dialling prefix (`+`, `00`, `0` or `(0`) is
    /// handed to the validator, so bare digit runs such as year ranges are
    /// never read as national numbers.
    #[cfg(feature = "phone-validation")]
    fn find_validated(&self, text: &str, already_seen: &[Span]) -> Vec<PiiToken> {
        use phonenumber::country;

        let priority: Vec<country::Id> = PRIORITY_REGIONS
            .iter()
            .filter_map(|code| code.parse::<country::Id>().ok())
            .collect();

        let regions: Vec<country::Id> = PRIORITY_REGIONS
            .iter()
            .chain(SECONDARY_REGIONS)
            .filter_map(|code| match code.parse::<country::Id>() {
                Ok(id) => Some(id),
                Err(_) => {
                    tracing::debug!(region = code, "Unknown region hint, skipping");
                    None
                }
            })
            .collect();

        let mut tokens = Vec::new();
        let mut accepted: Vec<Span> = Vec::new();

        for candidate in self.candidate_regex.find_iter(text) {
            let raw = candidate.as_str();

            for (start, end) in candidate_variants(raw) {
                let value = &raw[start..end];
                let span = Span::new(candidate.start() + start, candidate.start() + end);
                if !has_dialling_prefix(value)
                    || !(MIN_DIGITS..=MAX_DIGITS).contains(&digit_count(value))
                    || overlaps_any(&span, already_seen)
                    || overlaps_any(&span, &accepted)
                {
                    continue;
                }

                let Some(number) = validate_number(value, &regions) else {
                    tracing::trace!("Candidate did not validate as a phone number");
                    continue;
                };

                let confidence = match number.country().id() {
                    Some(id) if priority.contains(&id) => PRIORITY_CONFIDENCE,
                    _ => VALIDATED_CONFIDENCE,
                };

                accepted.push(span);
                tokens.push(PiiToken::new(
                    value,
                    PiiCategory::Phone,
                    span,
                    confidence,
                    DetectionMethod::PhoneValidator,
                ));
            }
        }

        tokens
    }

    fn find_with_battery(&self, text: &str, already_seen: &[Span]) -> Vec<PiiToken> {
        let mut tokens = Vec::new();
        let mut accepted: Vec<Span> = Vec::new();

        for rule in &self.battery {
            for matched in rule.regex.find_iter(text) {
                let span = Span::new(matched.start(), matched.end());
                if overlaps_any(&span, already_seen) || overlaps_any(&span, &accepted) {
                    continue;
                }

                if !(MIN_DIGITS..=MAX_DIGITS).contains(&digit_count(matched.as_str())) {
                    continue;
                }

                tracing::trace!(rule = rule.label, "Phone rule matched");
                accepted.push(span);
                tokens.push(PiiToken::new(
                    matched.as_str(),
                    PiiCategory::Phone,
                    span,
                    rule.confidence,
                    DetectionMethod::PhoneRegex,
                ));
            }
        }

        tokens
    }
}

fn digit_count(value: &str) -> usize {
    value.chars().filter(char::is_ascii_digit).count()
}

/// International numbers carry `+` (or `00`); national ones need their trunk `0`
#[cfg(feature = "phone-validation")]
fn has_dialling_prefix(value: &str) -> bool {
    let value = value.strip_prefix('(').unwrap_or(value);
    value.starts_with('+') || value.starts_with('0')
}

/// Byte ranges of `raw` that start and end on a digit group, longest first
///
/// The full candidate comes first, so a greedy match that swallowed a
/// neighbouring year still yields the number inside it.
#[cfg(feature = "phone-validation")]
fn candidate_variants(raw: &str) -> Vec<(usize, usize)> {
    let mut groups: Vec<(usize, usize)> = Vec::new();
    for (idx, ch) in raw.char_indices() {
        if !ch.is_ascii_digit() {
            continue;
        }
        match groups.last_mut() {
            Some(group) if group.1 == idx => group.1 = idx + 1,
            _ => groups.push((idx, idx + 1)),
        }
    }

    let mut variants = Vec::new();
    for (i, &(group_start, _)) in groups.iter().enumerate() {
        let start = if i == 0 {
            0
        } else if raw[..group_start].ends_with('(') {
            group_start - 1
        } else {
            group_start
        };

        for &(_, group_end) in &groups[i..] {
            if let Some(range) = balance_parens(raw, start, group_end) {
                variants.push(range);
            }
        }
    }

    variants.sort_by_key(|&(start, end)| (std::cmp::Reverse(end - start), start));
    variants.dedup();
    variants
}

/// Drop a lone opening paren, reject any other imbalance
#[cfg(feature = "phone-validation")]
fn balance_parens(raw: &str, start: usize, end: usize) -> Option<(usize, usize)> {
    let slice = &raw[start..end];
    let opens = slice.matches('(').count();
    let closes = slice.matches(')').count();

    if opens == closes {
        Some((start, end))
    } else if opens == 1 && closes == 0 && slice.starts_with('(') {
        Some((start + 1, end))
    } else {
        None
    }
}

#[cfg(feature = "phone-validation")]
fn validate_number(
    value: &str,
    regions: &[phonenumber::country::Id],
) -> Option<phonenumber::PhoneNumber> {
    let valid = |region: Option<phonenumber::country::Id>| {
        phonenumber::parse(region, value)
            .ok()
            .filter(|number| phonenumber::is_valid(number))
    };

    if value.trim_start_matches('(').starts_with('+') {
        valid(None)
    } else {
        regions.iter().find_map(|&id| valid(Some(id)))
    }
}
