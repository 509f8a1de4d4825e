//! Span algebra shared by the finders, the merge engine and the anonymizers

use super::models::Span;
use regex::RegexBuilder;

/// Every non-overlapping exact occurrence of `needle`, left to right
///
/// With `word_bounded`, occurrences glued to alphanumeric neighbours are
/// skipped (`"Ali"` does not match inside `"Alison"`).
pub fn find_occurrences(text: &str, needle: &str, word_bounded: bool) -> Vec<Span> {
    if needle.is_empty() {
        return Vec::new();
    }

    text.match_indices(needle)
        .map(|(start, matched)| Span::new(start, start + matched.len()))
        .filter(|span| !word_bounded || is_word_bounded(text, *span))
        .collect()
}

/// Every non-overlapping case-insensitive occurrence of `needle`
///
/// Spans are located over `text` itself, so slicing with them yields the
/// text's own casing.
pub fn find_occurrences_ignore_case(text: &str, needle: &str) -> Vec<Span> {
    if needle.is_empty() {
        return Vec::new();
    }

    match RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re
            .find_iter(text)
            .map(|m| Span::new(m.start(), m.end()))
            .collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Could not build case-insensitive matcher");
            Vec::new()
        }
    }
}

/// True when the span is not glued to alphanumeric characters on either side
///
/// Edges whose own character is not alphanumeric are always accepted, so
/// values like `"AT&T"` or `"(050)"` behave sensibly.
pub fn is_word_bounded(text: &str, span: Span) -> bool {
    let Some(value) = span.slice(text) else {
        return false;
    };

    let first_is_word = value.chars().next().is_some_and(char::is_alphanumeric);
    let last_is_word = value.chars().next_back().is_some_and(char::is_alphanumeric);

    let before_ok = !first_is_word
        || text[..span.start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_alphanumeric());
    let after_ok = !last_is_word
        || text[span.end..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_alphanumeric());

    before_ok && after_ok
}

/// True when `span` overlaps any of `taken`
pub fn overlaps_any(span: &Span, taken: &[Span]) -> bool {
    taken.iter().any(|other| span.overlaps(other))
}

/// Substitute each span with its replacement, last span first, so earlier
/// offsets stay valid
///
/// Spans must be pairwise non-overlapping and valid for `text`; invalid spans
/// are skipped.
pub fn apply_replacements(text: &str, replacements: &[(Span, String)]) -> String {
    let mut ordered: Vec<&(Span, String)> = replacements.iter().collect();
    ordered.sort_by(|a, b| b.0.start.cmp(&a.0.start));

    let mut result = text.to_string();
    for (span, replacement) in ordered {
        if span.slice(&result).is_none() {
            tracing::debug!(start = span.start, end = span.end, "Skipping invalid span");
            continue;
        }
        result.replace_range(span.start..span.end, replacement);
    }
    result
}
