//! Span merge engine
//!
//! Combines the structured and semantic passes into one sorted,
//! overlap-free token list.

use super::models::PiiToken;

/// Merge structured and semantic tokens
///
/// Candidates are walked in start order (structured first among equal
/// starts). A candidate that overlaps an accepted token replaces it only when
/// its confidence is strictly higher, or equal and the candidate comes from
/// the structured pass. Only the first overlapping token is compared; a
/// winner that still overlaps another accepted token is discarded.
pub fn merge(structured: Vec<PiiToken>, semantic: Vec<PiiToken>) -> Vec<PiiToken> {
    let mut candidates: Vec<PiiToken> = structured.into_iter().chain(semantic).collect();
    candidates.sort_by_key(|t| t.span.start);

    let mut accepted: Vec<PiiToken> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let Some(index) = accepted.iter().position(|t| t.overlaps(&candidate)) else {
            accepted.push(candidate);
            continue;
        };

        if !beats(&candidate, &accepted[index]) {
            continue;
        }

        let still_conflicts = accepted
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && t.overlaps(&candidate));
        if still_conflicts {
            tracing::trace!(
                start = candidate.start(),
                end = candidate.end(),
                "Discarding winner that spans several accepted tokens"
            );
            continue;
        }

        tracing::trace!(
            category = %candidate.category,
            replaced = %accepted[index].category,
            method = candidate.method.as_str(),
            "Merge replaced overlapping token"
        );
        accepted[index] = candidate;
    }

    accepted.sort_by_key(|t| t.span.start);
    accepted
}

fn beats(candidate: &PiiToken, incumbent: &PiiToken) -> bool {
    candidate.confidence > incumbent.confidence
        || (candidate.confidence == incumbent.confidence && candidate.method.is_structured())
}
