//! Fuzzy actor-name matching.
//!
//! Typed actor names rarely match the database exactly; this module
//! scores a query against the known name list and returns the best
//! candidate so the CLI can ask "did you mean ...?".

use strsim::normalized_levenshtein;

/// Minimum score (0-100) at which a fuzzy match is offered to the user.
pub const SUGGESTION_THRESHOLD: u8 = 70;

/// A fuzzy match candidate with its similarity score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    /// The matched candidate name.
    pub name: String,
    /// Similarity score from 0 (no overlap) to 100 (identical).
    pub score: u8,
}

/// Finds the best-scoring candidate for a query.
///
/// Scoring is case-insensitive normalized Levenshtein similarity scaled
/// to 0-100. A case-insensitive exact match short-circuits at 100.
/// Returns `None` when `candidates` is empty.
#[must_use]
pub fn best_match(query: &str, candidates: &[String]) -> Option<Match> {
    let query_lower = query.to_lowercase();

    let mut best: Option<Match> = None;
    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();
        if candidate_lower == query_lower {
            return Some(Match {
                name: candidate.clone(),
                score: 100,
            });
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let score = (normalized_levenshtein(&query_lower, &candidate_lower) * 100.0).round() as u8;
        if best.as_ref().is_none_or(|b| score > b.score) {
            best = Some(Match {
                name: candidate.clone(),
                score,
            });
        }
    }
    best
}

/// Finds the best candidate at or above [`SUGGESTION_THRESHOLD`].
#[must_use]
pub fn suggest(query: &str, candidates: &[String]) -> Option<Match> {
    best_match(query, candidates).filter(|m| m.score >= SUGGESTION_THRESHOLD)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn names() -> Vec<String> {
        ["Kate Winslet", "Leonardo DiCaprio", "Drew Barrymore"]
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    #[test]
    fn test_exact_match_scores_100() {
        let m = best_match("kate winslet", &names()).unwrap();
        assert_eq!(m.name, "Kate Winslet");
        assert_eq!(m.score, 100);
    }

    #[test]
    fn test_near_match_above_threshold() {
        let m = suggest("Kate Winslett", &names()).unwrap();
        assert_eq!(m.name, "Kate Winslet");
        assert!(m.score >= SUGGESTION_THRESHOLD);
        assert!(m.score < 100);
    }

    #[test]
    fn test_garbage_below_threshold() {
        assert!(suggest("zzzzqqqq", &names()).is_none());
        // best_match still reports the least-bad candidate
        assert!(best_match("zzzzqqqq", &names()).is_some());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(best_match("anyone", &[]).is_none());
    }
}
