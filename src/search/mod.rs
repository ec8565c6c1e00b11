//! Fuzzy matching over the choice pool.
//!
//! The [`Searcher`] trait is the seam between the event handler and the
//! matching engine, so tests can rank deterministically and hosts can swap
//! in their own scorer. The default [`FuzzySearcher`] wraps skim's
//! `SkimMatcherV2`, scoring each candidate against both its label and its
//! value and keeping the better of the two.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use std::fmt;

/// One choice as seen by the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCandidate {
    pub id: u64,
    pub label: String,
    pub value: String,
}

/// A scored hit. Higher scores are better matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    pub id: u64,
    pub score: i64,
}

/// Ranks candidates against a needle and locates matched spans for
/// highlighting.
pub trait Searcher {
    /// Returns matching candidates ordered best-first.
    ///
    /// Candidates that do not match are absent from the result. Ties keep
    /// their input order.
    fn search(&self, needle: &str, haystack: &[SearchCandidate]) -> Vec<SearchMatch>;

    /// Returns half-open byte ranges of `text` matched by `needle`, with
    /// adjacent positions coalesced into single spans.
    fn highlight_spans(&self, needle: &str, text: &str) -> Vec<(usize, usize)>;
}

/// Skim-backed default scorer.
#[derive(Default)]
pub struct FuzzySearcher {
    matcher: SkimMatcherV2,
}

impl FuzzySearcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Searcher for FuzzySearcher {
    fn search(&self, needle: &str, haystack: &[SearchCandidate]) -> Vec<SearchMatch> {
        let mut matches: Vec<SearchMatch> = haystack
            .iter()
            .filter_map(|candidate| {
                let by_label = self.matcher.fuzzy_match(&candidate.label, needle);
                let by_value = self.matcher.fuzzy_match(&candidate.value, needle);
                by_label
                    .into_iter()
                    .chain(by_value)
                    .max()
                    .map(|score| SearchMatch {
                        id: candidate.id,
                        score,
                    })
            })
            .collect();

        matches.sort_by(|a, b| b.score.cmp(&a.score));
        tracing::debug!(
            needle = %needle,
            candidates = haystack.len(),
            matches = matches.len(),
            "search ranked"
        );
        matches
    }

    fn highlight_spans(&self, needle: &str, text: &str) -> Vec<(usize, usize)> {
        if needle.is_empty() {
            return Vec::new();
        }
        let Some((_score, indices)) = self.matcher.fuzzy_indices(text, needle) else {
            return Vec::new();
        };

        let mut spans = Vec::new();
        let mut start: Option<usize> = None;
        let mut prev = 0usize;
        for &idx in &indices {
            match start {
                None => start = Some(idx),
                Some(s) if idx != prev + 1 => {
                    spans.push((s, prev + 1));
                    start = Some(idx);
                }
                Some(_) => {}
            }
            prev = idx;
        }
        if let Some(s) = start {
            spans.push((s, prev + 1));
        }
        spans
    }
}

impl fmt::Debug for FuzzySearcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzySearcher").finish_non_exhaustive()
    }
}
