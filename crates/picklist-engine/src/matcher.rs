//! Fuzzy matching over the option list (local mode).
//!
//! A thin wrapper over `fuzzy-matcher`'s skim scorer. Both `label` and
//! `value` are searched, case-insensitively; an option's score is the
//! better of the two. Scoring is recomputed from scratch for every query,
//! never refined incrementally, so narrowing a query can only re-admit an
//! option if the fresh score says so.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use picklist_core::DropdownOption;

/// Minimum score per query character for an option to be admitted.
///
/// Skim scores a clean adjacent character match well above this, so short
/// prefixes and dropped-letter typos pass while weak scattered matches in
/// long strings are rejected. The single tunable of the matcher.
const DEFAULT_MIN_SCORE_PER_CHAR: i64 = 8;

/// Ranks and filters options against a query.
pub struct FuzzyScorer {
    matcher: SkimMatcherV2,
    min_score_per_char: i64,
}

impl Default for FuzzyScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl FuzzyScorer {
    /// Create a scorer with the default threshold.
    pub fn new() -> Self {
        Self {
            matcher: SkimMatcherV2::default().ignore_case(),
            min_score_per_char: DEFAULT_MIN_SCORE_PER_CHAR,
        }
    }

    /// Override the admission threshold (score per query character).
    pub fn with_min_score_per_char(mut self, min_score_per_char: i64) -> Self {
        self.min_score_per_char = min_score_per_char;
        self
    }

    /// Rank options against the query.
    ///
    /// Returns indices into `options`, best match first; ties keep the
    /// original order. An empty query returns every index in original
    /// order without scoring — the canonical list must not be reordered
    /// when nothing has been typed.
    pub fn rank(&self, query: &str, options: &[DropdownOption]) -> Vec<usize> {
        if query.is_empty() {
            return (0..options.len()).collect();
        }

        let threshold = self.min_score_per_char * query.chars().count() as i64;

        let mut scored: Vec<(usize, i64)> = options
            .iter()
            .enumerate()
            .filter_map(|(idx, option)| {
                self.score(query, option)
                    .filter(|score| *score >= threshold)
                    .map(|score| (idx, score))
            })
            .collect();

        // Stable sort: equal scores keep list order, so ranking is
        // deterministic for a given (query, options) pair.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        scored.into_iter().map(|(idx, _)| idx).collect()
    }

    /// Best score across label and value, or `None` if neither matches.
    fn score(&self, query: &str, option: &DropdownOption) -> Option<i64> {
        let label = self.matcher.fuzzy_match(&option.label, query);
        let value = self.matcher.fuzzy_match(&option.value, query);

        match (label, value) {
            (Some(l), Some(v)) => Some(l.max(v)),
            (Some(l), None) => Some(l),
            (None, Some(v)) => Some(v),
            (None, None) => None,
        }
    }
}
