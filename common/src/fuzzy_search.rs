//! Typo tolerant search over the cached dataset list.
//!
//! Each dataset is matched on its name and its id independently; the better
//! of the two scores is kept. Names are scored with the skim subsequence
//! algorithm, and a name that is not a subsequence can still match when some
//! substring of it is within a small edit distance of the query. Typo matches
//! always rank below subsequence matches. Ids are hex UUIDs, where a scattered
//! subsequence of a few hex letters hits almost every id, so an id only
//! matches when it contains the query as a contiguous substring.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::dataset::DatasetAndUsage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum MatchScore {
    // variant order is rank order
    Typo { negated_distance: i64 },
    Subsequence { score: i64 },
}

/// Edits tolerated for a query of `query_len` characters.
fn allowed_typos(query_len: usize) -> usize {
    query_len / 4
}

/// Smallest edit distance between `pattern` and any substring of `text`.
fn approximate_substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    let mut prev: Vec<usize> = (0..=m).collect();
    let mut best = prev[m];
    let mut cur = vec![0; m + 1];
    for &tc in text {
        // a match may start anywhere in the text
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

struct DatasetMatcher {
    skim: SkimMatcherV2,
    query: String,
    query_chars: Vec<char>,
}

impl DatasetMatcher {
    fn new(query: &str) -> Self {
        let query = query.trim().to_lowercase();
        let query_chars = query.chars().collect();
        Self { skim: SkimMatcherV2::default().ignore_case(), query, query_chars }
    }

    fn name_score(&self, field: &str) -> Option<MatchScore> {
        if let Some(score) = self.skim.fuzzy_match(field, &self.query) {
            return Some(MatchScore::Subsequence { score });
        }
        let budget = allowed_typos(self.query_chars.len());
        if budget == 0 {
            return None;
        }
        let field_chars = field.to_lowercase().chars().collect::<Vec<_>>();
        let distance = approximate_substring_distance(&self.query_chars, &field_chars);
        if distance <= budget {
            Some(MatchScore::Typo { negated_distance: -(distance as i64) })
        } else {
            None
        }
    }

    fn id_score(&self, id: &str) -> Option<MatchScore> {
        if !id.to_lowercase().contains(&self.query) {
            return None;
        }
        self.skim.fuzzy_match(id, &self.query).map(|score| MatchScore::Subsequence { score })
    }

    fn score(&self, dataset: &DatasetAndUsage) -> Option<MatchScore> {
        let by_name = self.name_score(dataset.name());
        let by_id = self.id_score(dataset.id());
        by_name.max(by_id)
    }
}

/// Datasets matching `query`, best match first.
///
/// A blank query returns the input unchanged and in order. Equal scores keep
/// their relative input order.
pub fn fuzzy_filter<'a>(datasets: &'a [DatasetAndUsage], query: &str) -> Vec<&'a DatasetAndUsage> {
    if query.trim().is_empty() {
        return datasets.iter().collect();
    }
    let matcher = DatasetMatcher::new(query);
    let mut scored = datasets
        .iter()
        .filter_map(|dataset| matcher.score(dataset).map(|score| (score, dataset)))
        .collect::<Vec<_>>();
    // stable sort: ties stay in cache order
    scored.sort_by(|(a, _), (b, _)| b.cmp(a));
    scored.into_iter().map(|(_score, dataset)| dataset).collect()
}
