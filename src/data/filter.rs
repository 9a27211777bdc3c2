use std::collections::BTreeSet;

use super::model::{Category, Dataset, Record};

// ---------------------------------------------------------------------------
// Filter predicate: selected regime types and a score window
// ---------------------------------------------------------------------------

/// Selection state behind the multiselect and the score slider.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    /// Regime types to keep. Empty means nothing passes.
    pub categories: BTreeSet<Category>,
    /// Inclusive lower bound on the score.
    pub score_min: f64,
    /// Inclusive upper bound on the score.
    pub score_max: f64,
}

impl FilterState {
    pub fn new(categories: BTreeSet<Category>, score_min: f64, score_max: f64) -> Self {
        FilterState {
            categories,
            score_min,
            score_max,
        }
    }

    /// Initialise a [`FilterState`] with everything selected (i.e., show every row).
    pub fn all(dataset: &Dataset) -> Self {
        let (lo, hi) = dataset.score_extent().unwrap_or((0.0, 10.0));
        FilterState::new(dataset.categories(), lo, hi)
    }

    pub fn matches(&self, record: &Record) -> bool {
        self.categories.contains(&record.category())
            && record.score() >= self.score_min
            && record.score() <= self.score_max
    }
}

/// Return indices of records that pass the filter, in table order.
pub fn filtered_indices(dataset: &Dataset, filter: &FilterState) -> Vec<usize> {
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Sub-table of the records that pass the filter. An empty result is not an
/// error.
pub fn filter(dataset: &Dataset, filter: &FilterState) -> Dataset {
    dataset.subset(&filtered_indices(dataset, filter))
}

/// Indices of records whose name contains `needle`, ignoring case.
pub fn search_indices(dataset: &Dataset, needle: &str) -> Vec<usize> {
    let needle = needle.to_lowercase();
    dataset
        .records()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.name().to_lowercase().contains(&needle))
        .map(|(i, _)| i)
        .collect()
}

/// Case-insensitive substring search on the country name.
pub fn search_by_name(dataset: &Dataset, needle: &str) -> Dataset {
    dataset.subset(&search_indices(dataset, needle))
}
