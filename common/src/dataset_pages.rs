//! In-memory dataset cache for one organization, with local pagination.
//!
//! The cache is filled by a bulk fetch that happens elsewhere (see the
//! backend `DatasetPager` and the frontend `use_dataset_pages` hook). Each
//! fetch is started with [`DatasetPages::begin_fetch`] and handed back with
//! [`DatasetPages::complete_fetch`]; only the most recently started fetch may
//! replace the cache, so a slow response for a previous organization can
//! never overwrite the current one.
//!
//! Derived values (`max_datasets`, `max_page_discovered`, views) are never
//! stored, they are computed from the cache on every read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dataset::{DatasetAndUsage, DatasetUsageChange, DatasetUsageCount};
use crate::dataset_const::PAGE_SIZE;
use crate::dataset_fetch::DatasetFetchOutcome;
use crate::dataset_view::DatasetView;
use crate::fuzzy_search::fuzzy_filter;

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchTicket {
    pub organization_id: String,
    generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetPages {
    page_size: u64,
    datasets: Vec<DatasetAndUsage>,
    active_organization: Option<String>,
    generation: u64,
    has_loaded: bool,
    fetch_error: Option<String>,
    usage_overrides: BTreeMap<String, DatasetUsageCount>,
}

impl Default for DatasetPages {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetPages {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    /// `page_size` of 0 is bumped to 1.
    pub fn with_page_size(page_size: u64) -> Self {
        Self {
            page_size: page_size.max(1),
            datasets: vec![],
            active_organization: None,
            generation: 0,
            has_loaded: false,
            fetch_error: None,
            usage_overrides: BTreeMap::new(),
        }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn active_organization(&self) -> Option<&str> {
        self.active_organization.as_deref()
    }

    pub fn datasets(&self) -> &[DatasetAndUsage] {
        &self.datasets
    }

    pub fn has_loaded(&self) -> bool {
        self.has_loaded
    }

    pub fn fetch_error(&self) -> Option<&str> {
        self.fetch_error.as_deref()
    }

    /// Marks `organization_id` as active and invalidates every earlier ticket.
    ///
    /// `has_loaded` drops to false here and only comes back once the returned
    /// ticket completes.
    pub fn begin_fetch(&mut self, organization_id: impl Into<String>) -> FetchTicket {
        let organization_id = organization_id.into();
        self.generation += 1;
        self.has_loaded = false;
        if self.active_organization.as_deref() != Some(organization_id.as_str()) {
            self.usage_overrides.clear();
        }
        self.active_organization = Some(organization_id.clone());
        FetchTicket { organization_id, generation: self.generation }
    }

    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        ticket.generation == self.generation
            && self.active_organization.as_deref() == Some(ticket.organization_id.as_str())
    }

    /// Replaces the cache with `outcome` if `ticket` is still current.
    ///
    /// Reloaded usage is dropped as well, the fresh listing supersedes it.
    /// Returns false, leaving everything untouched, for stale tickets.
    pub fn complete_fetch(&mut self, ticket: &FetchTicket, outcome: DatasetFetchOutcome) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.usage_overrides.clear();
        self.datasets = outcome.datasets;
        self.fetch_error = outcome.batch_failure;
        self.has_loaded = true;
        true
    }

    /// Drops `dataset_id` from the cache. Returns whether anything was removed.
    pub fn remove_dataset(&mut self, dataset_id: &str) -> bool {
        let before = self.datasets.len();
        self.datasets.retain(|dataset| dataset.id() != dataset_id);
        self.usage_overrides.remove(dataset_id);
        self.datasets.len() != before
    }

    pub fn max_datasets(&self) -> u64 {
        self.datasets.len() as u64
    }

    /// Highest page index worth offering, over the unfiltered cache.
    pub fn max_page_discovered(&self) -> u64 {
        self.max_datasets() / self.page_size
    }

    /// Chunk count of `dataset_id`, preferring a reloaded value over the fetched one.
    pub fn chunk_count(&self, dataset_id: &str) -> Option<i64> {
        if let Some(usage) = self.usage_overrides.get(dataset_id) {
            return Some(usage.chunk_count);
        }
        self.datasets.iter().find(|dataset| dataset.id() == dataset_id).map(|dataset| dataset.chunk_count())
    }

    /// Records freshly fetched usage and reports how it moved.
    ///
    /// Usage for a dataset no longer in the cache is ignored and `None` is returned.
    pub fn apply_usage(&mut self, usage: DatasetUsageCount) -> Option<DatasetUsageChange> {
        let previous_chunk_count = self.chunk_count(&usage.dataset_id)?;
        let change = DatasetUsageChange {
            dataset_id: usage.dataset_id.clone(),
            previous_chunk_count,
            current_chunk_count: usage.chunk_count,
        };
        self.usage_overrides.insert(usage.dataset_id.clone(), usage);
        Some(change)
    }

    /// Datasets matching `query`, best first; the full cache when `query` is blank.
    pub fn filtered(&self, query: &str) -> Vec<&DatasetAndUsage> {
        fuzzy_filter(&self.datasets, query)
    }

    /// One page of the filtered cache.
    ///
    /// `max_page` and `total_count` ignore `query`: they describe the whole
    /// cache, so a narrow search can show fewer rows than the page count implies.
    pub fn view(&self, page: u64, query: &str) -> DatasetView {
        let start = page.saturating_mul(self.page_size);
        let items = self
            .filtered(query)
            .into_iter()
            .skip(usize::try_from(start).unwrap_or(usize::MAX))
            .take(self.page_size as usize)
            .map(|dataset| self.with_usage_override(dataset))
            .collect();
        DatasetView {
            items,
            page,
            max_page: self.max_page_discovered(),
            total_count: self.max_datasets(),
            has_loaded: self.has_loaded,
            fetch_error: self.fetch_error.clone(),
        }
    }

    fn with_usage_override(&self, dataset: &DatasetAndUsage) -> DatasetAndUsage {
        let mut dataset = dataset.clone();
        if let Some(usage) = self.usage_overrides.get(dataset.id()) {
            dataset.dataset_usage = usage.clone();
        }
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy_search::tests::dataset;

    fn numbered(count: usize) -> Vec<DatasetAndUsage> {
        (0..count).map(|i| dataset(&format!("{i:08}"), &format!("dataset {i}"))).collect()
    }

    fn loaded(organization_id: &str, datasets: Vec<DatasetAndUsage>) -> DatasetPages {
        let mut pages = DatasetPages::new();
        let ticket = pages.begin_fetch(organization_id);
        assert!(pages.complete_fetch(&ticket, DatasetFetchOutcome { datasets, requests_sent: 1, batch_failure: None }));
        pages
    }

    fn outcome(datasets: Vec<DatasetAndUsage>) -> DatasetFetchOutcome {
        DatasetFetchOutcome { datasets, requests_sent: 1, batch_failure: None }
    }

    #[test]
    fn starts_empty_and_not_loaded() {
        let pages = DatasetPages::new();
        let view = pages.view(0, "");
        assert!(view.items.is_empty());
        assert!(!view.has_loaded);
        assert_eq!(view.max_page, 0);
        assert_eq!(pages.active_organization(), None);
    }

    #[test]
    fn has_loaded_flips_false_then_true() {
        let mut pages = loaded("org-a", numbered(3));
        assert!(pages.has_loaded());
        let ticket = pages.begin_fetch("org-a");
        assert!(!pages.has_loaded());
        pages.complete_fetch(&ticket, outcome(numbered(4)));
        assert!(pages.has_loaded());
        assert_eq!(pages.max_datasets(), 4);
    }

    #[test]
    fn pages_are_sliced_in_cache_order() {
        let pages = loaded("org", numbered(45));
        let first = pages.view(0, "");
        assert_eq!(first.items.len(), 20);
        assert_eq!(first.items[0].id(), "00000000");
        let last = pages.view(2, "");
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].id(), "00000040");
        assert!(pages.view(3, "").items.is_empty());
        assert!(pages.view(u64::MAX, "").items.is_empty());
    }

    #[test]
    fn max_page_ignores_the_search_query() {
        let pages = loaded("org", numbered(45));
        assert_eq!(pages.max_page_discovered(), 2);
        for query in ["", "dataset 4", "nothing matches this at all"] {
            let view = pages.view(0, query);
            assert_eq!(view.max_page, 2);
            assert_eq!(view.total_count, 45);
        }
    }

    #[test]
    fn filter_applies_before_slicing() {
        let pages = loaded("org", vec![dataset("1", "xyz"), dataset("2", "abcdef")]);
        for page_size in [1, 2, 20] {
            let mut pages = pages.clone();
            pages.page_size = page_size;
            let view = pages.view(0, "abc");
            assert_eq!(view.items.len(), 1);
            assert_eq!(view.items[0].name(), "abcdef");
        }
    }

    #[test]
    fn remove_shrinks_total_and_ignores_unknown_ids() {
        let mut pages = loaded("org", numbered(21));
        assert_eq!(pages.max_page_discovered(), 1);
        assert!(pages.remove_dataset("00000003"));
        assert_eq!(pages.view(0, "").total_count, 20);
        assert_eq!(pages.max_page_discovered(), 1);
        assert!(pages.remove_dataset("00000004"));
        assert_eq!(pages.max_page_discovered(), 0);
        assert!(!pages.remove_dataset("missing"));
        assert_eq!(pages.max_datasets(), 19);
    }

    #[test]
    fn stale_ticket_is_discarded() {
        let mut pages = DatasetPages::new();
        let ticket_a = pages.begin_fetch("org-a");
        let ticket_b = pages.begin_fetch("org-b");
        assert!(pages.complete_fetch(&ticket_b, outcome(vec![dataset("b1", "from b")])));
        assert!(!pages.complete_fetch(&ticket_a, outcome(vec![dataset("a1", "from a")])));
        assert_eq!(pages.datasets().len(), 1);
        assert_eq!(pages.datasets()[0].id(), "b1");
        assert_eq!(pages.active_organization(), Some("org-b"));
    }

    #[test]
    fn stale_ticket_for_same_organization_is_discarded() {
        let mut pages = DatasetPages::new();
        let first = pages.begin_fetch("org");
        let second = pages.begin_fetch("org");
        assert!(!pages.complete_fetch(&first, outcome(numbered(1))));
        assert!(!pages.has_loaded());
        assert!(pages.complete_fetch(&second, outcome(numbered(2))));
        assert_eq!(pages.max_datasets(), 2);
    }

    #[test]
    fn partial_fetch_keeps_rows_and_reports_failure() {
        let mut pages = DatasetPages::new();
        let ticket = pages.begin_fetch("org");
        pages.complete_fetch(
            &ticket,
            DatasetFetchOutcome { datasets: numbered(5), requests_sent: 2, batch_failure: Some("502 Bad Gateway".to_string()) },
        );
        let view = pages.view(0, "");
        assert!(view.has_loaded);
        assert_eq!(view.items.len(), 5);
        assert_eq!(view.fetch_error.as_deref(), Some("502 Bad Gateway"));
    }

    #[test]
    fn view_is_a_pure_function_of_state() {
        let pages = loaded("org", numbered(30));
        assert_eq!(pages.view(1, "dataset 1"), pages.view(1, "dataset 1"));
        assert_eq!(pages.view(0, ""), pages.view(0, ""));
    }

    #[test]
    fn usage_overrides_show_in_views_and_reset_on_organization_change() {
        let mut pages = loaded("org-a", numbered(2));
        let change = pages
            .apply_usage(DatasetUsageCount { id: "u".to_string(), dataset_id: "00000001".to_string(), chunk_count: 7 })
            .unwrap();
        assert_eq!(change.difference(), 7);
        assert_eq!(pages.view(0, "").items[1].chunk_count(), 7);
        assert_eq!(pages.datasets()[1].chunk_count(), 0);

        let again = pages
            .apply_usage(DatasetUsageCount { id: "u".to_string(), dataset_id: "00000001".to_string(), chunk_count: 5 })
            .unwrap();
        assert_eq!(again.previous_chunk_count, 7);
        assert_eq!(again.difference(), -2);

        pages.begin_fetch("org-b");
        assert_eq!(pages.chunk_count("00000001"), Some(0));
    }

    #[test]
    fn refetch_of_same_organization_shows_fresh_usage() {
        let mut pages = loaded("org", numbered(2));
        pages.apply_usage(DatasetUsageCount { id: "u".to_string(), dataset_id: "00000001".to_string(), chunk_count: 7 });

        let ticket = pages.begin_fetch("org");
        let mut fresh = numbered(2);
        fresh[1].dataset_usage.chunk_count = 50;
        assert!(pages.complete_fetch(&ticket, outcome(fresh)));

        assert_eq!(pages.view(0, "").items[1].chunk_count(), 50);
        assert_eq!(pages.chunk_count("00000001"), Some(50));
    }

    #[test]
    fn stale_fetch_keeps_reloaded_usage() {
        let mut pages = loaded("org", numbered(2));
        let stale = pages.begin_fetch("org");
        let current = pages.begin_fetch("org");
        assert!(pages.complete_fetch(&current, outcome(numbered(2))));
        pages.apply_usage(DatasetUsageCount { id: "u".to_string(), dataset_id: "00000001".to_string(), chunk_count: 7 });

        assert!(!pages.complete_fetch(&stale, outcome(numbered(2))));
        assert_eq!(pages.chunk_count("00000001"), Some(7));
    }

    #[test]
    fn usage_for_unknown_dataset_is_ignored() {
        let mut pages = loaded("org", numbered(1));
        let usage = DatasetUsageCount { id: "u".to_string(), dataset_id: "nope".to_string(), chunk_count: 1 };
        assert_eq!(pages.apply_usage(usage), None);
    }
}
