//! Async owner of the dataset cache of the active organization.

use std::sync::{Mutex, MutexGuard, PoisonError};

use anyhow::Context;
use common::dataset::DatasetUsageChange;
use common::dataset_pages::DatasetPages;
use common::dataset_view::DatasetView;
use tracing::{debug, info};

use crate::api::dataset_actions::DatasetAdmin;
use crate::api::list_datasets::{DatasetSource, fetch_all_organization_datasets};

/// Bulk-fetches an organization's datasets and serves local pages of them.
///
/// Switching organization starts a new fetch; a fetch that completes after a
/// newer one was started is dropped instead of overwriting the cache.
pub struct DatasetPager<S> {
    source: S,
    pages: Mutex<DatasetPages>,
}

impl<S> DatasetPager<S> {
    pub fn new(source: S) -> Self {
        Self::from_pages(source, DatasetPages::new())
    }

    pub fn with_page_size(source: S, page_size: u64) -> Self {
        Self::from_pages(source, DatasetPages::with_page_size(page_size))
    }

    fn from_pages(source: S, pages: DatasetPages) -> Self {
        Self { source, pages: Mutex::new(pages) }
    }

    // the state is a plain value, a panic elsewhere cannot leave it half written
    fn pages(&self) -> MutexGuard<'_, DatasetPages> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn get_view(&self, page: u64, query: &str) -> DatasetView {
        self.pages().view(page, query)
    }

    /// Drops a dataset from the cache without refetching. Unknown ids are ignored.
    pub fn invalidate(&self, dataset_id: &str) -> bool {
        self.pages().remove_dataset(dataset_id)
    }

    pub fn has_loaded(&self) -> bool {
        self.pages().has_loaded()
    }

    pub fn active_organization(&self) -> Option<String> {
        self.pages().active_organization().map(str::to_string)
    }

    pub fn max_datasets(&self) -> u64 {
        self.pages().max_datasets()
    }

    pub fn max_page_discovered(&self) -> u64 {
        self.pages().max_page_discovered()
    }
}

impl<S: DatasetSource> DatasetPager<S> {
    /// Switches to `organization_id` and fetches its datasets.
    ///
    /// `None` or a blank id leaves everything as it is. Returns whether this
    /// fetch ended up in the cache.
    pub async fn set_organization(&self, organization_id: Option<&str>) -> bool {
        let Some(organization_id) = organization_id.filter(|id| !id.trim().is_empty()) else {
            debug!("set_organization: no organization, nothing to fetch");
            return false;
        };
        self.fetch(organization_id).await
    }

    /// Fetches the active organization again.
    pub async fn refetch(&self) -> bool {
        let Some(organization_id) = self.active_organization() else {
            return false;
        };
        self.fetch(&organization_id).await
    }

    async fn fetch(&self, organization_id: &str) -> bool {
        let ticket = self.pages().begin_fetch(organization_id);
        let outcome = fetch_all_organization_datasets(&self.source, &ticket.organization_id).await;
        let committed = self.pages().complete_fetch(&ticket, outcome);
        if !committed {
            info!("Discarding stale dataset fetch for organization {}", ticket.organization_id);
        }
        committed
    }
}

impl<S: DatasetAdmin> DatasetPager<S> {
    /// Deletes upstream, then drops the dataset from the cache.
    ///
    /// On failure the cache is left alone and the upstream message is returned.
    pub async fn delete_dataset(&self, dataset_id: &str) -> anyhow::Result<()> {
        self.source
            .delete_dataset(dataset_id)
            .await
            .with_context(|| format!("Failed to delete dataset {}", dataset_id))?;
        self.invalidate(dataset_id);
        Ok(())
    }

    pub async fn clear_dataset(&self, dataset_id: &str) -> anyhow::Result<()> {
        self.source
            .clear_dataset(dataset_id)
            .await
            .with_context(|| format!("Failed to clear dataset {}", dataset_id))
    }

    /// Re-reads the usage counters of one dataset and reports the chunk count delta.
    pub async fn reload_chunk_count(&self, dataset_id: &str) -> anyhow::Result<DatasetUsageChange> {
        let organization_id = self.active_organization();
        let usage = self.source.get_dataset_usage(dataset_id).await?;
        let mut pages = self.pages();
        if pages.active_organization() != organization_id.as_deref() {
            anyhow::bail!("Organization changed while reloading usage of dataset {}", dataset_id);
        }
        pages
            .apply_usage(usage)
            .with_context(|| format!("Dataset {} is not loaded", dataset_id))
    }
}
