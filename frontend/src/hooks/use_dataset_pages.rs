//! Reactive wrapper around the organization dataset cache.

use common::{
    dataset::{DatasetUsageChange, DatasetUsageCount},
    dataset_fetch::DatasetFetchOutcome,
    dataset_pages::DatasetPages,
    dataset_view::DatasetView,
};
use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use crate::api::dataset_api::list_organization_datasets;

#[derive(Copy, Clone, PartialEq)]
pub struct DatasetPagesState {
    pub view: Memo<DatasetView>,
    pub remove_dataset: Callback<String>,
    pub apply_usage: Callback<DatasetUsageCount, Option<DatasetUsageChange>>,
    pub refetch: Callback<()>,
}

/// Loads every dataset of `organization_id` once per organization change and
/// derives the visible page from `search_query` and `page` locally.
pub fn use_dataset_pages(
    organization_id: ReadSignal<Option<String>>,
    search_query: ReadSignal<String>,
    page: ReadSignal<u64>,
) -> DatasetPagesState {
    let mut pages = use_signal(DatasetPages::new);
    let mut refetch_requests = use_signal(|| 0_u64);

    // runs again when the organization changes or a refetch is requested
    use_effect(move || {
        let _ = refetch_requests.read();
        let Some(organization_id) = organization_id.read().clone().filter(|id| !id.trim().is_empty()) else {
            return;
        };
        let ticket = pages.write().begin_fetch(organization_id);
        spawn(async move {
            let outcome = match list_organization_datasets(ticket.organization_id.clone()).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("use_dataset_pages: fetch failed for {}: {}", ticket.organization_id, e);
                    DatasetFetchOutcome::failed(e.to_string())
                }
            };
            if !pages.write().complete_fetch(&ticket, outcome) {
                info!("use_dataset_pages: dropping stale fetch for {}", ticket.organization_id);
            }
        });
    });

    let view = use_memo(move || pages.read().view(*page.read(), &search_query.read()));

    let remove_dataset = Callback::new(move |dataset_id: String| {
        pages.write().remove_dataset(&dataset_id);
    });
    let apply_usage = Callback::new(move |usage: DatasetUsageCount| pages.write().apply_usage(usage));
    let refetch = Callback::new(move |_: ()| {
        *refetch_requests.write() += 1;
    });

    DatasetPagesState { view, remove_dataset, apply_usage, refetch }
}
