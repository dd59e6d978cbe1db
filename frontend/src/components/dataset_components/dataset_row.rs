//! One table row of the dataset overview, with its admin actions.

use common::dataset::DatasetAndUsage;
use dioxus::logger::tracing::info;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::{md_action_icons::MdDelete, md_navigation_icons::MdRefresh}};

use crate::{
    api::dataset_api::{clear_dataset, delete_dataset, get_dataset_usage},
    hooks::use_dataset_pages::DatasetPagesState,
};

#[component]
pub fn DatasetRow(dataset: DatasetAndUsage, on_status: Callback<String>) -> Element {
    let pages_state = use_context::<DatasetPagesState>();
    let dataset_id = dataset.id().to_string();

    let delete_id = dataset_id.clone();
    let on_delete = move |_: MouseEvent| {
        let dataset_id = delete_id.clone();
        async move {
            match delete_dataset(dataset_id.clone()).await {
                Ok(()) => {
                    info!("Deleted dataset {}", dataset_id);
                    pages_state.remove_dataset.call(dataset_id);
                }
                Err(e) => on_status.call(format!("Failed to delete dataset: {e}")),
            }
        }
    };

    let clear_id = dataset_id.clone();
    let on_clear = move |_: MouseEvent| {
        let dataset_id = clear_id.clone();
        async move {
            if let Err(e) = clear_dataset(dataset_id).await {
                on_status.call(format!("Failed to clear dataset: {e}"));
            }
        }
    };

    let reload_id = dataset_id.clone();
    let on_reload = move |_: MouseEvent| {
        let dataset_id = reload_id.clone();
        async move {
            match get_dataset_usage(dataset_id).await {
                Ok(usage) => {
                    if let Some(change) = pages_state.apply_usage.call(usage) {
                        on_status.call(format!("Updated: {}", change.summary()));
                    }
                }
                Err(e) => on_status.call(format!("Failed to reload chunk count: {e}")),
            }
        }
    };

    rsx! {
        tr {
            td { style: "padding: 8px 12px; font-weight: 500;", "{dataset.name()}" }
            td {
                style: "padding: 8px 12px; font-family: monospace; color: #4B5563;",
                "{dataset_id}"
            }
            td {
                style: "padding: 8px 12px;",
                "{dataset.chunk_count()}"
                button {
                    title: "Reload chunk count",
                    style: "margin-left: 6px; border: none; background: none; cursor: pointer;",
                    onclick: on_reload,
                    Icon { icon: MdRefresh, style: "width: 16px; height: 16px;" }
                }
            }
            td { style: "padding: 8px 12px; color: #4B5563;", "{dataset.dataset.created_at}" }
            td {
                style: "padding: 8px 12px; display: flex; gap: 8px;",
                button {
                    title: "Clear Dataset - deletes all chunks, groups and files but keeps the dataset",
                    style: "border: 1px solid #D1D5DB; border-radius: 6px; background: white; cursor: pointer;",
                    onclick: on_clear,
                    "Clear"
                }
                button {
                    title: "Delete Dataset",
                    style: "border: none; background: none; cursor: pointer; color: #B91C1C;",
                    onclick: on_delete,
                    Icon { icon: MdDelete, style: "width: 18px; height: 18px;" }
                }
            }
        }
    }
}
