//! Searchable, paginated table of an organization's datasets.

use common::dataset_const::PAGE_SIZE;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_action_icons::MdSearch};

use crate::{
    components::{
        dataset_components::{dataset_row::DatasetRow, pagination_arrows::PaginationArrows},
        error_boundary::ComponentErrorDisplay,
        loading_indicator::LoadingIndicator,
    },
    hooks::use_dataset_pages::use_dataset_pages,
};

#[component]
pub fn DatasetOverview(organization_id: ReadSignal<Option<String>>) -> Element {
    let mut page = use_signal(|| 0_u64);
    let mut search_query = use_signal(String::new);
    let mut status_message = use_signal(|| None::<String>);

    let pages_state = use_dataset_pages(organization_id, search_query.into(), page.into());
    use_context_provider(move || pages_state);

    // a different organization starts over on the first page
    use_effect(move || {
        let _ = organization_id.read();
        page.set(0);
        status_message.set(None);
    });

    let view = pages_state.view;
    let set_page = Callback::new(move |p: u64| page.set(p));
    let on_status = Callback::new(move |message: String| status_message.set(Some(message)));

    let subtitle = use_memo(move || {
        let view = view.read();
        if !view.items.is_empty() {
            "A list of all the datasets".to_string()
        } else if view.total_count == 0 {
            "This organization has no datasets yet".to_string()
        } else if view.has_loaded {
            "No datasets match your search query.".to_string()
        } else {
            "Loading datasets... Please wait and try again when finished.".to_string()
        }
    });

    rsx! {
        div {
            id: "x-dataset-overview",
            style: "
                display: flex;
                flex-direction: column;
                gap: 12px;
                width: 100%;
                padding: 24px;
                box-sizing: border-box;
            ",
            div {
                style: "display: flex; flex-direction: row; align-items: flex-end; justify-content: space-between;",
                div {
                    h1 { style: "font-size: 18px; font-weight: 600; margin: 0;", "Datasets" }
                    p { style: "font-size: 14px; color: #404040; margin: 4px 0 0 0;", "{subtitle}" }
                }
                div {
                    style: "
                        display: flex;
                        align-items: center;
                        gap: 6px;
                        border: 1px solid #D4D4D4;
                        border-radius: 4px;
                        padding: 4px 8px;
                        background: white;
                    ",
                    Icon { icon: MdSearch, style: "width: 18px; height: 18px; color: #6B7280;" }
                    input {
                        r#type: "text",
                        placeholder: "Search datasets...",
                        style: "border: none; outline: none; font-size: 14px;",
                        value: "{search_query}",
                        oninput: move |e: Event<FormData>| {
                            page.set(0);
                            search_query.set(e.value());
                        },
                    }
                }
            }

            if let Some(message) = status_message() {
                ComponentErrorDisplay {
                    error_txt: message,
                    button {
                        style: "border: none; background: none; cursor: pointer;",
                        onclick: move |_| status_message.set(None),
                        "Dismiss"
                    }
                }
            }
            if let Some(fetch_error) = view.read().fetch_error.clone() {
                ComponentErrorDisplay {
                    error_txt: format!("Some datasets could not be loaded: {fetch_error}"),
                    button {
                        style: "border: none; background: none; cursor: pointer;",
                        onclick: move |_| pages_state.refetch.call(()),
                        "Retry"
                    }
                }
            }

            if !view.read().has_loaded {
                LoadingIndicator { label: "Loading datasets...".to_string() }
            } else if view.read().total_count > 0 {
                table {
                    style: "width: 100%; border-collapse: collapse; font-size: 14px;",
                    thead {
                        style: "background: #F5F5F5; text-align: left;",
                        tr {
                            th { style: "padding: 8px 12px;", "Name" }
                            th { style: "padding: 8px 12px;", "ID" }
                            th { style: "padding: 8px 12px;", "Chunks" }
                            th { style: "padding: 8px 12px;", "Created" }
                            th { style: "padding: 8px 12px;", "Actions" }
                        }
                    }
                    tbody {
                        for dataset in view.read().items.iter().cloned() {
                            DatasetRow {
                                key: "{dataset.dataset.id}",
                                dataset,
                                on_status,
                            }
                        }
                    }
                }
                if view.read().total_count > PAGE_SIZE {
                    PaginationArrows {
                        page: view.read().page,
                        max_page: view.read().max_page,
                        set_page,
                    }
                }
            }
        }
    }
}
