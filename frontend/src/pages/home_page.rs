use dioxus::prelude::*;

use crate::routes::Route;

/// Organization picker.
#[component]
pub fn HomePage() -> Element {
    let n2 = navigator();
    let mut organization_id = use_signal(|| "".to_string());
    let open_datasets = move || {
        let organization_id = organization_id.read().trim().to_string();
        if !organization_id.is_empty() {
            n2.push(Route::DatasetsPage { organization_id });
        }
    };
    rsx! {
        Title { "Datasets - Home" }
        div {
            id: "x-home-container",
            style: "
                display:flex;
                flex-direction: column;
                gap: 16px;
                width: 100%;
                padding: 36px 40px;
                box-sizing: border-box;
            ",
            div { style: "font-size: 28px; font-weight: 500;", "Select an organization" }
            input {
                r#type: "text",
                placeholder: "Organization id",
                style: "
                    width: 420px;
                    border: 1px solid #D1D5DB;
                    border-radius: 6px;
                    padding: 8px 12px;
                    font-size: 14px;
                ",
                oninput: move |e| {
                    *organization_id.write() = e.value();
                },
                onkeypress: move |e| {
                    if e.key() == Key::Enter {
                        e.prevent_default();
                        open_datasets();
                    }
                },
            }
        }
    }
}
