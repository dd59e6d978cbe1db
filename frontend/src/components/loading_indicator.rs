use dioxus::prelude::*;

#[component]
pub fn LoadingIndicator(label: ReadSignal<String>) -> Element {
    rsx! {
        div {
            style: "color: #1D4ED8; font-size: 16px; padding: 10px; margin: 15px;",
            "{label}"
        }
    }
}
