//! Previous / next page controls under the dataset table.

use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::{MdArrowBack, MdArrowForward}};

#[component]
pub fn PaginationArrows(page: ReadSignal<u64>, max_page: ReadSignal<u64>, set_page: Callback<u64>) -> Element {
    let can_go_to_previous_page = use_memo(move || *page.read() > 0);
    let can_go_to_next_page = use_memo(move || *page.read() < *max_page.read());

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                justify-content: flex-end;
                gap: 8px;
                padding: 4px;
                border-top: 1px solid rgba(0,0,0,0.1);
            ",
            NavigationButton {
                icon: MdArrowBack,
                label: "Previous Page",
                disabled: !can_go_to_previous_page(),
                onclick: move |_| {set_page(page().saturating_sub(1));}
            }
            div {
                style: "font-size: 14px;",
                "Page {page() + 1}"
            }
            NavigationButton {
                icon: MdArrowForward,
                label: "Next Page",
                disabled: !can_go_to_next_page(),
                onclick: move |_| {set_page(page() + 1);}
            }
        }
    }
}

#[component]
pub fn NavigationButton<I: dioxus_free_icons::IconShape + Clone + PartialEq + 'static>(icon: I, label: String, disabled: ReadSignal<bool>, onclick: Callback<()>) -> Element {
    let btn_color = use_memo(move || if *disabled.read() { "rgba(0,0,0,0.3)" } else { "rgba(0,0,0,1)" });
    let btn_cursor = use_memo(move || if *disabled.read() { "not-allowed" } else { "pointer" });
    rsx! {
        button {
            title: "{label}",
            disabled: *disabled.read(),
            style: "
                width: 32px;
                height: 32px;
                background: white;
                border-radius: 8px;
                padding: 4px;
                box-shadow: 0 2px 4px 0 rgba(0, 0, 0, 0.16);
                cursor: {btn_cursor};
            ",
            onclick: move |_| {
                if !*disabled.read() {
                    onclick(());
                }
            },
            Icon { icon: icon, style: "width: 22px; height: 22px; color: {btn_color};" }
        }
    }
}
