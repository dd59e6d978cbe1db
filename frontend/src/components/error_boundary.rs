//! Error boundary component for rendering failures.

use dioxus::prelude::*;

#[component]
pub fn GlobalErrorBoundary(boundary_name: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        ErrorBoundary {
            handle_error: move |err: ErrorContext| {
                rsx! {
                    h1 {
                        style: "color:red; font-size: 40px; padding: 10px; margin: 15px;",
                        "Something went wrong in {boundary_name}",
                    }
                    a {
                        href: "/",
                        style: "color:blue; font-size: 20px; margin: 15px;",
                        "Back to organization selection"
                    }
                    pre {
                        style: "color:black; border: 1px solid red; padding: 10px; border-radius: 5px; margin: 15px; text-wrap: auto;",
                        "{err:#?}"
                    }
                }
            },
            children
        }
    }
}

/// Inline error box, with optional actions as children.
#[component]
pub fn ComponentErrorDisplay(error_txt: ReadSignal<String>, children: Element) -> Element {
    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                align-items: center;
                gap: 12px;
                color: darkred;
                border: 1px solid red;
                border-radius: 5px;
                padding: 8px 12px;
                margin: 8px 0;
            ",
            span { "{error_txt}" }
            {children}
        }
    }
}
