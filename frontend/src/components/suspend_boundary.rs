//! Suspense wrapper with a loading placeholder.

use dioxus::prelude::*;

#[component]
pub fn SuspendWrapper(children: Element) -> Element {
    rsx! {
        SuspenseBoundary {
            // shown while a child resource is pending
            fallback: |_s: SuspenseContext| rsx! {
                div {
                    width: "100%",
                    height: "100%",
                    display: "flex",
                    align_items: "center",
                    justify_content: "center",
                    LoadingIndicator {}
                }
            },
            {children}
        }
    }
}

#[component]
pub fn LoadingIndicator() -> Element {
    rsx! {
        div {
            style: "color:black; font-size: 26px; border: 1px solid black; padding: 10px; border-radius: 5px; margin: 15px;",
            "Загрузка..."
        }
    }
}