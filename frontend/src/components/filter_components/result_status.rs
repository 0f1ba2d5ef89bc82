//! Error, retry and loading states of the listing fetch.

use common::fetch_error::FetchError;
use dioxus::prelude::*;
use dioxus_free_icons::{Icon, icons::md_navigation_icons::MdRefresh};

use crate::{
    components::{error_boundary::ErrorNotice, suspend_boundary::LoadingIndicator},
    data_definitions::catalog_state::ListingFetch,
};

/// Renders nothing once a result is displayed without error.
#[component]
pub fn ResultStatus(fetch: ListingFetch) -> Element {
    let ListingFetch { controller, retry } = fetch;
    let controller = controller.read();

    match controller.error() {
        Some(error @ FetchError::Configuration(_)) => rsx! {
            ErrorNotice { title: "Каталог недоступен", message: error.to_string() }
        },
        Some(error) => rsx! {
            div {
                style: "
                    display: flex;
                    flex-direction: row;
                    align-items: center;
                    gap: 12px;
                    color: darkred;
                    border: 1px solid red;
                    border-radius: 8px;
                    background: white;
                    padding: 10px 14px;
                ",
                span { style: "flex-grow: 1;", "{error}" }
                if controller.can_retry() {
                    button {
                        style: "display: flex; align-items: center; gap: 6px; border: 1px solid blue; color: blue; background: white; border-radius: 5px; padding: 6px 10px; cursor: pointer;",
                        onclick: move |_| retry.call(()),
                        Icon { icon: MdRefresh, style: "width: 18px; height: 18px;" }
                        "Повторить"
                    }
                }
            }
        },
        None if controller.displayed().is_none() => rsx! { LoadingIndicator {} },
        None => rsx! {},
    }
}
