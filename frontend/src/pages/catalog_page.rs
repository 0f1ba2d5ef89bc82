use dioxus::prelude::*;

use common::{
    fetch_controller::ListView,
    query_state::{QueryPatch, QueryState},
    search_result::AccessLevel,
};
use crate::{
    api::listing_api::fetch_listings,
    components::filter_components::{
        access_banner::AccessBanner,
        filter_panel::{FilterContext, FilterPanel},
        listing_card::ListingCard,
        pagination_controls::PaginationControls,
        result_status::ResultStatus,
    },
    data_definitions::{
        catalog_state::{ListingFetch, use_filter_state, use_listing_fetch},
        session_state::{BANNER_DISMISSAL, SCROLL_RESTORATION, scroll_to},
        url_param::AddressQuery,
    },
    routes::Route,
};

/// Lot list with filters.
#[component]
pub fn CatalogPage(query: AddressQuery) -> Element {
    rsx! {
        Title { "Торги: каталог лотов" }
        CatalogRootComponent { address: query }
    }
}

#[component]
fn CatalogRootComponent(address: ReadSignal<AddressQuery>) -> Element {
    let FilterContext { committed, commit, .. } =
        use_filter_state(address, |query| Route::CatalogPage { query });
    let fetch = use_listing_fetch(committed, fetch_listings);
    let controller = fetch.controller;

    // load first, then scroll
    use_effect(move || {
        let offset = SCROLL_RESTORATION.write().take_when_loaded(ListView::Catalog, controller.read().displayed());
        if let Some(offset) = offset {
            scroll_to(offset);
        }
    });

    let select_page = move |page: u64| {
        commit.call(QueryPatch::page(page));
        scroll_to(0.0);
    };

    rsx! {
        div {
            id: "x-catalog-page-root-component",
            style: "
                display: flex;
                flex-direction: row;
                align-items: flex-start;
                gap: 16px;
                padding: 16px;
                width: 100%;
            ",
            FilterPanel {}
            div {
                id: "x-catalog-results",
                style: "
                    display: flex;
                    flex-direction: column;
                    gap: 12px;
                    flex-grow: 1;
                    min-width: 400px;
                ",
                ResultStatus { fetch }
                CatalogResults { fetch, committed, on_select_page: select_page }
            }
        }
    }
}

#[component]
fn CatalogResults(fetch: ListingFetch, committed: ReadSignal<QueryState>, on_select_page: Callback<u64>) -> Element {
    let controller = fetch.controller.read();
    let (Some(result), Some(gated)) = (controller.displayed(), controller.gated(&BANNER_DISMISSAL.read())) else {
        return rsx! {};
    };
    let dimmed = if controller.is_loading() { "opacity: 0.5;" } else { "" };
    let current_page = result.query.page();
    let last_page = result.total_pages.max(1);

    rsx! {
        if let Some(banner) = gated.banner.clone() {
            AccessBanner {
                banner,
                on_dismiss: move |level: AccessLevel| BANNER_DISMISSAL.write().dismiss(level),
            }
        }
        if controller.page_out_of_range() {
            div {
                style: "background: white; border-radius: 8px; padding: 14px;",
                "Страницы {current_page} нет в результатах. "
                Link {
                    to: Route::catalog_from_state(&committed.read().with_page(last_page)),
                    "Перейти на последнюю страницу ({last_page})"
                }
            }
        } else if gated.items.is_empty() && controller.error().is_none() {
            div {
                style: "background: white; border-radius: 8px; padding: 14px; color: rgb(75, 87, 112);",
                "По вашему запросу лотов не найдено."
            }
        }
        div {
            class: "x-lot-grid",
            style: "{dimmed}",
            for listing in gated.items.iter().cloned() {
                ListingCard { key: "{listing.id}", listing, list_state: committed }
            }
        }
        PaginationControls {
            current: current_page,
            total_pages: result.total_pages,
            on_select: on_select_page,
        }
    }
}
