use dioxus::prelude::*;

use common::{
    fetch_controller::ListView,
    price_format::group_digits,
    query_state::QueryState,
    search_result::{AccessLevel, Coordinates, ListingSummary},
};
use crate::{
    api::listing_api::fetch_map_listings,
    components::filter_components::{
        access_banner::AccessBanner,
        filter_panel::{FilterContext, FilterPanel},
        result_status::ResultStatus,
    },
    data_definitions::{
        catalog_state::{ListingFetch, use_filter_state, use_listing_fetch},
        session_state::{BANNER_DISMISSAL, SCROLL_RESTORATION, remember_list_position, scroll_to},
        url_param::AddressQuery,
    },
    routes::Route,
};

/// Lots with coordinates, placed on a plain longitude/latitude plane.
#[component]
pub fn MapPage(query: AddressQuery) -> Element {
    rsx! {
        Title { "Торги: лоты на карте" }
        MapRootComponent { address: query }
    }
}

#[component]
fn MapRootComponent(address: ReadSignal<AddressQuery>) -> Element {
    let FilterContext { committed, .. } = use_filter_state(address, |query| Route::MapPage { query });
    let fetch = use_listing_fetch(committed, fetch_map_listings);
    let controller = fetch.controller;

    use_effect(move || {
        let offset = SCROLL_RESTORATION.write().take_when_loaded(ListView::Map, controller.read().displayed());
        if let Some(offset) = offset {
            scroll_to(offset);
        }
    });

    rsx! {
        div {
            id: "x-map-page-root-component",
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
                style: "display: flex; flex-direction: column; gap: 12px; flex-grow: 1; min-width: 400px;",
                Link {
                    to: Route::catalog_from_state(&committed.read()),
                    "Показать списком"
                }
                ResultStatus { fetch }
                MapResults { fetch, committed }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bounds {
    min: Coordinates,
    max: Coordinates,
}

impl Bounds {
    fn around(points: impl Iterator<Item = Coordinates>) -> Option<Bounds> {
        points.fold(None, |bounds: Option<Bounds>, p| {
            let Some(b) = bounds else {
                return Some(Bounds { min: p, max: p });
            };
            Some(Bounds {
                min: Coordinates { latitude: b.min.latitude.min(p.latitude), longitude: b.min.longitude.min(p.longitude) },
                max: Coordinates { latitude: b.max.latitude.max(p.latitude), longitude: b.max.longitude.max(p.longitude) },
            })
        })
    }

    /// Percent offsets from the left and top edge.
    fn place(&self, p: Coordinates) -> (f64, f64) {
        let span = |lo: f64, hi: f64, v: f64| if hi > lo { (v - lo) / (hi - lo) } else { 0.5 };
        let x = span(self.min.longitude, self.max.longitude, p.longitude);
        let y = 1.0 - span(self.min.latitude, self.max.latitude, p.latitude);
        (4.0 + x * 92.0, 4.0 + y * 92.0)
    }
}

#[component]
fn MapResults(fetch: ListingFetch, committed: ReadSignal<QueryState>) -> Element {
    let controller = fetch.controller.read();
    let Some(gated) = controller.gated(&BANNER_DISMISSAL.read()) else {
        return rsx! {};
    };
    let placed: Vec<(ListingSummary, Coordinates)> = gated
        .items
        .iter()
        .filter_map(|listing| listing.coordinates.map(|c| (listing.clone(), c)))
        .collect();
    let bounds = Bounds::around(placed.iter().map(|(_, c)| *c));

    rsx! {
        if let Some(banner) = gated.banner.clone() {
            AccessBanner {
                banner,
                on_dismiss: move |level: AccessLevel| BANNER_DISMISSAL.write().dismiss(level),
            }
        }
        div {
            id: "x-map-plane",
            style: "
                position: relative;
                width: 100%;
                height: 560px;
                background-color: #DDE8F0;
                border: 1px solid rgba(0,0,0,0.1);
                border-radius: 8px;
                overflow: hidden;
            ",
            if let Some(bounds) = bounds {
                for (listing, coordinates) in placed {
                    MapMarker { key: "{listing.id}", listing, position: bounds.place(coordinates), list_state: committed }
                }
            } else {
                div {
                    style: "padding: 14px; color: rgb(75, 87, 112);",
                    "Нет лотов с координатами."
                }
            }
        }
    }
}

#[component]
fn MapMarker(listing: ReadSignal<ListingSummary>, position: (f64, f64), list_state: ReadSignal<QueryState>) -> Element {
    let (left, top) = position;
    let ListingSummary { id, title, start_price, .. } = listing.read().clone();
    let label = match start_price {
        Some(price) => format!("{title}: {} ₽", group_digits(price)),
        None => title,
    };
    rsx! {
        div {
            title: "{label}",
            style: "position: absolute; left: {left}%; top: {top}%; transform: translate(-50%, -50%);",
            onmousedown: move |_| remember_list_position(ListView::Map, &list_state.read()),
            Link {
                to: Route::LotPage { lot_id: id },
                div {
                    style: "
                        width: 14px;
                        height: 14px;
                        border-radius: 50%;
                        background-color: #367ED8;
                        border: 2px solid white;
                        box-shadow: 0 0 4px rgba(0,0,0,0.4);
                    ",
                }
            }
        }
    }
}
