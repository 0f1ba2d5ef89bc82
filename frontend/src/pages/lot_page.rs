use dioxus::prelude::*;

use common::{fetch_controller::ListView, price_format::group_digits};
use crate::{
    api::listing_api::fetch_lot,
    components::{error_boundary::ErrorNotice, suspend_boundary::SuspendWrapper},
    data_definitions::{session_state::SCROLL_RESTORATION, url_param::AddressQuery},
    routes::Route,
};

/// Lot detail page
#[component]
pub fn LotPage(lot_id: String) -> Element {
    rsx! {
        Title { "Торги: лот {lot_id}" }
        div {
            id: "x-lot-page-root-component",
            style: "
                display: flex;
                flex-direction: column;
                gap: 16px;
                padding: 16px;
                max-width: 960px;
            ",
            BackToResults {}
            SuspendWrapper { LotDetails { lot_id: lot_id.clone() } }
        }
    }
}

/// Returns to the list the lot was opened from, or to the unfiltered list.
#[component]
fn BackToResults() -> Element {
    let target = match SCROLL_RESTORATION.read().back_target() {
        Some((ListView::Map, address)) => Route::MapPage { query: AddressQuery(address.to_string()) },
        Some((ListView::Catalog, address)) => Route::CatalogPage { query: AddressQuery(address.to_string()) },
        None => Route::CatalogPage { query: AddressQuery::default() },
    };
    rsx! {
        Link { to: target, "← Вернуться к списку лотов" }
    }
}

#[component]
fn LotDetails(lot_id: ReadSignal<String>) -> Element {
    let lot = use_resource(move || fetch_lot(lot_id.read().clone())).suspend()?.cloned();
    let lot = match lot {
        Err(e) => return rsx! { ErrorNotice { title: "Лот не открылся", message: e.to_string() } },
        Ok(lot) => lot,
    };
    let price = lot.start_price.map(|p| format!("{} ₽", group_digits(p))).unwrap_or_else(|| "Цена не указана".to_string());

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: row;
                flex-wrap: wrap;
                gap: 24px;
                background: white;
                border-radius: 8px;
                padding: 20px;
            ",
            if let Some(src) = lot.image_url.clone() {
                img {
                    src: "{src}",
                    alt: "{lot.title}",
                    style: "width: 420px; max-width: 100%; border-radius: 6px; object-fit: cover;",
                }
            }
            div {
                style: "display: flex; flex-direction: column; gap: 12px; flex: 1; min-width: 280px;",
                h1 { style: "font-size: 24px; font-weight: 500; margin: 0;", "{lot.title}" }
                span { style: "font-size: 22px; font-weight: 600;", "{price}" }
                if let Some(bidding_type) = lot.bidding_type.clone() {
                    span { style: "color: rgb(75, 87, 112);", "Тип торгов: {bidding_type}" }
                }
                for category in lot.categories.iter().cloned() {
                    span { key: "{category}", style: "font-size: 14px; color: rgba(0,0,0,0.6);", "{category}" }
                }
                if let Some(coordinates) = lot.coordinates {
                    span {
                        style: "font-size: 14px; color: rgba(0,0,0,0.6);",
                        "Координаты: {coordinates.latitude:.5}, {coordinates.longitude:.5}"
                    }
                }
            }
        }
    }
}
