use common::{
    fetch_controller::ListView, price_format::group_digits, query_state::QueryState, search_result::ListingSummary,
};
use dioxus::prelude::*;

use crate::{data_definitions::session_state::remember_list_position, routes::Route};

#[component]
pub fn ListingCard(listing: ReadSignal<ListingSummary>, list_state: ReadSignal<QueryState>) -> Element {
    let ListingSummary { id, title, start_price, bidding_type, categories, image_url, .. } = listing.read().clone();
    let category_line = categories.join(", ");
    let price = start_price.map(|p| format!("{} ₽", group_digits(p))).unwrap_or_else(|| "Цена не указана".to_string());

    rsx! {
        div {
            style: "
                display: flex;
                flex-direction: column;
                gap: 8px;
                background: white;
                border: 3px solid #AAAAAA33;
                border-radius: 8px;
                padding: 12px 16px;
                overflow: hidden;
            ",
            // the list position must be saved before the route changes
            onmousedown: move |_| remember_list_position(ListView::Catalog, &list_state.read()),
            Link {
                to: Route::LotPage { lot_id: id.clone() },
                div {
                    style: "display: flex; flex-direction: column; gap: 8px; color: #111827;",
                    if let Some(src) = image_url {
                        img {
                            src: "{src}",
                            alt: "{title}",
                            style: "width: 100%; height: 160px; object-fit: cover; border-radius: 4px;",
                        }
                    }
                    span {
                        style: "font-size: 17px; font-weight: 500; overflow: hidden; text-overflow: ellipsis; display: -webkit-box; -webkit-line-clamp: 3; -webkit-box-orient: vertical;",
                        "{title}"
                    }
                    span { style: "font-size: 19px; font-weight: 600;", "{price}" }
                    if let Some(bidding_type) = bidding_type {
                        span { style: "font-size: 13px; color: rgb(75, 87, 112);", "{bidding_type}" }
                    }
                    if !category_line.is_empty() {
                        span { style: "font-size: 13px; color: rgba(0,0,0,0.5);", "{category_line}" }
                    }
                }
            }
        }
    }
}
