//! Per-session view state that outlives a single page.

use common::{
    access_gate::BannerDismissal,
    fetch_controller::{ListView, ScrollRestoration},
    query_state::QueryState,
};
use dioxus::prelude::*;

/// List scroll position handed from a list view to the lot page and back.
pub static SCROLL_RESTORATION: GlobalSignal<ScrollRestoration> = Signal::global(ScrollRestoration::default);

pub static BANNER_DISMISSAL: GlobalSignal<BannerDismissal> = Signal::global(BannerDismissal::default);

/// Called right before leaving the list for a lot page.
pub fn remember_list_position(view: ListView, state: &QueryState) {
    let offset = current_scroll_offset();
    SCROLL_RESTORATION.write().record(view, offset, state);
}

#[cfg(target_arch = "wasm32")]
pub fn current_scroll_offset() -> f64 {
    web_sys::window().and_then(|window| window.scroll_y().ok()).unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn current_scroll_offset() -> f64 {
    0.0
}

#[cfg(target_arch = "wasm32")]
pub fn scroll_to(offset: f64) {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, offset);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn scroll_to(offset: f64) {
    dioxus::logger::tracing::debug!(offset, "scroll restoration is a no-op on this target");
}
