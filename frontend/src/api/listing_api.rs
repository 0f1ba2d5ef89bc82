//! Client calls to the lot catalog service.

use std::sync::LazyLock;

use catalog_client::listings::ListingClient;
use common::{
    fetch_error::FetchError,
    query_state::QueryState,
    search_result::{FetchResult, ListingSummary},
};

// Built once; a configuration failure is kept and reported by every call.
static CATALOG: LazyLock<Result<ListingClient, FetchError>> = LazyLock::new(ListingClient::from_env);

fn catalog() -> Result<&'static ListingClient, FetchError> {
    CATALOG.as_ref().map_err(Clone::clone)
}

pub async fn fetch_listings(state: QueryState) -> Result<FetchResult, FetchError> {
    catalog()?.fetch_listings(&state).await
}

pub async fn fetch_map_listings(state: QueryState) -> Result<FetchResult, FetchError> {
    catalog()?.fetch_map_listings(&state).await
}

pub async fn fetch_lot(lot_id: String) -> Result<ListingSummary, FetchError> {
    catalog()?.fetch_lot(&lot_id).await
}
