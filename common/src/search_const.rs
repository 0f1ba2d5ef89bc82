//! Constants shared by the filter engine and the catalog client.

/// Listings per page requested from the catalog service.
pub const PAGE_SIZE: u64 = 20;

/// Quiescence window for debounced text and price edits.
pub const DEBOUNCE_WINDOW_MS: u32 = 600;

/// Pages shown on each side of the current page in the pagination strip.
pub const PAGINATION_WINDOW: u64 = 5;

/// Bidding types offered by the catalog, in display order.
pub const BIDDING_TYPES: [&str; 2] = ["Открытый аукцион", "Публичное предложение"];

/// Address parameter names. These are the bookmark contract and must stay stable.
pub mod param {
    pub const CATEGORIES: &str = "categories";
    pub const BIDDING_TYPE: &str = "biddingType";
    pub const PRICE_FROM: &str = "priceFrom";
    pub const PRICE_TO: &str = "priceTo";
    pub const SEARCH_QUERY: &str = "searchQuery";
    pub const IS_SHARED_OWNERSHIP: &str = "isSharedOwnership";
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "pageSize";
}
