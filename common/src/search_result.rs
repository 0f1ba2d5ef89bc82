use serde::{Deserialize, Serialize};

use crate::query_state::QueryState;

/// How much of a result set the viewer may see. Decided by the catalog
/// service per response, never changed locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AccessLevel {
    #[default]
    Anonymous,
    Limited,
    Full,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingSummary {
    pub id: String,
    pub title: String,
    pub start_price: Option<u64>,
    pub bidding_type: Option<String>,
    pub categories: Vec<String>,
    pub image_url: Option<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// One resolved catalog query. Replaced wholesale by the next applied result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult {
    /// The state this result was requested for.
    pub query: QueryState,
    /// Server order, stable only within this result.
    pub items: Vec<ListingSummary>,
    pub total_count: u64,
    pub total_pages: u64,
    pub access_level: AccessLevel,
    /// How many listings of the whole result the viewer may open, when the
    /// service reports it for restricted tiers.
    pub visible_count: Option<u64>,
}

impl FetchResult {
    pub fn empty(query: QueryState) -> Self {
        Self {
            query,
            items: vec![],
            total_count: 0,
            total_pages: 0,
            access_level: AccessLevel::default(),
            visible_count: None,
        }
    }
}
