//! Query-string segment of the catalog routes.

use std::fmt::Display;

use common::{address_sync::serialize_address, query_state::QueryState};
use dioxus::router::FromQuery;

/// Raw query string as it appears in the address bar, without the leading `?`.
/// Kept raw so a non-canonical address can be detected and replaced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AddressQuery(pub String);

impl AddressQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&QueryState> for AddressQuery {
    fn from(state: &QueryState) -> Self {
        AddressQuery(serialize_address(state))
    }
}

impl FromQuery for AddressQuery {
    fn from_query(query: &str) -> Self {
        AddressQuery(query.strip_prefix('?').unwrap_or(query).to_string())
    }
}

// Parsed back by FromQuery
impl Display for AddressQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
