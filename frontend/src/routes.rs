use dioxus::prelude::*;

use crate::components::navbar::Navbar;
use crate::data_definitions::url_param::AddressQuery;
use crate::pages::catalog_page::CatalogPage;
use crate::pages::lot_page::LotPage;
use crate::pages::map_page::MapPage;
use common::query_state::QueryState;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Navbar)]

    #[route("/?:..query")]
    CatalogPage { query: AddressQuery },

    #[route("/map?:..query")]
    MapPage { query: AddressQuery },

    #[route("/lot/:lot_id")]
    LotPage { lot_id: String },
}

impl Route {
    pub fn catalog_from_state(state: &QueryState) -> Self {
        Self::CatalogPage { query: AddressQuery::from(state) }
    }

    pub fn map_from_state(state: &QueryState) -> Self {
        Self::MapPage { query: AddressQuery::from(state) }
    }
}
