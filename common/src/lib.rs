//! Filter engine shared by the catalog client and the frontend.

extern crate serde;


pub mod search_const;
pub mod query_state;
pub mod address_sync;
pub mod category_tree;
pub mod price_format;
pub mod mutation_scheduler;
pub mod search_result;
pub mod fetch_error;
pub mod fetch_controller;
pub mod access_gate;
pub mod pagination;
