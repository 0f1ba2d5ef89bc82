pub mod catalog_page;
pub mod map_page;
pub mod lot_page;
