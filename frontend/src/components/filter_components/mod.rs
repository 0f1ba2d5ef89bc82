pub mod filter_panel;
pub mod category_tree_select;
pub mod pagination_controls;
pub mod access_banner;
pub mod listing_card;
pub mod result_status;
