pub mod url_param;
pub mod session_state;
pub mod category_taxonomy;
pub mod catalog_state;
