pub mod pagination_controls;
pub mod search_input;
pub mod status_badge;
pub mod table_checkbox;
pub mod table_header_checkbox;

pub use pagination_controls::PaginationControls;
pub use search_input::SearchInput;
pub use status_badge::StatusBadge;
pub use table_checkbox::TableCheckbox;
pub use table_header_checkbox::TableHeaderCheckbox;
