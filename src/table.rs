pub mod table;
pub mod sort;
pub mod filter;
pub mod columns;
pub mod tableview;

pub use table::{ColumnHeader, Table};
pub use sort::SortDirection;
pub use tableview::TableView;
