pub mod api;
pub mod format;
pub mod header_filter;
pub mod query;
pub mod stats_table;
pub mod table_grid;

pub use api::{GridApi, GridFactory};
pub use stats_table::StatsTable;
pub use table_grid::TableGrid;
