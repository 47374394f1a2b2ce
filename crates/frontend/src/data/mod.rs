//! Загрузка строк из hosted backend

pub mod rest;
pub mod retry;
pub mod source;

pub use rest::RestDataSource;
pub use source::{DataSource, DataSourceError, RowQuery};
