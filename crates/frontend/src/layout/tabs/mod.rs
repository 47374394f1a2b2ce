//! Tab management module
//!
//! Содержит:
//! - `coordinator` - переключение табов, сохранение/восстановление состояния
//! - `registry` - ViewId → ViewController (единственный источник правды)
//! - `state_store` - сохранённые состояния табов
//! - `chrome` - видимость, подсветка и индикатор занятости
//! - `page`, `tab_bar` - компоненты
//! - `resize` - подгонка ширин при изменении окна

pub mod chrome;
pub mod coordinator;
pub mod page;
pub mod registry;
pub mod resize;
pub mod state_store;
pub mod tab_bar;

pub use chrome::{TabChrome, ViewChrome};
pub use coordinator::{SwitchOutcome, TabCoordinator};
pub use page::TabPage;
pub use registry::ViewRegistry;
pub use tab_bar::TabBar;
