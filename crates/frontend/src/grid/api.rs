//! Контракт грида: набор возможностей, на который опираются контроллеры
//! табов и координатор. Любая реализация с этим набором взаимозаменяема
//! (`TableGrid` в приложении, mock-гриды в тестах).

use async_trait::async_trait;
use contracts::views::{
    FilterRule, FilterValue, RowIdentity, ScrollOffset, SortRule, StatRow, ViewId,
};
use std::rc::Rc;
use thiserror::Error;

// ============================================================================
// Column definitions
// ============================================================================

/// Вид фильтра в заголовке колонки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderFilterKind {
    None,
    Text,
    MultiSelect,
    MinMax,
}

/// Форматирование значения ячейки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFormat {
    Text,
    Integer,
    Decimal(u8),
    Percent,
    /// Американские коэффициенты: +150 / -110
    AmericanOdds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
    Center,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Right => "right",
            Align::Center => "center",
        }
    }
}

/// Декларативное описание колонки
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub field: String,
    pub title: String,
    pub filter: HeaderFilterKind,
    pub format: CellFormat,
    pub align: Align,
    pub min_width: f64,
}

impl ColumnDef {
    pub fn text(field: &str) -> Self {
        Self {
            field: field.to_string(),
            title: field.to_string(),
            filter: HeaderFilterKind::Text,
            format: CellFormat::Text,
            align: Align::Left,
            min_width: 60.0,
        }
    }

    pub fn numeric(field: &str, format: CellFormat) -> Self {
        Self {
            field: field.to_string(),
            title: field.to_string(),
            filter: HeaderFilterKind::MinMax,
            format,
            align: Align::Right,
            min_width: 56.0,
        }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn filter(mut self, filter: HeaderFilterKind) -> Self {
        self.filter = filter;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// Конфигурация, с которой строится грид
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    pub columns: Vec<ColumnDef>,
    /// Колонка, клик по которой раскрывает детальную панель строки
    pub expand_field: Option<String>,
    pub placeholder: String,
}

/// Колонка в рантайме: текущая и «естественная» (по контенту) ширина
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub field: String,
    pub title: String,
    pub width: f64,
    pub natural_width: f64,
}

// ============================================================================
// Rows & events
// ============================================================================

/// Строка, переданная в грид вместе с вычисленным ключом
#[derive(Debug, Clone, PartialEq)]
pub struct GridRecord {
    pub identity: RowIdentity,
    pub data: StatRow,
}

/// Строка, отрисованная гридом (после фильтров и сортировки)
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub identity: RowIdentity,
    pub data: StatRow,
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridEvent {
    TableBuilt,
    DataLoaded { row_count: usize },
    CellClicked { field: String, identity: RowIdentity },
}

impl GridEvent {
    pub fn kind(&self) -> GridEventKind {
        match self {
            GridEvent::TableBuilt => GridEventKind::TableBuilt,
            GridEvent::DataLoaded { .. } => GridEventKind::DataLoaded,
            GridEvent::CellClicked { .. } => GridEventKind::CellClicked,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    TableBuilt,
    DataLoaded,
    CellClicked,
}

pub type GridEventHandler = Rc<dyn Fn(&GridEvent)>;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GridError {
    #[error("column '{0}' not found")]
    UnknownColumn(String),
    #[error("grid is not built yet")]
    NotBuilt,
    #[error("scroll container is not mounted")]
    ContainerMissing,
    #[error("grid build failed: {0}")]
    Build(String),
}

// ============================================================================
// Capability set
// ============================================================================

#[async_trait(?Send)]
pub trait GridApi {
    /// Строит грид и завершается после первой отрисовки
    async fn build(&self, config: GridConfig) -> Result<(), GridError>;

    fn set_data(&self, records: Vec<GridRecord>);

    fn redraw(&self, force: bool);

    /// Строки в порядке отрисовки (после фильтров и сортировки)
    fn rows(&self) -> Vec<RenderedRow>;

    fn column(&self, field: &str) -> Option<ColumnInfo>;

    fn columns(&self) -> Vec<ColumnInfo>;

    fn set_column_width(&self, field: &str, width: f64) -> Result<(), GridError>;

    fn header_filters(&self) -> Vec<FilterRule>;

    fn set_header_filter_value(&self, field: &str, value: FilterValue) -> Result<(), GridError>;

    fn clear_header_filters(&self);

    fn sorters(&self) -> Vec<SortRule>;

    fn set_sort(&self, rules: &[SortRule]) -> Result<(), GridError>;

    fn scroll_offset(&self) -> Result<ScrollOffset, GridError>;

    fn set_scroll_offset(&self, offset: ScrollOffset) -> Result<(), GridError>;

    /// Возвращает `false`, если строки с таким ключом нет среди данных
    fn set_row_expanded(&self, identity: &RowIdentity, expanded: bool) -> bool;

    fn container_width(&self) -> Option<f64>;

    fn set_placeholder(&self, message: Option<String>);

    fn on(&self, kind: GridEventKind, handler: GridEventHandler);
}

/// Создаёт грид для таба. Вызывается только при ленивой инициализации.
pub trait GridFactory {
    fn create(&self, view: &ViewId) -> Rc<dyn GridApi>;
}

impl<F> GridFactory for F
where
    F: Fn(&ViewId) -> Rc<dyn GridApi>,
{
    fn create(&self, view: &ViewId) -> Rc<dyn GridApi> {
        self(view)
    }
}
