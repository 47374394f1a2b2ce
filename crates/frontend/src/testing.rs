//! Test doubles for the grid, the chrome, the data source and the clock.

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use contracts::views::{
    FilterRule, FilterValue, RowIdentity, ScrollOffset, SortRule, StatRow, ViewId,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::data::source::{DataSource, DataSourceError, RowQuery};
use crate::grid::api::{
    ColumnInfo, GridApi, GridConfig, GridError, GridEvent, GridEventHandler, GridEventKind,
    GridFactory, GridRecord, RenderedRow,
};
use crate::grid::query::visible_records;
use crate::layout::tabs::chrome::ViewChrome;
use crate::shared::timing::Timing;
use crate::views::capabilities::DefaultCapabilities;
use crate::views::column_sizing::natural_width;
use crate::views::controller::ViewController;
use crate::views::definition::ViewDefinition;

// ============================================================================
// Clock
// ============================================================================

#[derive(Clone)]
pub struct ManualTiming {
    now: Rc<Cell<DateTime<Utc>>>,
    sleeps: Rc<RefCell<Vec<u32>>>,
}

impl ManualTiming {
    pub fn new() -> Self {
        Self {
            now: Rc::new(Cell::new(Utc.with_ymd_and_hms(2024, 1, 15, 19, 0, 0).unwrap())),
            sleeps: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn advance_ms(&self, ms: i64) {
        self.now.set(self.now.get() + Duration::milliseconds(ms));
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Timing for ManualTiming {
    fn now(&self) -> DateTime<Utc> {
        self.now.get()
    }

    async fn sleep(&self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        self.advance_ms(ms as i64);
        tokio::task::yield_now().await;
    }
}

// ============================================================================
// Data source
// ============================================================================

#[derive(Clone)]
pub struct CountingSource {
    result: Rc<RefCell<Result<Vec<StatRow>, DataSourceError>>>,
    requests: Rc<Cell<usize>>,
}

impl CountingSource {
    pub fn with_rows(rows: Vec<StatRow>) -> Self {
        Self {
            result: Rc::new(RefCell::new(Ok(rows))),
            requests: Rc::new(Cell::new(0)),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: Rc::new(RefCell::new(Err(DataSourceError::Fatal(
                "HTTP 404: relation does not exist".into(),
            )))),
            requests: Rc::new(Cell::new(0)),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.get()
    }
}

#[async_trait(?Send)]
impl DataSource for CountingSource {
    async fn fetch_rows(&self, _query: &RowQuery) -> Result<Vec<StatRow>, DataSourceError> {
        self.requests.set(self.requests.get() + 1);
        tokio::task::yield_now().await;
        self.result.borrow().clone()
    }
}

pub fn jones_rows() -> Vec<StatRow> {
    let row = |name: &str, team: &str, prop: &str, line: f64, over: i64, under: i64| {
        StatRow::new()
            .with("Player Name", name)
            .with("Team", team)
            .with("Prop", prop)
            .with("Split", "Season")
            .with("Line", line)
            .with("Over Odds", over)
            .with("Under Odds", under)
            .with("Hit Rate", 0.61)
            .with("Games", 58)
    };
    vec![
        row("Jones", "LAL", "Points", 24.5, -115, -105),
        row("Adams", "BOS", "Rebounds", 8.5, 120, -150),
        row("Brown", "LAL", "Assists", 6.5, -110, -110),
    ]
}

// ============================================================================
// Grid
// ============================================================================

#[derive(Default)]
pub struct MockGrid {
    config: RefCell<Option<GridConfig>>,
    build_error: Option<GridError>,
    records: RefCell<Vec<GridRecord>>,
    expanded: RefCell<HashSet<RowIdentity>>,
    widths: RefCell<HashMap<String, f64>>,
    filters: RefCell<Vec<FilterRule>>,
    sort: RefCell<Vec<SortRule>>,
    scroll: Cell<ScrollOffset>,
    container_width: Option<f64>,
    placeholder: RefCell<Option<String>>,
    handlers: RefCell<Vec<(GridEventKind, GridEventHandler)>>,
    redraws: Cell<usize>,
    /// Журнал изменяющих вызовов, для проверки порядка восстановления
    log: RefCell<Vec<String>>,
}

impl MockGrid {
    fn emit(&self, event: GridEvent) {
        let handlers: Vec<GridEventHandler> = self
            .handlers
            .borrow()
            .iter()
            .filter(|(kind, _)| *kind == event.kind())
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(&event);
        }
    }

    fn record(&self, entry: impl Into<String>) {
        self.log.borrow_mut().push(entry.into());
    }

    pub fn click(&self, field: &str, identity: &RowIdentity) {
        self.emit(GridEvent::CellClicked {
            field: field.to_string(),
            identity: identity.clone(),
        });
    }

    pub fn is_expanded(&self, identity: &RowIdentity) -> bool {
        self.expanded.borrow().contains(identity)
    }

    pub fn redraws(&self) -> usize {
        self.redraws.get()
    }

    pub fn placeholder(&self) -> Option<String> {
        self.placeholder.borrow().clone()
    }

    pub fn log(&self) -> Vec<String> {
        self.log.borrow().clone()
    }

    pub fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

#[async_trait(?Send)]
impl GridApi for MockGrid {
    async fn build(&self, config: GridConfig) -> Result<(), GridError> {
        tokio::task::yield_now().await;
        if let Some(e) = &self.build_error {
            return Err(e.clone());
        }
        *self.config.borrow_mut() = Some(config);
        self.emit(GridEvent::TableBuilt);
        Ok(())
    }

    fn set_data(&self, records: Vec<GridRecord>) {
        let row_count = records.len();
        *self.records.borrow_mut() = records;
        self.expanded.borrow_mut().clear();
        self.emit(GridEvent::DataLoaded { row_count });
    }

    fn redraw(&self, _force: bool) {
        self.redraws.set(self.redraws.get() + 1);
    }

    fn rows(&self) -> Vec<RenderedRow> {
        let expanded = self.expanded.borrow();
        visible_records(&self.records.borrow(), &self.filters.borrow(), &self.sort.borrow())
            .into_iter()
            .map(|record| RenderedRow {
                expanded: expanded.contains(&record.identity),
                identity: record.identity,
                data: record.data,
            })
            .collect()
    }

    fn column(&self, field: &str) -> Option<ColumnInfo> {
        self.columns().into_iter().find(|c| c.field == field)
    }

    fn columns(&self) -> Vec<ColumnInfo> {
        let config = self.config.borrow();
        let Some(config) = config.as_ref() else {
            return Vec::new();
        };
        let records = self.records.borrow();
        let widths = self.widths.borrow();
        config
            .columns
            .iter()
            .map(|def| {
                let values: Vec<String> = records
                    .iter()
                    .filter_map(|r| r.data.text(&def.field))
                    .collect();
                let natural =
                    natural_width(&def.title, values.iter().map(|v| v.as_str()), def.min_width);
                ColumnInfo {
                    field: def.field.clone(),
                    title: def.title.clone(),
                    width: widths.get(&def.field).copied().unwrap_or(natural),
                    natural_width: natural,
                }
            })
            .collect()
    }

    fn set_column_width(&self, field: &str, width: f64) -> Result<(), GridError> {
        if self.column(field).is_none() {
            return Err(GridError::UnknownColumn(field.to_string()));
        }
        self.widths.borrow_mut().insert(field.to_string(), width);
        Ok(())
    }

    fn header_filters(&self) -> Vec<FilterRule> {
        self.filters.borrow().clone()
    }

    fn set_header_filter_value(&self, field: &str, value: FilterValue) -> Result<(), GridError> {
        if self.column(field).is_none() {
            return Err(GridError::UnknownColumn(field.to_string()));
        }
        self.record(format!("filter:{field}"));
        let mut filters = self.filters.borrow_mut();
        filters.retain(|f| f.field != field);
        if !value.is_empty() {
            filters.push(FilterRule::new(field, value));
        }
        Ok(())
    }

    fn clear_header_filters(&self) {
        self.filters.borrow_mut().clear();
    }

    fn sorters(&self) -> Vec<SortRule> {
        self.sort.borrow().clone()
    }

    fn set_sort(&self, rules: &[SortRule]) -> Result<(), GridError> {
        if let Some(rule) = rules.iter().find(|r| self.column(&r.field).is_none()) {
            return Err(GridError::UnknownColumn(rule.field.clone()));
        }
        self.record("sort");
        *self.sort.borrow_mut() = rules.to_vec();
        Ok(())
    }

    fn scroll_offset(&self) -> Result<ScrollOffset, GridError> {
        Ok(self.scroll.get())
    }

    fn set_scroll_offset(&self, offset: ScrollOffset) -> Result<(), GridError> {
        self.record("scroll");
        self.scroll.set(offset);
        Ok(())
    }

    fn set_row_expanded(&self, identity: &RowIdentity, expanded: bool) -> bool {
        if !self.records.borrow().iter().any(|r| &r.identity == identity) {
            return false;
        }
        self.record(format!("expand:{identity}:{expanded}"));
        let mut set = self.expanded.borrow_mut();
        if expanded {
            set.insert(identity.clone());
        } else {
            set.remove(identity);
        }
        true
    }

    fn container_width(&self) -> Option<f64> {
        self.container_width
    }

    fn set_placeholder(&self, message: Option<String>) {
        *self.placeholder.borrow_mut() = message;
    }

    fn on(&self, kind: GridEventKind, handler: GridEventHandler) {
        self.handlers.borrow_mut().push((kind, handler));
    }
}

#[derive(Clone, Default)]
pub struct MockGridFactory {
    grids: Rc<RefCell<Vec<(ViewId, Rc<MockGrid>)>>>,
    build_error: Option<GridError>,
    container_width: Option<f64>,
}

impl MockGridFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_build(error: GridError) -> Self {
        Self {
            build_error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_container_width(width: f64) -> Self {
        Self {
            container_width: Some(width),
            ..Self::default()
        }
    }

    pub fn created(&self) -> usize {
        self.grids.borrow().len()
    }

    pub fn grid(&self, index: usize) -> Rc<MockGrid> {
        self.grids.borrow()[index].1.clone()
    }

    pub fn grid_for(&self, view: &str) -> Option<Rc<MockGrid>> {
        self.grids
            .borrow()
            .iter()
            .find(|(id, _)| id.as_str() == view)
            .map(|(_, grid)| grid.clone())
    }
}

impl GridFactory for MockGridFactory {
    fn create(&self, view: &ViewId) -> Rc<dyn GridApi> {
        let grid = Rc::new(MockGrid {
            build_error: self.build_error.clone(),
            container_width: self.container_width,
            ..MockGrid::default()
        });
        self.grids.borrow_mut().push((view.clone(), grid.clone()));
        grid
    }
}

pub fn controller_for(
    definition: ViewDefinition,
    source: &CountingSource,
    factory: &MockGridFactory,
    timing: &ManualTiming,
) -> Rc<ViewController> {
    Rc::new(ViewController::new(
        definition,
        Rc::new(source.clone()),
        Rc::new(factory.clone()),
        Rc::new(timing.clone()),
        Rc::new(DefaultCapabilities),
        300,
    ))
}

// ============================================================================
// Chrome
// ============================================================================

#[derive(Clone, Default)]
pub struct MockChrome {
    visible: Rc<RefCell<HashSet<ViewId>>>,
    highlighted: Rc<RefCell<HashSet<ViewId>>>,
    busy: Rc<Cell<bool>>,
    busy_changes: Rc<Cell<usize>>,
}

impl MockChrome {
    pub fn is_visible(&self, view: &str) -> bool {
        self.visible.borrow().contains(&ViewId::from(view))
    }

    pub fn is_highlighted(&self, view: &str) -> bool {
        self.highlighted.borrow().contains(&ViewId::from(view))
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    pub fn busy_changes(&self) -> usize {
        self.busy_changes.get()
    }
}

impl ViewChrome for MockChrome {
    fn set_visible(&self, view: &ViewId, visible: bool) {
        let mut set = self.visible.borrow_mut();
        if visible {
            set.insert(view.clone());
        } else {
            set.remove(view);
        }
    }

    fn set_highlighted(&self, view: &ViewId, highlighted: bool) {
        let mut set = self.highlighted.borrow_mut();
        if highlighted {
            set.insert(view.clone());
        } else {
            set.remove(view);
        }
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
        self.busy_changes.set(self.busy_changes.get() + 1);
    }
}
