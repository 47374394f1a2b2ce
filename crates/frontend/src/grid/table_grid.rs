//! TableGrid - реализация [`GridApi`] на сигналах Leptos.
//!
//! Состояние грида (данные, фильтры, сортировка, ширины, раскрытые строки)
//! хранится в сигналах, отрисовкой занимается компонент `StatsTable`.
//! Структура `Copy`, поэтому её можно свободно передавать в замыкания.

use async_trait::async_trait;
use contracts::views::{FilterRule, FilterValue, RowIdentity, ScrollOffset, SortRule};
use leptos::html::Div;
use leptos::prelude::*;
use std::collections::{HashMap, HashSet};

use super::api::{
    ColumnInfo, GridApi, GridConfig, GridError, GridEvent, GridEventHandler, GridEventKind,
    GridRecord, RenderedRow,
};
use super::query::visible_records;
use crate::views::column_sizing::natural_width;

#[derive(Clone, Copy)]
pub struct TableGrid {
    pub config: RwSignal<Option<GridConfig>>,
    pub records: RwSignal<Vec<GridRecord>>,
    pub expanded: RwSignal<HashSet<RowIdentity>>,
    pub widths: RwSignal<HashMap<String, f64>>,
    pub filters: RwSignal<Vec<FilterRule>>,
    pub sort: RwSignal<Vec<SortRule>>,
    pub placeholder: RwSignal<Option<String>>,
    pub redraw_tick: RwSignal<u64>,
    /// Растёт при каждом `set_data`; входит в ключ строк при отрисовке
    pub data_version: RwSignal<u64>,
    pub scroll_ref: NodeRef<Div>,
    handlers: StoredValue<Vec<(GridEventKind, GridEventHandler)>, LocalStorage>,
}

impl TableGrid {
    pub fn new() -> Self {
        Self {
            config: RwSignal::new(None),
            records: RwSignal::new(Vec::new()),
            expanded: RwSignal::new(HashSet::new()),
            widths: RwSignal::new(HashMap::new()),
            filters: RwSignal::new(Vec::new()),
            sort: RwSignal::new(Vec::new()),
            placeholder: RwSignal::new(None),
            redraw_tick: RwSignal::new(0),
            data_version: RwSignal::new(0),
            scroll_ref: NodeRef::new(),
            handlers: StoredValue::new_local(Vec::new()),
        }
    }

    pub fn emit(&self, event: GridEvent) {
        let handlers: Vec<GridEventHandler> = self.handlers.with_value(|handlers| {
            handlers
                .iter()
                .filter(|(kind, _)| *kind == event.kind())
                .map(|(_, handler)| handler.clone())
                .collect()
        });
        for handler in handlers {
            handler(&event);
        }
    }

    /// Видимые строки для компонента (реактивно). Раскрытие сюда не входит,
    /// строки читают его сами через [`TableGrid::is_expanded`].
    pub fn visible_rows(&self) -> Vec<GridRecord> {
        self.redraw_tick.track();
        self.records.with(|records| {
            self.filters
                .with(|filters| self.sort.with(|sort| visible_records(records, filters, sort)))
        })
    }

    pub fn is_expanded(&self, identity: &RowIdentity) -> bool {
        self.expanded.with(|set| set.contains(identity))
    }

    /// Явно заданная ширина колонки (реактивно)
    pub fn width_of(&self, field: &str) -> Option<f64> {
        self.widths.with(|widths| widths.get(field).copied())
    }

    pub fn filter_of(&self, field: &str) -> Option<FilterValue> {
        self.filters.with(|filters| {
            filters
                .iter()
                .find(|rule| rule.field == field)
                .map(|rule| rule.value.clone())
        })
    }

    fn has_column(&self, field: &str) -> bool {
        self.config.with_untracked(|config| {
            config
                .as_ref()
                .map(|c| c.columns.iter().any(|col| col.field == field))
                .unwrap_or(false)
        })
    }

    fn scroll_element(&self) -> Result<web_sys::HtmlDivElement, GridError> {
        self.scroll_ref
            .get_untracked()
            .ok_or(GridError::ContainerMissing)
    }
}

impl Default for TableGrid {
    fn default() -> Self {
        Self::new()
    }
}

fn into_rendered(records: Vec<GridRecord>, expanded: &HashSet<RowIdentity>) -> Vec<RenderedRow> {
    records
        .into_iter()
        .map(|record| RenderedRow {
            expanded: expanded.contains(&record.identity),
            identity: record.identity,
            data: record.data,
        })
        .collect()
}

#[async_trait(?Send)]
impl GridApi for TableGrid {
    async fn build(&self, config: GridConfig) -> Result<(), GridError> {
        if config.columns.is_empty() {
            return Err(GridError::Build("no columns configured".to_string()));
        }
        self.config.set(Some(config));
        // даём браузеру отрисовать каркас таблицы
        gloo_timers::future::TimeoutFuture::new(0).await;
        self.emit(GridEvent::TableBuilt);
        Ok(())
    }

    fn set_data(&self, records: Vec<GridRecord>) {
        let row_count = records.len();
        self.expanded.set(HashSet::new());
        self.records.set(records);
        self.data_version.update(|version| *version += 1);
        self.emit(GridEvent::DataLoaded { row_count });
    }

    fn redraw(&self, force: bool) {
        if force {
            self.redraw_tick.update(|tick| *tick += 1);
        }
    }

    fn rows(&self) -> Vec<RenderedRow> {
        let expanded = self.expanded.get_untracked();
        let visible = self.records.with_untracked(|records| {
            self.filters.with_untracked(|filters| {
                self.sort
                    .with_untracked(|sort| visible_records(records, filters, sort))
            })
        });
        into_rendered(visible, &expanded)
    }

    fn column(&self, field: &str) -> Option<ColumnInfo> {
        self.columns().into_iter().find(|c| c.field == field)
    }

    fn columns(&self) -> Vec<ColumnInfo> {
        let Some(config) = self.config.get_untracked() else {
            return Vec::new();
        };
        let widths = self.widths.get_untracked();
        self.records.with_untracked(|records| {
            config
                .columns
                .iter()
                .map(|def| {
                    let values: Vec<String> = records
                        .iter()
                        .filter_map(|r| r.data.text(&def.field))
                        .collect();
                    let natural = natural_width(
                        &def.title,
                        values.iter().map(|v| v.as_str()),
                        def.min_width,
                    );
                    ColumnInfo {
                        field: def.field.clone(),
                        title: def.title.clone(),
                        width: widths.get(&def.field).copied().unwrap_or(natural),
                        natural_width: natural,
                    }
                })
                .collect()
        })
    }

    fn set_column_width(&self, field: &str, width: f64) -> Result<(), GridError> {
        if !self.has_column(field) {
            return Err(GridError::UnknownColumn(field.to_string()));
        }
        self.widths.update(|widths| {
            widths.insert(field.to_string(), width);
        });
        Ok(())
    }

    fn header_filters(&self) -> Vec<FilterRule> {
        self.filters.get_untracked()
    }

    fn set_header_filter_value(&self, field: &str, value: FilterValue) -> Result<(), GridError> {
        if !self.has_column(field) {
            return Err(GridError::UnknownColumn(field.to_string()));
        }
        self.filters.update(|filters| {
            filters.retain(|rule| rule.field != field);
            if !value.is_empty() {
                filters.push(FilterRule::new(field, value));
            }
        });
        Ok(())
    }

    fn clear_header_filters(&self) {
        self.filters.set(Vec::new());
    }

    fn sorters(&self) -> Vec<SortRule> {
        self.sort.get_untracked()
    }

    fn set_sort(&self, rules: &[SortRule]) -> Result<(), GridError> {
        if let Some(rule) = rules.iter().find(|rule| !self.has_column(&rule.field)) {
            return Err(GridError::UnknownColumn(rule.field.clone()));
        }
        self.sort.set(rules.to_vec());
        Ok(())
    }

    fn scroll_offset(&self) -> Result<ScrollOffset, GridError> {
        let element = self.scroll_element()?;
        Ok(ScrollOffset::new(
            element.scroll_top() as f64,
            element.scroll_left() as f64,
        ))
    }

    fn set_scroll_offset(&self, offset: ScrollOffset) -> Result<(), GridError> {
        let element = self.scroll_element()?;
        element.set_scroll_top(offset.top.round() as i32);
        element.set_scroll_left(offset.left.round() as i32);
        Ok(())
    }

    fn set_row_expanded(&self, identity: &RowIdentity, expanded: bool) -> bool {
        let exists = self
            .records
            .with_untracked(|records| records.iter().any(|r| &r.identity == identity));
        if !exists {
            return false;
        }
        self.expanded.update(|set| {
            if expanded {
                set.insert(identity.clone());
            } else {
                set.remove(identity);
            }
        });
        true
    }

    fn container_width(&self) -> Option<f64> {
        let element = self.scroll_ref.get_untracked()?;
        let width = element.client_width();
        (width > 0).then_some(width as f64)
    }

    fn set_placeholder(&self, message: Option<String>) {
        self.placeholder.set(message);
    }

    fn on(&self, kind: GridEventKind, handler: GridEventHandler) {
        self.handlers.update_value(|handlers| handlers.push((kind, handler)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::jones_rows;
    use crate::views::catalog::player_props;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Грид с данными table0; `build` не вызывается, он ждёт браузерный таймер
    fn loaded_grid() -> (Owner, TableGrid) {
        let owner = Owner::new();
        owner.set();
        let definition = player_props();
        let grid = TableGrid::new();
        grid.config.set(Some(definition.grid_config()));
        let records = jones_rows()
            .into_iter()
            .map(|data| GridRecord {
                identity: RowIdentity::from_fields(&data, &definition.key_fields),
                data,
            })
            .collect();
        grid.set_data(records);
        (owner, grid)
    }

    #[test]
    fn test_expand_row_hidden_by_filter() {
        let (_owner, grid) = loaded_grid();
        let jones = RowIdentity::from("Jones_LAL_Points_Season");

        grid.set_header_filter_value("Team", FilterValue::Values(vec!["BOS".into()]))
            .unwrap();
        assert_eq!(grid.rows().len(), 1);

        assert!(grid.set_row_expanded(&jones, true));
        assert!(!grid.rows().iter().any(|row| row.identity == jones));

        grid.clear_header_filters();
        let row = grid.rows().into_iter().find(|row| row.identity == jones).unwrap();
        assert!(row.expanded);

        assert!(!grid.set_row_expanded(&RowIdentity::from("Nobody"), true));
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let (_owner, grid) = loaded_grid();

        let result = grid.set_header_filter_value("Removed Column", FilterValue::Text("x".into()));
        assert_eq!(result, Err(GridError::UnknownColumn("Removed Column".into())));
        assert!(grid.header_filters().is_empty());

        assert!(grid.set_sort(&[SortRule::asc("Removed Column")]).is_err());
        assert!(grid.set_column_width("Removed Column", 80.0).is_err());
    }

    #[test]
    fn test_set_data_resets_expansion_and_notifies() {
        let (_owner, grid) = loaded_grid();
        let loaded = Rc::new(Cell::new(None));
        let seen = loaded.clone();
        grid.on(
            GridEventKind::DataLoaded,
            Rc::new(move |event| {
                if let GridEvent::DataLoaded { row_count } = event {
                    seen.set(Some(*row_count));
                }
            }),
        );
        let jones = RowIdentity::from("Jones_LAL_Points_Season");
        grid.set_row_expanded(&jones, true);

        grid.set_data(Vec::new());

        assert_eq!(loaded.get(), Some(0));
        assert!(grid.rows().is_empty());
        assert!(grid.expanded.get_untracked().is_empty());
    }

    #[test]
    fn test_expansion_does_not_touch_row_list() {
        let (_owner, grid) = loaded_grid();
        let computed = Arc::new(AtomicUsize::new(0));
        let counter = computed.clone();
        let rows = Memo::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
            grid.visible_rows()
        });
        assert_eq!(rows.with(|rows| rows.len()), 3);
        let version = grid.data_version.get_untracked();

        let jones = RowIdentity::from("Jones_LAL_Points_Season");
        grid.set_row_expanded(&jones, true);
        assert!(grid.is_expanded(&jones));
        assert_eq!(rows.with(|rows| rows.len()), 3);
        assert_eq!(computed.load(Ordering::SeqCst), 1);
        assert_eq!(grid.data_version.get_untracked(), version);

        grid.set_header_filter_value("Team", FilterValue::Values(vec!["LAL".into()]))
            .unwrap();
        assert_eq!(rows.with(|rows| rows.len()), 2);
        assert_eq!(computed.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_empty_filter_value_removes_rule() {
        let (_owner, grid) = loaded_grid();
        grid.set_header_filter_value("Player Name", FilterValue::Text("jo".into()))
            .unwrap();
        assert_eq!(grid.rows().len(), 1);

        grid.set_header_filter_value("Player Name", FilterValue::Text(String::new()))
            .unwrap();
        assert!(grid.header_filters().is_empty());
        assert_eq!(grid.rows().len(), 3);
    }
}
