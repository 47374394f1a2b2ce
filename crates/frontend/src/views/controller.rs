//! Контроллер одного таба: владеет гридом, загрузкой данных, раскрытием
//! строк и подгонкой ширины колонок.
//!
//! Грид создаётся только в [`ViewController::initialize`], то есть при первой
//! активации таба.

use chrono::{DateTime, Duration, Utc};
use contracts::views::{RowIdentity, StatRow, ViewId, ViewLifecycle};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::rc::{Rc, Weak};

use super::capabilities::ViewCapabilities;
use super::column_sizing::{equalize_clusters, fill_width};
use super::definition::ViewDefinition;
use crate::data::source::DataSource;
use crate::grid::api::{GridApi, GridEvent, GridEventKind, GridFactory, GridRecord};
use crate::shared::timing::Timing;

pub struct ViewController {
    definition: ViewDefinition,
    source: Rc<dyn DataSource>,
    grid_factory: Rc<dyn GridFactory>,
    timing: Rc<dyn Timing>,
    capabilities: Rc<dyn ViewCapabilities>,
    toggle_debounce: Duration,

    lifecycle: Cell<ViewLifecycle>,
    grid: RefCell<Option<Rc<dyn GridApi>>>,
    expanded: RefCell<HashSet<RowIdentity>>,
    last_toggle: RefCell<HashMap<RowIdentity, DateTime<Utc>>>,
    initialized_at: Cell<Option<DateTime<Utc>>>,
    row_count: Cell<usize>,
    load_error: RefCell<Option<String>>,
}

impl ViewController {
    pub fn new(
        definition: ViewDefinition,
        source: Rc<dyn DataSource>,
        grid_factory: Rc<dyn GridFactory>,
        timing: Rc<dyn Timing>,
        capabilities: Rc<dyn ViewCapabilities>,
        toggle_debounce_ms: u32,
    ) -> Self {
        Self {
            definition,
            source,
            grid_factory,
            timing,
            capabilities,
            toggle_debounce: Duration::milliseconds(toggle_debounce_ms as i64),
            lifecycle: Cell::new(ViewLifecycle::Uninitialized),
            grid: RefCell::new(None),
            expanded: RefCell::new(HashSet::new()),
            last_toggle: RefCell::new(HashMap::new()),
            initialized_at: Cell::new(None),
            row_count: Cell::new(0),
            load_error: RefCell::new(None),
        }
    }

    pub fn id(&self) -> &ViewId {
        &self.definition.id
    }

    pub fn definition(&self) -> &ViewDefinition {
        &self.definition
    }

    pub fn capabilities(&self) -> &dyn ViewCapabilities {
        self.capabilities.as_ref()
    }

    pub fn lifecycle(&self) -> ViewLifecycle {
        self.lifecycle.get()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.get() == ViewLifecycle::Ready
    }

    pub fn grid(&self) -> Option<Rc<dyn GridApi>> {
        self.grid.borrow().clone()
    }

    pub fn initialized_at(&self) -> Option<DateTime<Utc>> {
        self.initialized_at.get()
    }

    pub fn row_count(&self) -> usize {
        self.row_count.get()
    }

    pub fn load_error(&self) -> Option<String> {
        self.load_error.borrow().clone()
    }

    pub fn expanded_rows(&self) -> HashSet<RowIdentity> {
        self.expanded.borrow().clone()
    }

    /// Строит грид и загружает первую порцию данных.
    ///
    /// Повторный вызов (Ready или Initializing) ничего не делает. Ошибки
    /// сборки и загрузки логируются: таб всё равно становится Ready, но с
    /// пустыми данными и placeholder-сообщением.
    pub async fn initialize(self: &Rc<Self>) {
        if self.lifecycle.get() != ViewLifecycle::Uninitialized {
            return;
        }
        self.lifecycle.set(ViewLifecycle::Initializing);
        log::info!("🔨 initializing view '{}'", self.id());

        let grid = self.grid_factory.create(self.id());
        *self.grid.borrow_mut() = Some(grid.clone());
        self.bind_grid_events(grid.as_ref());

        match grid.build(self.definition.grid_config()).await {
            Ok(()) => self.load_from_source(grid.as_ref()).await,
            Err(e) => {
                log::error!("❌ grid build failed for '{}': {}", self.id(), e);
                self.fail_with(grid.as_ref(), e.to_string());
            }
        }

        self.initialized_at.set(Some(self.timing.now()));
        self.lifecycle.set(ViewLifecycle::Ready);
        log::info!(
            "✅ view '{}' ready ({} rows)",
            self.id(),
            self.row_count.get()
        );
    }

    /// Перечитывает строки. Раскрытые строки переживают перезагрузку,
    /// так как ключом служит RowIdentity.
    pub async fn reload(&self) {
        let Some(grid) = self.grid().filter(|_| self.is_ready()) else {
            return;
        };
        self.load_from_source(grid.as_ref()).await;
    }

    async fn load_from_source(&self, grid: &dyn GridApi) {
        match self.source.fetch_rows(&self.definition.query()).await {
            Ok(rows) => {
                *self.load_error.borrow_mut() = None;
                grid.set_placeholder(None);
                self.load_rows(grid, rows);
            }
            Err(e) => {
                log::error!("❌ data load failed for '{}': {}", self.id(), e);
                self.fail_with(grid, e.to_string());
            }
        }
    }

    fn fail_with(&self, grid: &dyn GridApi, message: String) {
        grid.set_data(Vec::new());
        grid.set_placeholder(Some(format!("Failed to load data: {}", message)));
        self.row_count.set(0);
        *self.load_error.borrow_mut() = Some(message);
    }

    fn load_rows(&self, grid: &dyn GridApi, rows: Vec<StatRow>) {
        let key_fields = &self.definition.key_fields;
        let records: Vec<GridRecord> = rows
            .into_iter()
            .map(|data| GridRecord {
                identity: self.capabilities.row_identity(&data, key_fields),
                data,
            })
            .collect();
        self.row_count.set(records.len());
        grid.set_data(records);

        let expanded = self.expanded.borrow().clone();
        for identity in &expanded {
            grid.set_row_expanded(identity, true);
        }
    }

    fn bind_grid_events(self: &Rc<Self>, grid: &dyn GridApi) {
        let weak: Weak<Self> = Rc::downgrade(self);
        let on_click = weak.clone();
        grid.on(
            GridEventKind::CellClicked,
            Rc::new(move |event| {
                let Some(this) = on_click.upgrade() else {
                    return;
                };
                if let GridEvent::CellClicked { field, identity } = event {
                    if this.definition.expand_field.as_deref() == Some(field.as_str()) {
                        this.toggle_expansion(identity);
                    }
                }
            }),
        );

        for kind in [GridEventKind::TableBuilt, GridEventKind::DataLoaded] {
            let weak = weak.clone();
            grid.on(
                kind,
                Rc::new(move |_| {
                    if let Some(this) = weak.upgrade() {
                        this.apply_column_sizing();
                    }
                }),
            );
        }
    }

    /// Переключает раскрытие строки.
    ///
    /// Повторный клик по той же строке внутри окна debounce игнорируется.
    /// Возвращает `true`, если состояние изменилось.
    pub fn toggle_expansion(&self, identity: &RowIdentity) -> bool {
        let now = self.timing.now();
        {
            let mut last = self.last_toggle.borrow_mut();
            if let Some(previous) = last.get(identity) {
                if now - *previous < self.toggle_debounce {
                    log::debug!("toggle of '{}' coalesced", identity);
                    return false;
                }
            }
            let window = self.toggle_debounce;
            last.retain(|_, at| now - *at < window);
            last.insert(identity.clone(), now);
        }

        let expanded = {
            let mut set = self.expanded.borrow_mut();
            if set.remove(identity) {
                false
            } else {
                set.insert(identity.clone());
                true
            }
        };

        if let Some(grid) = self.grid() {
            if !grid.set_row_expanded(identity, expanded) {
                log::debug!("row '{}' is not rendered in '{}'", identity, self.id());
            }
        }
        true
    }

    /// Заменяет множество раскрытых строк целиком (восстановление таба)
    ///
    /// Затрагивает и строки, скрытые текущим фильтром.
    pub fn apply_expanded(&self, wanted: &HashSet<RowIdentity>) {
        let previous = self.expanded.replace(wanted.clone());

        let Some(grid) = self.grid() else {
            return;
        };
        for identity in previous.union(wanted) {
            grid.set_row_expanded(identity, wanted.contains(identity));
        }
    }

    /// Выравнивание кластеров и растяжение fill-колонки
    pub fn apply_column_sizing(&self) {
        let Some(grid) = self.grid() else {
            return;
        };

        let columns = grid.columns();
        for (field, width) in equalize_clusters(&columns, &self.definition.clusters) {
            if let Err(e) = grid.set_column_width(&field, width) {
                log::warn!("cluster width for '{}': {}", field, e);
            }
        }

        self.apply_fill(grid.as_ref());
    }

    /// Пересчёт fill-колонки после resize окна (вызывается с debounce)
    pub fn on_viewport_resize(&self) {
        if let Some(grid) = self.grid() {
            self.apply_fill(grid.as_ref());
        }
    }

    fn apply_fill(&self, grid: &dyn GridApi) {
        let Some(fill_field) = self.definition.fill_field.as_deref() else {
            return;
        };
        let Some(container) = grid.container_width() else {
            return;
        };
        // ширины перечитываются: кластеры могли их изменить
        let columns = grid.columns();
        if let Some(width) = fill_width(&columns, fill_field, container) {
            if let Err(e) = grid.set_column_width(fill_field, width) {
                log::warn!("fill width for '{}': {}", fill_field, e);
            }
        }
    }
}
