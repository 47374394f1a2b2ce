//! Координатор табов.
//!
//! Единственное место, которое знает, какой таб активен, и через которое
//! проходят все переключения:
//! сохранить уходящий таб → скрыть его → лениво инициализировать новый →
//! показать → после паузы redraw и восстановление состояния.
//!
//! Одновременно выполняется только одно переключение; запрос, пришедший во
//! время переключения, отбрасывается (не ставится в очередь).

use contracts::views::{
    DebugSnapshot, ViewDebugInfo, ViewId, ViewLifecycle, ViewState,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::chrome::ViewChrome;
use super::registry::ViewRegistry;
use super::state_store::ViewStateStore;
use crate::grid::api::{GridApi, GridError};
use crate::shared::config::TimingConfig;
use crate::shared::timing::Timing;
use crate::views::controller::ViewController;

/// Чем закончился запрос на переключение
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchOutcome {
    Switched,
    AlreadyActive,
    /// Другое переключение ещё выполняется, запрос отброшен
    Busy,
    UnknownView,
}

pub struct TabCoordinator {
    registry: Rc<ViewRegistry>,
    chrome: Rc<dyn ViewChrome>,
    timing: Rc<dyn Timing>,
    delays: TimingConfig,
    store: RefCell<ViewStateStore>,
    active: RefCell<Option<ViewId>>,
    switching: Cell<bool>,
}

/// Снимает флаг переключения и индикатор занятости при любом выходе
/// из `switch_to`, включая панику внутри шага.
struct SwitchGuard<'a> {
    switching: &'a Cell<bool>,
    chrome: &'a dyn ViewChrome,
}

impl Drop for SwitchGuard<'_> {
    fn drop(&mut self) {
        self.chrome.set_busy(false);
        self.switching.set(false);
    }
}

impl TabCoordinator {
    pub fn new(
        registry: Rc<ViewRegistry>,
        chrome: Rc<dyn ViewChrome>,
        timing: Rc<dyn Timing>,
        delays: TimingConfig,
    ) -> Self {
        Self {
            registry,
            chrome,
            timing,
            delays,
            store: RefCell::new(ViewStateStore::new()),
            active: RefCell::new(None),
            switching: Cell::new(false),
        }
    }

    pub fn registry(&self) -> &ViewRegistry {
        &self.registry
    }

    pub fn active(&self) -> Option<ViewId> {
        self.active.borrow().clone()
    }

    pub fn is_switching(&self) -> bool {
        self.switching.get()
    }

    pub fn state_of(&self, view: &ViewId) -> Option<ViewState> {
        self.store.borrow().get(view).cloned()
    }

    pub async fn switch_to(&self, target: &ViewId) -> SwitchOutcome {
        if self.active.borrow().as_ref() == Some(target) {
            return SwitchOutcome::AlreadyActive;
        }
        if self.switching.get() {
            log::debug!("switch to '{}' dropped: another switch in flight", target);
            return SwitchOutcome::Busy;
        }
        let Some(controller) = self.registry.get(target) else {
            log::warn!("⚠️ unknown view: {}", target);
            return SwitchOutcome::UnknownView;
        };

        self.switching.set(true);
        let _guard = SwitchGuard {
            switching: &self.switching,
            chrome: self.chrome.as_ref(),
        };

        let previous = self.active();
        log::info!("🔶 switch: {:?} → '{}'", previous.as_ref().map(|v| v.as_str()), target);

        if let Some(previous) = &previous {
            self.save_state(previous);
        }

        self.chrome.set_busy(true);
        if let Some(previous) = &previous {
            self.chrome.set_visible(previous, false);
            self.chrome.set_highlighted(previous, false);
        }
        self.chrome.set_visible(target, true);
        self.chrome.set_highlighted(target, true);

        if !controller.is_ready() {
            controller.initialize().await;
        }

        *self.active.borrow_mut() = Some(target.clone());

        self.timing.sleep(self.delays.settle_ms).await;
        if let Some(grid) = controller.grid() {
            grid.redraw(true);
        }
        // пока таб был скрыт, окно могло поменять размер
        controller.on_viewport_resize();
        self.restore_state(target).await;

        SwitchOutcome::Switched
    }

    /// Снимает состояние таба в хранилище. Ничего не делает, если таб ещё
    /// не инициализирован. Ошибки логируются, прежний снимок сохраняется.
    pub fn save_state(&self, view: &ViewId) {
        let Some((controller, grid)) = self.ready_grid(view) else {
            log::debug!("save_state('{}'): view not initialized", view);
            return;
        };

        match Self::capture(&controller, grid.as_ref()) {
            Ok(state) => {
                log::debug!(
                    "💾 saved '{}': scroll={:?} expanded={} filters={} sort={}",
                    view,
                    state.scroll_offset,
                    state.expanded_row_ids.len(),
                    state.saved_filters.len(),
                    state.saved_sort.len()
                );
                self.store.borrow_mut().save(view.clone(), state);
            }
            Err(e) => log::error!("❌ save_state('{}') failed: {}", view, e),
        }
    }

    fn capture(controller: &ViewController, grid: &dyn GridApi) -> Result<ViewState, GridError> {
        if let Some(state) = controller.capabilities().capture_state(grid) {
            return Ok(state);
        }

        let scroll_offset = grid.scroll_offset()?;

        // строки, скрытые фильтром, тоже считаются раскрытыми
        Ok(ViewState {
            scroll_offset,
            expanded_row_ids: controller.expanded_rows(),
            saved_filters: grid.header_filters(),
            saved_sort: grid.sorters(),
        })
    }

    /// Восстанавливает сохранённое состояние таба.
    ///
    /// Порядок: сортировка/фильтры → пауза → раскрытые строки → пауза →
    /// прокрутка. Ошибка отдельного поля или шага логируется и не мешает
    /// остальным шагам.
    pub async fn restore_state(&self, view: &ViewId) {
        let Some(state) = self.state_of(view) else {
            return;
        };
        let Some((controller, grid)) = self.ready_grid(view) else {
            return;
        };

        if controller.capabilities().apply_state(grid.as_ref(), &state) {
            log::debug!("restore_state('{}'): handled by view", view);
            return;
        }

        grid.clear_header_filters();
        for rule in &state.saved_filters {
            if grid.column(&rule.field).is_none() {
                log::warn!("⚠️ '{}': skipping filter on missing column '{}'", view, rule.field);
                continue;
            }
            if let Err(e) = grid.set_header_filter_value(&rule.field, rule.value.clone()) {
                log::warn!("⚠️ '{}': filter '{}' not restored: {}", view, rule.field, e);
            }
        }

        let sort: Vec<_> = state
            .saved_sort
            .iter()
            .filter(|rule| {
                let known = grid.column(&rule.field).is_some();
                if !known {
                    log::warn!("⚠️ '{}': skipping sort on missing column '{}'", view, rule.field);
                }
                known
            })
            .cloned()
            .collect();
        if let Err(e) = grid.set_sort(&sort) {
            log::warn!("⚠️ '{}': sort not restored: {}", view, e);
        }

        self.timing.sleep(self.delays.expansion_settle_ms).await;
        controller.apply_expanded(&state.expanded_row_ids);

        self.timing.sleep(self.delays.scroll_settle_ms).await;
        if let Err(e) = grid.set_scroll_offset(state.scroll_offset) {
            log::warn!("⚠️ '{}': scroll not restored: {}", view, e);
        }

        log::debug!("♻️ restored '{}'", view);
    }

    fn ready_grid(&self, view: &ViewId) -> Option<(Rc<ViewController>, Rc<dyn GridApi>)> {
        let controller = self.registry.get(view)?;
        if controller.lifecycle() == ViewLifecycle::Uninitialized {
            return None;
        }
        let grid = controller.grid()?;
        Some((controller, grid))
    }

    pub fn debug_snapshot(&self) -> DebugSnapshot {
        let store = self.store.borrow();
        let views = self
            .registry
            .iter()
            .map(|controller| {
                let grid = controller.grid();
                ViewDebugInfo {
                    id: controller.id().clone(),
                    lifecycle: controller.lifecycle(),
                    row_count: controller.row_count(),
                    filters: grid.as_ref().map(|g| g.header_filters()).unwrap_or_default(),
                    sort: grid.as_ref().map(|g| g.sorters()).unwrap_or_default(),
                    initialized_at: controller.initialized_at(),
                    has_saved_state: store.contains(controller.id()),
                }
            })
            .collect();

        DebugSnapshot {
            active: self.active(),
            switching: self.switching.get(),
            views,
        }
    }
}
