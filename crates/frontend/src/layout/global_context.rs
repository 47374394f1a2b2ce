use contracts::views::ViewId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::HashMap;
use std::rc::Rc;
use web_sys::window;

use crate::grid::TableGrid;
use crate::layout::tabs::chrome::TabChrome;
use crate::layout::tabs::coordinator::{SwitchOutcome, TabCoordinator};

/// Контекст приложения: обвязка табов, гриды созданных табов и координатор.
///
/// Координатор живёт в `StoredValue` с локальным хранилищем, поэтому
/// контекст остаётся `Copy` и его можно захватывать в обработчики.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub chrome: TabChrome,
    pub grids: RwSignal<HashMap<ViewId, TableGrid>>,
    /// Активный таб после завершения переключения (для URL и заголовка)
    pub active: RwSignal<Option<ViewId>>,
    coordinator: StoredValue<Rc<TabCoordinator>, LocalStorage>,
}

impl AppGlobalContext {
    pub fn new(
        chrome: TabChrome,
        grids: RwSignal<HashMap<ViewId, TableGrid>>,
        coordinator: Rc<TabCoordinator>,
    ) -> Self {
        Self {
            chrome,
            grids,
            active: RwSignal::new(None),
            coordinator: StoredValue::new_local(coordinator),
        }
    }

    pub fn coordinator(&self) -> Rc<TabCoordinator> {
        self.coordinator.get_value()
    }

    /// Запускает переключение таба. Повторные клики во время переключения
    /// отбрасываются координатором.
    pub fn switch_to(&self, view: ViewId) {
        let coordinator = self.coordinator();
        let active = self.active;
        spawn_local(async move {
            match coordinator.switch_to(&view).await {
                SwitchOutcome::Switched => active.set(coordinator.active()),
                SwitchOutcome::UnknownView => {
                    log::warn!("⚠️ tab '{}' is not registered", view);
                }
                SwitchOutcome::AlreadyActive | SwitchOutcome::Busy => {}
            }
        });
    }

    /// Таб из query-параметра `?active=...`, если он есть
    pub fn view_from_url(&self) -> Option<ViewId> {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        let view = ViewId::new(params.get("active")?.clone());

        let known = self.coordinator().registry().get(&view).is_some();
        known.then_some(view)
    }

    /// Синхронизирует активный таб с адресной строкой
    pub fn init_router_integration(&self) {
        let active = self.active;
        Effect::new(move |_| {
            let Some(active_key) = active.get() else {
                return;
            };
            let query_string = serde_qs::to_string(&HashMap::from([(
                "active".to_string(),
                active_key.to_string(),
            )]))
            .unwrap_or_default();

            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            // Only update URL if it actually changed
            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }
}
