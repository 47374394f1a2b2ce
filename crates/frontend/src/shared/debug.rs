//! Отладочный доступ к состоянию табов из консоли браузера:
//! `wasm_bindgen.stats_debug()`.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;

use crate::layout::tabs::TabCoordinator;

thread_local! {
    static COORDINATOR: RefCell<Weak<TabCoordinator>> = RefCell::new(Weak::new());
}

pub fn register_coordinator(coordinator: &Rc<TabCoordinator>) {
    COORDINATOR.with(|slot| *slot.borrow_mut() = Rc::downgrade(coordinator));
}

/// Снимок: активный таб, идёт ли переключение, состояние каждого таба
#[wasm_bindgen]
pub fn stats_debug() -> JsValue {
    let snapshot = COORDINATOR.with(|slot| slot.borrow().upgrade().map(|c| c.debug_snapshot()));
    match snapshot {
        Some(snapshot) => serde_wasm_bindgen::to_value(&snapshot).unwrap_or_else(|e| {
            log::error!("stats_debug: {}", e);
            JsValue::NULL
        }),
        None => JsValue::NULL,
    }
}
