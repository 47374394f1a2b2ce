//! Подгонка ширин активного таба при изменении размера окна.

use gloo_timers::callback::Timeout;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::layout::global_context::AppGlobalContext;

/// Подписывается на `resize` окна. Серия событий схлопывается в один
/// пересчёт через `debounce_ms` после последнего.
pub fn init_resize_listener(ctx: AppGlobalContext, debounce_ms: u32) {
    let Some(window) = web_sys::window() else {
        return;
    };

    let pending: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));

    let on_resize = Closure::wrap(Box::new(move || {
        // drop отменяет предыдущий таймер
        let timeout = Timeout::new(debounce_ms, move || {
            let coordinator = ctx.coordinator();
            let Some(active) = coordinator.active() else {
                return;
            };
            if let Some(controller) = coordinator.registry().get(&active) {
                log::debug!("📐 resize: refitting columns of '{}'", active);
                controller.on_viewport_resize();
            }
        });
        *pending.borrow_mut() = Some(timeout);
    }) as Box<dyn FnMut()>);

    let _ = window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref());
    on_resize.forget();
}
