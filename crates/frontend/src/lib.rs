pub mod app;
pub mod app_shell;
pub mod data;
pub mod grid;
pub mod layout;
pub mod shared;
pub mod views;

#[cfg(test)]
mod testing;

use leptos::prelude::*;
use wasm_bindgen::prelude::wasm_bindgen;

pub use shared::debug::stats_debug;

#[wasm_bindgen]
pub fn hydrate() {
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(log::Level::Trace);
    console_error_panic_hook::set_once();

    let config = shared::config::load_config();
    log::set_max_level(config.logging.level().to_level_filter());
    log::info!("📊 statsboard starting, backend: {}", config.backend.url);

    leptos::mount::mount_to_body(move || view! { <app::App config=config /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
