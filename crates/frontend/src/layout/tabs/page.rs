//! TabPage - контейнер одного таба.
//!
//! Видимость управляется координатором через `TabChrome`: скрытый таб
//! остаётся в DOM с классом `tabs__item--hidden`, поэтому его грид и
//! прокрутка не пересоздаются при каждом переключении.

use contracts::views::ViewId;
use leptos::prelude::*;
use std::collections::HashMap;

use crate::grid::{StatsTable, TableGrid};
use crate::layout::global_context::AppGlobalContext;

type GridMap = RwSignal<HashMap<ViewId, TableGrid>>;

/// Меняется один раз: когда у таба появляется грид (ленивая инициализация).
/// Гриды других табов на него не влияют.
fn grid_ready(grids: GridMap, view_id: ViewId) -> Memo<bool> {
    Memo::new(move |_| grids.with(|grids| grids.contains_key(&view_id)))
}

/// Чтение без подписки на всю карту гридов
fn current_grid(grids: GridMap, view_id: &ViewId) -> Option<TableGrid> {
    grids.with_untracked(|grids| grids.get(view_id).copied())
}

#[component]
pub fn TabPage(view_id: ViewId, label: String) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let id_for_visible = view_id.clone();
    let is_visible = move || ctx.chrome.is_visible(&id_for_visible);

    let ready = grid_ready(ctx.grids, view_id.clone());
    let id_for_content = view_id.clone();
    let content = move || {
        if !ready.get() {
            return view! { <div class="tabs__loading">"Loading " {label.clone()} "..."</div> }
                .into_any();
        }
        match current_grid(ctx.grids, &id_for_content) {
            Some(grid) => view! { <StatsTable grid=grid /> }.into_any(),
            None => ().into_any(),
        }
    };

    log::debug!("🔨 TabPage CREATED for: '{}'", view_id);

    view! {
        <div
            class="tabs__item"
            class:tabs__item--hidden=move || !is_visible()
            data-tab-key=view_id.to_string()
        >
            {content}
        </div>
    }
}
