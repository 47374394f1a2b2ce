use contracts::views::ViewId;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;

/// Кнопки табов. Клик только запрашивает переключение, подсветку
/// выставляет координатор.
#[component]
pub fn TabBar(tabs: Vec<(ViewId, String)>) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    let buttons = tabs
        .into_iter()
        .map(|(view_id, label)| {
            let id_for_active = view_id.clone();
            let is_active = Memo::new(move |_| ctx.chrome.is_highlighted(&id_for_active));
            let id_for_click = view_id.clone();
            let on_click = move |_| ctx.switch_to(id_for_click.clone());

            view! {
                <button
                    class="tab"
                    class:active=is_active
                    data-tab-key=view_id.to_string()
                    on:click=on_click
                >
                    <span>{label}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="tabs__bar" class:tabs__bar--busy=move || ctx.chrome.busy.get()>
            {buttons}
            <Show when=move || ctx.chrome.busy.get()>
                <span class="tabs__spinner" title="Switching...">"⏳"</span>
            </Show>
        </div>
    }
}
