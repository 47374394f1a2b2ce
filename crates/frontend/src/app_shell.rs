//! Application Shell - корневой layout с панелью табов и страницами табов.

use contracts::views::ViewId;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{TabBar, TabPage};
use crate::layout::Shell;

/// Инициализирует синхронизацию активного таба с URL (?active=...)
/// и запрашивает первое переключение.
#[component]
pub fn MainLayout(tabs: Vec<(ViewId, String)>) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    ctx.init_router_integration();

    let initial = ctx
        .view_from_url()
        .or_else(|| tabs.first().map(|(id, _)| id.clone()));
    match initial {
        Some(view) => {
            log::info!("🚀 initial tab: '{}'", view);
            ctx.switch_to(view);
        }
        None => log::warn!("⚠️ no tabs registered"),
    }

    let tabs_for_bar = tabs.clone();
    view! {
        <Shell
            title="Stats".to_string()
            bar=move || view! { <TabBar tabs=tabs_for_bar.clone() /> }.into_any()
            content=move || {
                tabs.iter()
                    .map(|(view_id, label)| {
                        view! { <TabPage view_id=view_id.clone() label=label.clone() /> }
                    })
                    .collect_view()
                    .into_any()
            }
        />
    }
}
