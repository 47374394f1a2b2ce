pub mod global_context;
pub mod tabs;

use leptos::prelude::*;

/// Каркас приложения: заголовок, панель табов и область контента.
///
/// ```text
/// +------------------------------------------+
/// |  title                      [tab][tab]   |
/// +------------------------------------------+
/// |              active tab content          |
/// +------------------------------------------+
/// ```
#[component]
pub fn Shell<B, C>(title: String, bar: B, content: C) -> impl IntoView
where
    B: Fn() -> AnyView + 'static + Send,
    C: Fn() -> AnyView + 'static + Send,
{
    view! {
        <div class="app-layout">
            <header class="app-header">
                <h1 class="app-header__title">{title}</h1>
                {bar()}
            </header>
            <main class="app-main">
                {content()}
            </main>
        </div>
    }
}
