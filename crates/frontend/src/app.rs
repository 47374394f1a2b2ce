use contracts::views::ViewId;
use leptos::prelude::*;
use std::collections::HashMap;
use std::rc::Rc;

use crate::app_shell::MainLayout;
use crate::data::rest::RestDataSource;
use crate::data::source::DataSource;
use crate::grid::{GridApi, GridFactory, TableGrid};
use crate::layout::global_context::AppGlobalContext;
use crate::layout::tabs::{TabChrome, TabCoordinator, ViewChrome, ViewRegistry};
use crate::shared::config::AppConfig;
use crate::shared::debug::register_coordinator;
use crate::shared::timing::{BrowserTiming, Timing};
use crate::views::catalog::all_views;

/// Собирает коллабораторов (источник данных, фабрику гридов, реестр,
/// координатор) и отдаёт их дереву компонентов через контекст.
#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let timing: Rc<dyn Timing> = Rc::new(BrowserTiming);
    let source: Rc<dyn DataSource> = Rc::new(RestDataSource::new(&config.backend, timing.clone()));

    let chrome = TabChrome::new();
    let grids: RwSignal<HashMap<ViewId, TableGrid>> = RwSignal::new(HashMap::new());

    // грид создаётся при первой активации таба, TabPage подхватывает его из сигнала
    let factory: Rc<dyn GridFactory> = Rc::new(move |view: &ViewId| -> Rc<dyn GridApi> {
        let grid = TableGrid::new();
        grids.update(|grids| {
            grids.insert(view.clone(), grid);
        });
        Rc::new(grid)
    });

    let registry = ViewRegistry::from_definitions(
        all_views(),
        source,
        factory,
        timing.clone(),
        config.timing.toggle_debounce_ms,
    );
    let tabs: Vec<(ViewId, String)> = registry
        .iter()
        .map(|controller| (controller.id().clone(), controller.definition().label.clone()))
        .collect();

    let coordinator = Rc::new(TabCoordinator::new(
        Rc::new(registry),
        Rc::new(chrome) as Rc<dyn ViewChrome>,
        timing,
        config.timing,
    ));
    register_coordinator(&coordinator);

    let ctx = AppGlobalContext::new(chrome, grids, coordinator);
    provide_context(ctx);
    crate::layout::tabs::resize::init_resize_listener(ctx, config.timing.resize_debounce_ms);

    view! {
        <MainLayout tabs=tabs />
    }
}
