//! View registry - единственный источник правды для маппинга ViewId → контроллер.
//!
//! Контроллеры создаются сразу (это дешёвые оболочки), а грид и загрузка
//! данных откладываются до первой активации таба.

use contracts::views::ViewId;
use std::rc::Rc;

use crate::data::source::DataSource;
use crate::grid::api::GridFactory;
use crate::shared::timing::Timing;
use crate::views::capabilities::{DefaultCapabilities, ViewCapabilities};
use crate::views::controller::ViewController;
use crate::views::definition::ViewDefinition;

pub struct ViewRegistry {
    controllers: Vec<Rc<ViewController>>,
}

impl ViewRegistry {
    pub fn new() -> Self {
        Self {
            controllers: Vec::new(),
        }
    }

    /// Регистрирует все определения с общими коллабораторами
    pub fn from_definitions(
        definitions: Vec<ViewDefinition>,
        source: Rc<dyn DataSource>,
        grid_factory: Rc<dyn GridFactory>,
        timing: Rc<dyn Timing>,
        toggle_debounce_ms: u32,
    ) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(Rc::new(ViewController::new(
                definition,
                source.clone(),
                grid_factory.clone(),
                timing.clone(),
                Rc::new(DefaultCapabilities) as Rc<dyn ViewCapabilities>,
                toggle_debounce_ms,
            )));
        }
        registry
    }

    /// Повторная регистрация того же ViewId заменяет контроллер
    pub fn register(&mut self, controller: Rc<ViewController>) {
        if let Some(existing) = self
            .controllers
            .iter_mut()
            .find(|c| c.id() == controller.id())
        {
            log::warn!("⚠️ view '{}' registered twice, replacing", controller.id());
            *existing = controller;
        } else {
            self.controllers.push(controller);
        }
    }

    pub fn get(&self, view: &ViewId) -> Option<Rc<ViewController>> {
        self.controllers.iter().find(|c| c.id() == view).cloned()
    }

    pub fn ids(&self) -> Vec<ViewId> {
        self.controllers.iter().map(|c| c.id().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<ViewController>> {
        self.controllers.iter()
    }

    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl Default for ViewRegistry {
    fn default() -> Self {
        Self::new()
    }
}
