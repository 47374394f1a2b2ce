//! Видимая «обвязка» табов: контейнеры, подсветка кнопок, индикатор занятости.

use contracts::views::ViewId;
use leptos::prelude::*;
use std::collections::HashSet;

pub trait ViewChrome {
    fn set_visible(&self, view: &ViewId, visible: bool);

    fn set_highlighted(&self, view: &ViewId, highlighted: bool);

    fn set_busy(&self, busy: bool);
}

/// Реализация на сигналах: `TabPage` и `TabBar` читают их реактивно
#[derive(Clone, Copy)]
pub struct TabChrome {
    pub visible: RwSignal<HashSet<ViewId>>,
    pub highlighted: RwSignal<HashSet<ViewId>>,
    pub busy: RwSignal<bool>,
}

impl TabChrome {
    pub fn new() -> Self {
        Self {
            visible: RwSignal::new(HashSet::new()),
            highlighted: RwSignal::new(HashSet::new()),
            busy: RwSignal::new(false),
        }
    }

    pub fn is_visible(&self, view: &ViewId) -> bool {
        self.visible.with(|set| set.contains(view))
    }

    pub fn is_highlighted(&self, view: &ViewId) -> bool {
        self.highlighted.with(|set| set.contains(view))
    }
}

impl Default for TabChrome {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle(signal: RwSignal<HashSet<ViewId>>, view: &ViewId, on: bool) {
    signal.update(|set| {
        if on {
            set.insert(view.clone());
        } else {
            set.remove(view);
        }
    });
}

impl ViewChrome for TabChrome {
    fn set_visible(&self, view: &ViewId, visible: bool) {
        toggle(self.visible, view, visible);
    }

    fn set_highlighted(&self, view: &ViewId, highlighted: bool) {
        toggle(self.highlighted, view, highlighted);
    }

    fn set_busy(&self, busy: bool) {
        self.busy.set(busy);
    }
}
