use contracts::views::{ViewId, ViewState};
use std::collections::HashMap;

/// ViewStateStore хранит UI-состояние табов между переключениями.
/// Состояния живут в памяти до конца сессии и не удаляются.
#[derive(Clone, Debug, Default)]
pub struct ViewStateStore {
    states: HashMap<ViewId, ViewState>,
}

impl ViewStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the state for a specific view
    pub fn get(&self, view: &ViewId) -> Option<&ViewState> {
        self.states.get(view)
    }

    /// Save (or overwrite) the state for a specific view
    pub fn save(&mut self, view: ViewId, state: ViewState) {
        self.states.insert(view, state);
    }

    pub fn contains(&self, view: &ViewId) -> bool {
        self.states.contains_key(view)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::views::ScrollOffset;

    #[test]
    fn test_save_overwrites() {
        let mut store = ViewStateStore::new();
        let id = ViewId::from("table0");
        store.save(
            id.clone(),
            ViewState {
                scroll_offset: ScrollOffset::new(10.0, 0.0),
                ..Default::default()
            },
        );
        store.save(
            id.clone(),
            ViewState {
                scroll_offset: ScrollOffset::new(20.0, 5.0),
                ..Default::default()
            },
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(&id).unwrap().scroll_offset, ScrollOffset::new(20.0, 5.0));
        assert!(store.get(&ViewId::from("table1")).is_none());
    }
}
