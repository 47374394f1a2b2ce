//! Необязательные возможности таба.
//!
//! Все методы имеют поведение по умолчанию; таб переопределяет только то,
//! что делает иначе. `None`/`false` из capture/apply означает «используй
//! общую логику координатора».

use contracts::views::{RowIdentity, StatRow, ViewState};

use crate::grid::api::GridApi;

pub trait ViewCapabilities {
    fn row_identity(&self, row: &StatRow, key_fields: &[String]) -> RowIdentity {
        RowIdentity::from_fields(row, key_fields)
    }

    /// Собственный снимок состояния вместо стандартного
    fn capture_state(&self, _grid: &dyn GridApi) -> Option<ViewState> {
        None
    }

    /// `true`, если таб сам восстановил состояние
    fn apply_state(&self, _grid: &dyn GridApi, _state: &ViewState) -> bool {
        false
    }
}

/// Таб без особенностей
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCapabilities;

impl ViewCapabilities for DefaultCapabilities {}
