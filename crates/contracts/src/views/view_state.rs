use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use super::row::RowIdentity;

// ============================================================================
// ViewId
// ============================================================================

/// Идентификатор таба (одна таблица = один таб), например "table0"
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewId(pub String);

impl ViewId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ViewId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

// ============================================================================
// Filters & sort
// ============================================================================

/// Значение фильтра в заголовке колонки
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FilterValue {
    /// Подстрока без учёта регистра
    Text(String),
    /// Multi-select: строка проходит, если значение входит в список.
    /// Пустой список = без ограничения.
    Values(Vec<String>),
    /// Min-max, границы включительно
    Range { min: Option<f64>, max: Option<f64> },
}

impl FilterValue {
    /// Фильтр, который ничего не отсекает
    pub fn is_empty(&self) -> bool {
        match self {
            FilterValue::Text(text) => text.trim().is_empty(),
            FilterValue::Values(values) => values.is_empty(),
            FilterValue::Range { min, max } => min.is_none() && max.is_none(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterRule {
    pub field: String,
    pub value: FilterValue,
}

impl FilterRule {
    pub fn new(field: impl Into<String>, value: FilterValue) -> Self {
        Self {
            field: field.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortRule {
    pub field: String,
    pub direction: SortDirection,
}

impl SortRule {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

// ============================================================================
// ViewState
// ============================================================================

/// Смещение прокрутки контейнера таблицы, px
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrollOffset {
    pub top: f64,
    pub left: f64,
}

impl ScrollOffset {
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Сохранённое UI-состояние таба.
///
/// Создаётся при первом сохранении, перезаписывается при каждом следующем
/// и не удаляется до конца сессии.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub scroll_offset: ScrollOffset,
    pub expanded_row_ids: HashSet<RowIdentity>,
    pub saved_filters: Vec<FilterRule>,
    pub saved_sort: Vec<SortRule>,
}
