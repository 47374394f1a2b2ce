use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::view_state::{FilterRule, SortRule, ViewId};

/// Стадия жизненного цикла контроллера таба
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewLifecycle {
    Uninitialized,
    Initializing,
    Ready,
}

/// Read-only снимок для отладки из консоли браузера
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSnapshot {
    pub active: Option<ViewId>,
    pub switching: bool,
    pub views: Vec<ViewDebugInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewDebugInfo {
    pub id: ViewId,
    pub lifecycle: ViewLifecycle,
    pub row_count: usize,
    pub filters: Vec<FilterRule>,
    pub sort: Vec<SortRule>,
    pub initialized_at: Option<DateTime<Utc>>,
    pub has_saved_state: bool,
}
