pub mod debug;
pub mod row;
pub mod view_state;

pub use debug::{DebugSnapshot, ViewDebugInfo, ViewLifecycle};
pub use row::{RowIdentity, StatRow};
pub use view_state::{FilterRule, FilterValue, ScrollOffset, SortDirection, SortRule, ViewId, ViewState};
