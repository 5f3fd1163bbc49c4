pub mod history;
pub mod import;
pub mod store;
pub mod types;

pub use history::{summarize, HistoryQuery, HistorySummary, SortKey, SortOrder};
pub use import::{load_activity_log, record_activities, ActivityEntry, ActivityLog};
pub use store::{category_totals, top_category, EmissionLedger, DEFAULT_RECENT_LIMIT};
pub use types::{CategoryShare, EmissionRecord, NewEmission};
