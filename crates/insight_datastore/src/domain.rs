use serde::{Deserialize, Serialize};

/// A persisted summary record.
///
/// Records are immutable once stored; there are no update or delete
/// operations anywhere in the system. `id` is an opaque string assigned by
/// the backend on insert, and `created_at` is an ISO-8601 timestamp set once
/// at creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub id: String,
    pub source_text: String,
    pub summary_text: String,
    /// Open map of metric name to value. Kept schemaless at the storage
    /// boundary so new metrics need no migration.
    pub insights: serde_json::Value,
    pub created_at: String,
}

/// Input to [`DataStore::insert_summary`]; the backend adds `id` and
/// `created_at`.
///
/// [`DataStore::insert_summary`]: crate::DataStore::insert_summary
#[derive(Debug, Clone)]
pub struct NewSummary {
    pub source_text: String,
    pub summary_text: String,
    pub insights: serde_json::Value,
}
