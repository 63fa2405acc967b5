use std::future::Future;

use crate::{NewSummary, SummaryRecord};

pub mod memory;
pub mod postgres;

pub trait DataStore {
    /// Persists a new record with a freshly generated unique id and a
    /// creation timestamp, returning the id.
    fn insert_summary(
        &self,
        summary: &NewSummary,
    ) -> impl Future<Output = anyhow::Result<String>> + Send;

    /// Returns at most `limit` records, most recent first.
    fn fetch_recent(
        &self,
        limit: i64,
    ) -> impl Future<Output = anyhow::Result<Vec<SummaryRecord>>> + Send;

    /// Exact match on id. Absence is `Ok(None)`, not an error; a malformed
    /// id is treated the same as an unknown one.
    fn fetch_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = anyhow::Result<Option<SummaryRecord>>> + Send;
}

impl<T: DataStore + Send + Sync> DataStore for &T {
    async fn insert_summary(&self, summary: &NewSummary) -> anyhow::Result<String> {
        (**self).insert_summary(summary).await
    }

    async fn fetch_recent(&self, limit: i64) -> anyhow::Result<Vec<SummaryRecord>> {
        (**self).fetch_recent(limit).await
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Option<SummaryRecord>> {
        (**self).fetch_by_id(id).await
    }
}
