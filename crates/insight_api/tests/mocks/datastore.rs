use std::sync::{Arc, Mutex};

use insight_datastore::{DataStore, NewSummary, SummaryRecord};

#[derive(Clone, Default)]
pub struct MockDataStore {
    pub inserted: Arc<Mutex<Vec<NewSummary>>>,
    pub fail_with: Option<String>,
}

impl MockDataStore {
    pub fn failing(msg: &str) -> Self {
        Self {
            fail_with: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

impl DataStore for MockDataStore {
    async fn insert_summary(&self, summary: &NewSummary) -> anyhow::Result<String> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        let mut inserted = self.inserted.lock().unwrap();
        inserted.push(summary.clone());
        Ok(inserted.len().to_string())
    }

    async fn fetch_recent(&self, _limit: i64) -> anyhow::Result<Vec<SummaryRecord>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(Vec::new())
    }

    async fn fetch_by_id(&self, _id: &str) -> anyhow::Result<Option<SummaryRecord>> {
        if let Some(ref msg) = self.fail_with {
            return Err(anyhow::anyhow!("{}", msg));
        }
        Ok(None)
    }
}
