use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{migrate::Migrator, postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{datastore::DataStore, NewSummary, SummaryRecord};

static MIGRATOR: Migrator = sqlx::migrate!();

#[derive(Debug, Clone)]
pub struct PgDataStore {
    pub pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: Uuid,
    source_text: String,
    summary_text: String,
    insights: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl From<SummaryRow> for SummaryRecord {
    fn from(row: SummaryRow) -> Self {
        SummaryRecord {
            id: row.id.to_string(),
            source_text: row.source_text,
            summary_text: row.summary_text,
            insights: row.insights,
            created_at: row.created_at.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }
}

impl PgDataStore {
    /// Establish connection to database and create the summaries table
    /// and its indexes if not exists
    pub async fn init(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await
            .inspect_err(
                |e| tracing::error!(error = ?e, "Failed to establish connection to database"),
            )
            .context("Failed to connect to postgres database")?;

        MIGRATOR
            .run(&pool)
            .await
            .inspect_err(|e| tracing::error!(error = ?e, "Failed to run database migrations"))
            .context("Failed to run database migrations")?;

        Ok(PgDataStore { pool })
    }

    /// Drains the connection pool. Called once at shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

impl DataStore for PgDataStore {
    async fn insert_summary(&self, summary: &NewSummary) -> anyhow::Result<String> {
        #[derive(sqlx::FromRow)]
        struct InsertedId {
            id: Uuid,
        }

        let inserted = sqlx::query_as::<_, InsertedId>(
            r#"
            INSERT INTO summaries (source_text, summary_text, insights)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&summary.source_text)
        .bind(&summary.summary_text)
        .bind(&summary.insights)
        .fetch_one(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Failed to insert summary"))
        .context("Failed to insert summary")?;

        Ok(inserted.id.to_string())
    }

    async fn fetch_recent(&self, limit: i64) -> anyhow::Result<Vec<SummaryRecord>> {
        let rows = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, source_text, summary_text, insights, created_at
            FROM summaries
            ORDER BY created_at DESC, seq DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, "Failed to fetch recent summaries"))
        .context("Failed to fetch recent summaries")?;

        Ok(rows.into_iter().map(SummaryRecord::from).collect())
    }

    async fn fetch_by_id(&self, id: &str) -> anyhow::Result<Option<SummaryRecord>> {
        // A malformed id can never match a stored record
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row = sqlx::query_as::<_, SummaryRow>(
            r#"
            SELECT id, source_text, summary_text, insights, created_at
            FROM summaries
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .inspect_err(|e| tracing::error!(error = ?e, %id, "Failed to fetch summary by id"))
        .context("Failed to fetch summary by id")?;

        Ok(row.map(SummaryRecord::from))
    }
}
