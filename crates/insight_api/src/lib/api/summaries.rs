use axum::{
    extract::{Path, Query, State},
    Json,
};
use insight_datastore::{DataStore, NewSummary, SummaryRecord};
use serde::{Deserialize, Serialize};

use crate::{
    api::{ApiError, AppState},
    generate_insights, AiInsights, Summarizer, SummaryBounds,
};

const SERVICE_NAME: &str = "AI Insights API";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub service: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
    pub max_length: Option<u16>,
    pub min_length: Option<u16>,
}

impl SummarizeRequest {
    /// Validates the request fields and resolves the length bounds. Runs
    /// before any model or storage call; a rejected request persists nothing.
    fn validated_bounds(&self) -> Result<SummaryBounds, ApiError> {
        if self.text.is_empty() {
            return Err(ApiError::Validation("text must not be empty".into()));
        }

        let defaults = SummaryBounds::default();
        let max_length = self.max_length.unwrap_or(defaults.max_length);
        let min_length = self.min_length.unwrap_or(defaults.min_length);

        if !(11..=512).contains(&max_length) {
            return Err(ApiError::Validation(
                "max_length must be greater than 10 and at most 512".into(),
            ));
        }
        if !(5..512).contains(&min_length) {
            return Err(ApiError::Validation(
                "min_length must be at least 5 and less than 512".into(),
            ));
        }
        if min_length > max_length {
            return Err(ApiError::Validation(
                "min_length must not exceed max_length".into(),
            ));
        }

        Ok(SummaryBounds {
            max_length,
            min_length,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SummarizeResponse {
    pub id: String,
    pub summary: String,
    pub insights: AiInsights,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

pub(super) async fn health<D, S>(
    State(state): State<AppState<D, S>>,
) -> Result<Json<HealthResponse>, ApiError>
where
    D: DataStore + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    state
        .summarizer
        .check_ready()
        .await
        .map_err(|e| ApiError::ModelUnavailable(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ok",
        model: state.summarizer.model().to_string(),
        service: SERVICE_NAME,
    }))
}

pub(super) async fn summarize<D, S>(
    State(state): State<AppState<D, S>>,
    Json(payload): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, ApiError>
where
    D: DataStore + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let bounds = payload.validated_bounds()?;

    let insights = generate_insights(state.summarizer.as_ref(), &payload.text, &bounds)
        .await
        .map_err(|e| ApiError::Summarization(e.to_string()))?;

    let new_summary = NewSummary {
        source_text: payload.text,
        summary_text: insights.summary.clone(),
        insights: serde_json::to_value(&insights)
            .map_err(|e| ApiError::Summarization(e.to_string()))?,
    };

    // insert happens strictly after successful generation
    let id = state
        .store
        .insert_summary(&new_summary)
        .await
        .map_err(|e| ApiError::Summarization(e.to_string()))?;

    tracing::info!(%id, word_count = insights.word_count, "Stored new summary");

    Ok(Json(SummarizeResponse {
        id,
        summary: insights.summary.clone(),
        insights,
    }))
}

pub(super) async fn list_summaries<D, S>(
    State(state): State<AppState<D, S>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<SummaryRecord>>, ApiError>
where
    D: DataStore + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let limit = params.limit.unwrap_or(50);
    let records = state.store.fetch_recent(limit).await?;

    Ok(Json(records))
}

pub(super) async fn get_summary<D, S>(
    State(state): State<AppState<D, S>>,
    Path(id): Path<String>,
) -> Result<Json<SummaryRecord>, ApiError>
where
    D: DataStore + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let record = state
        .store
        .fetch_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(Json(record))
}
