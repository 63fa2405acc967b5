use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use insight_datastore::DataStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::Summarizer;

mod error;
mod summaries;

pub use error::ApiError;
pub use summaries::{HealthResponse, ListParams, SummarizeRequest, SummarizeResponse};

/// Per-process dependencies threaded into every handler. Handlers themselves
/// hold no state across requests.
pub struct AppState<D, S> {
    pub store: D,
    pub summarizer: Arc<S>,
}

impl<D, S> AppState<D, S> {
    pub fn new(store: D, summarizer: Arc<S>) -> Self {
        AppState { store, summarizer }
    }
}

impl<D: Clone, S> Clone for AppState<D, S> {
    fn clone(&self) -> Self {
        AppState {
            store: self.store.clone(),
            summarizer: Arc::clone(&self.summarizer),
        }
    }
}

pub fn router<D, S>(state: AppState<D, S>) -> Router
where
    D: DataStore + Clone + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/v1/health", get(summaries::health::<D, S>))
        .route("/api/v1/summarize", post(summaries::summarize::<D, S>))
        .route("/api/v1/summaries", get(summaries::list_summaries::<D, S>))
        .route(
            "/api/v1/summaries/{id}",
            get(summaries::get_summary::<D, S>),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
