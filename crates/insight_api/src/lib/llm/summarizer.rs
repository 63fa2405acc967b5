use std::{
    fmt::{Debug, Display},
    future::Future,
};

use serde::Deserialize;

/// The external summarization model, treated as an opaque
/// text-in/text-out function.
pub trait Summarizer {
    const SUMMARIZER_MODEL: &'static str;

    type Error: Debug + Display;

    fn model(&self) -> &str {
        Self::SUMMARIZER_MODEL
    }

    fn summarize(
        &self,
        text: &str,
        bounds: &SummaryBounds,
    ) -> impl Future<Output = Result<SummaryResponse, Self::Error>> + Send;

    /// Probes whether the model is available for inference. Used by the
    /// health endpoint; never called on the summarize path.
    fn check_ready(&self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Output length bounds passed through to the model.
#[derive(Debug, Clone, Copy)]
pub struct SummaryBounds {
    pub max_length: u16,
    pub min_length: u16,
}

impl Default for SummaryBounds {
    fn default() -> Self {
        SummaryBounds {
            max_length: 120,
            min_length: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}
