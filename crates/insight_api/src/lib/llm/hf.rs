use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::{Summarizer, SummaryBounds, SummaryResponse};

/// Client for the Hugging Face Inference API summarization endpoint.
///
/// Inference is deterministic (`do_sample: false`) and inputs beyond the
/// model's context limit are truncated server-side, matching the pretrained
/// pipeline defaults. Every call is wrapped in a bounded timeout so a stuck
/// model cannot hold a request handler indefinitely.
pub struct HfInferenceClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

#[derive(Debug, thiserror::Error)]
pub enum HfError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("summarization timed out after {0:?}")]
    Timeout(Duration),
    #[error("model returned no summary")]
    EmptyResponse,
}

#[derive(Debug, Deserialize)]
struct HfSummaryOutput {
    summary_text: String,
}

impl HfInferenceClient {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: "https://api-inference.huggingface.co".into(),
            model: Self::SUMMARIZER_MODEL.into(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn send_summarize_request(
        &self,
        text: &str,
        bounds: &SummaryBounds,
    ) -> Result<Vec<HfSummaryOutput>, HfError> {
        let body = serde_json::json!({
            "inputs": text,
            "parameters": {
                "max_length": bounds.max_length,
                "min_length": bounds.min_length,
                "do_sample": false,
                "truncation": "longest_first",
            },
            "options": {
                "wait_for_model": true,
            },
        });

        let resp = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(HfError::Api { status, message });
        }

        Ok(resp.json::<Vec<HfSummaryOutput>>().await?)
    }
}

impl Summarizer for HfInferenceClient {
    const SUMMARIZER_MODEL: &'static str = "t5-small";

    type Error = HfError;

    fn model(&self) -> &str {
        &self.model
    }

    async fn summarize(
        &self,
        text: &str,
        bounds: &SummaryBounds,
    ) -> Result<SummaryResponse, Self::Error> {
        let outputs = tokio::time::timeout(self.timeout, self.send_summarize_request(text, bounds))
            .await
            .map_err(|_| {
                tracing::error!(timeout = ?self.timeout, "Summarization call timed out");
                HfError::Timeout(self.timeout)
            })??;

        let summary = outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or(HfError::EmptyResponse)?;

        Ok(SummaryResponse { summary })
    }

    async fn check_ready(&self) -> Result<(), Self::Error> {
        let resp = self
            .client
            .get(format!("{}/status/{}", self.base_url, self.model))
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Model status check failed"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(HfError::Api { status, message });
        }

        Ok(())
    }
}
