use serde::Serialize;

use crate::{Summarizer, SummaryBounds};

/// Summary text plus the metrics derived from the source/summary pair.
///
/// Serialized both into API responses and into the open insights map stored
/// alongside each record.
#[derive(Debug, Clone, Serialize)]
pub struct AiInsights {
    pub summary: String,
    pub word_count: usize,
    pub summary_word_count: usize,
    pub compression_ratio: f64,
    pub model: String,
}

/// Runs the summarizer once over `text` and computes the derived metrics.
///
/// Callers guarantee `text` is non-empty. Any summarizer error propagates
/// unchanged; there are no retries and no partial result.
pub async fn generate_insights<S: Summarizer>(
    summarizer: &S,
    text: &str,
    bounds: &SummaryBounds,
) -> Result<AiInsights, S::Error> {
    let response = summarizer
        .summarize(text, bounds)
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize text"))?;

    let summary = response.summary.trim().to_string();
    let word_count = text.split_whitespace().count();
    let summary_word_count = summary.split_whitespace().count();
    let compression_ratio = compression_ratio(word_count, summary_word_count);

    Ok(AiInsights {
        summary,
        word_count,
        summary_word_count,
        compression_ratio,
        model: summarizer.model().to_string(),
    })
}

/// Percentage reduction in word count from source to summary, rounded to two
/// decimal places. Zero when the source has no words.
fn compression_ratio(word_count: usize, summary_word_count: usize) -> f64 {
    if word_count == 0 {
        return 0.0;
    }

    let ratio = (1.0 - summary_word_count as f64 / word_count as f64) * 100.0;
    (ratio * 100.0).round() / 100.0
}
