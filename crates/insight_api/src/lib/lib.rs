pub mod api;
mod insights;
mod llm;
pub mod tracing;

pub use insights::{generate_insights, AiInsights};
pub use llm::hf::{HfError, HfInferenceClient};
pub use llm::summarizer::{Summarizer, SummaryBounds, SummaryResponse};
