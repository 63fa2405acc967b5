use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use clap::Parser;
use insight_api::{
    api::{self, AppState},
    tracing::init_tracing_subscriber,
    HfInferenceClient,
};
use insight_datastore::{MemoryDataStore, PgDataStore};

#[derive(Parser)]
#[command(name = "insight-api", about = "AI insights & summarization service")]
struct Cli {
    /// Postgres connection URL; required unless running in test mode
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Use the in-memory store instead of Postgres
    #[arg(long, env = "TEST_MODE")]
    test_mode: bool,

    /// Hugging Face Inference API token
    #[arg(long, env = "HF_API_KEY")]
    hf_api_key: String,

    /// Summarization model identifier
    #[arg(long, env = "SUMMARIZER_MODEL", default_value = "t5-small")]
    model: String,

    /// Upper bound on a single summarization call, in seconds
    #[arg(long, env = "SUMMARIZE_TIMEOUT_SECS", default_value = "60")]
    summarize_timeout_secs: u64,

    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value = "8000")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    init_tracing_subscriber()?;

    let summarizer = Arc::new(
        HfInferenceClient::new(&cli.hf_api_key)
            .with_model(&cli.model)
            .with_timeout(Duration::from_secs(cli.summarize_timeout_secs)),
    );

    let addr = SocketAddr::new(
        cli.host.parse().context("Invalid host address")?,
        cli.port,
    );
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind listener")?;
    tracing::info!(%addr, model = %cli.model, "Server listening");

    if cli.test_mode {
        tracing::warn!("Running in test mode - using in-memory storage");

        let state = AppState::new(MemoryDataStore::new(), summarizer);
        axum::serve(listener, api::router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;
    } else {
        let database_url = cli
            .database_url
            .as_deref()
            .context("DATABASE_URL is required unless --test-mode is set")?;
        let store = PgDataStore::init(database_url).await?;

        let state = AppState::new(store.clone(), summarizer);
        axum::serve(listener, api::router(state))
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        store.close().await;
        tracing::info!("Closed database connection");
    }

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("Shutdown signal received");
}
