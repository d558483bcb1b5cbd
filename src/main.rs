mod cli;
mod core;
mod features;
mod shared;

use crate::cli::Cli;
use crate::core::config::Config;
use crate::core::state::AppState;
use crate::features::triage::clients::{DisabledClient, GeminiClient, ReasoningClient};
use crate::features::triage::IssueClassifier;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Build Tokio runtime with configurable worker threads
    let worker_threads = std::env::var("TOKIO_WORKER_THREADS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|p| p.get())
                .unwrap_or(4)
        });

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?;

    runtime.block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> anyhow::Result<()> {
    // Load .env file BEFORE initializing logger so RUST_LOG is available
    let _ = dotenvy::dotenv();

    // Logs go to stderr so command output on stdout stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env().map_err(|e| anyhow::anyhow!(e))?;
    if let Some(locale) = cli.locale {
        config.app.locale = locale;
    }
    config.app.seed_samples |= cli.seed_samples;

    tracing::debug!(
        "Configuration loaded (model={}, locale={})",
        config.gemini.model,
        config.app.locale
    );

    let client: Arc<dyn ReasoningClient> = match GeminiClient::new(&config.gemini) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            tracing::warn!("AI analysis disabled: {}", e);
            Arc::new(DisabledClient::new(e.to_string()))
        }
    };
    let classifier = IssueClassifier::new(client, config.app.locale.clone());

    let mut state = if config.app.seed_samples {
        AppState::with_samples()
    } else {
        AppState::new()
    };

    cli::run(cli.command, &mut state, &classifier).await?;

    Ok(())
}
