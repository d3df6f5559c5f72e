//! Marina quote service entry point.
//!
//! Configuration comes from the environment (and `.env` if present).

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use marina_quote::{router, AppState, Config, MessageExtractor, RateEngine, RateTable};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env().context("Failed to read configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let rates = match &config.rate_table_path {
        Some(path) => {
            let table = RateTable::load(path)
                .with_context(|| format!("Failed to load rate table from {}", path.display()))?;
            info!("Rate table loaded from {}", path.display());
            table
        }
        None => {
            info!("Using built-in rate table");
            RateTable::standard()
        }
    };

    let extractor = MessageExtractor::new().context("Failed to compile extraction patterns")?;

    if config.api_key.is_none() {
        info!("ESTIMATOR_API_KEY not set, API key check disabled");
    }

    let state = AppState::new(RateEngine::new(rates), extractor, config.api_key.clone());
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(config.address())
        .await
        .with_context(|| format!("Failed to bind {}", config.address()))?;
    info!("Listening on {}", config.address());

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
