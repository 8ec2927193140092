//! SMS Shield Server
//!
//! Startup: config, sender directory, spam model, breach client, router.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sms_shield::config::Config;
use sms_shield::logic::{DirectoryConfig, HibpClient, RiskPipeline, SenderDirectory, SpamClassifier};
use sms_shield::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "sms_shield=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    tracing::info!("SMS Shield starting ({})...", config.environment);
    tracing::debug!("Configuration: {:?}", config);

    let state = build_state(config.clone())?;

    // Build router
    let app = create_router(state);

    // Start server
    let ip = config.host.parse::<std::net::IpAddr>()
        .with_context(|| format!("Invalid HOST '{}'", config.host))?;
    let addr = SocketAddr::new(ip, config.port);
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await
        .context("Server error")?;

    Ok(())
}

/// Load everything the pipeline needs; any failure aborts startup
fn build_state(config: Config) -> anyhow::Result<AppState> {
    let directory_config = DirectoryConfig::load(&config.directory_path)
        .context("Failed to load sender directory")?;
    let directory = SenderDirectory::from_config(directory_config);
    tracing::info!("Sender directory loaded: {} entries", directory.len());

    let classifier = SpamClassifier::from_artifact(&config.model_path)
        .context("Failed to load spam model")?;

    let breach = HibpClient::new(config.hibp())
        .context("Failed to create breach lookup client")?;
    if config.hibp_api_key.is_none() {
        tracing::warn!("HIBP_API_KEY not set: breach lookups disabled, no escalation will occur");
    }

    let pipeline = RiskPipeline::new(
        Arc::new(directory),
        Arc::new(classifier),
        Arc::new(breach),
        Duration::from_secs(config.breach_timeout_secs),
    );

    Ok(AppState {
        pipeline: Arc::new(pipeline),
        config,
    })
}
