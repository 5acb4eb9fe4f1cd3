use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meta_ads_relay::ads_client::MetaGraphClient;
use meta_ads_relay::config::Config;
use meta_ads_relay::handlers::AppState;
use meta_ads_relay::routes::build_router;

/// Main entry point for the relay.
///
/// Initializes tracing, loads configuration, builds the Graph API client once
/// and serves the router until the process is stopped.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "meta_ads_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    let client = MetaGraphClient::new(&config)?;
    tracing::info!(
        "✓ Graph API client initialized for ad account act_{}",
        config.ad_account_id
    );

    let app_state = Arc::new(AppState {
        platform: Arc::new(client),
    });

    let app = build_router(app_state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
