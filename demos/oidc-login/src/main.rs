use anyhow::{Context, Result};
use oidc_login::{AppState, config::AppConfig};
use ras_identity_oidc::OidcClient;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_new(config.log_filter()).context("Invalid log filter")?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.logging.target);

    match config.logging.format.to_lowercase().as_str() {
        "json" => builder.json().try_init(),
        "compact" => builder.compact().try_init(),
        _ => builder.pretty().try_init(),
    }
    .map_err(|e| anyhow::anyhow!("Failed to install tracing subscriber: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let config = AppConfig::load()?;
    init_tracing(&config)?;
    info!("Starting OIDC login demo server");
    if config.sources.is_empty() {
        info!("No config file or overrides found, using defaults and OIDC_DEMO__ variables");
    }
    for source in &config.sources {
        info!("Configuration source: {}", source);
    }

    let client = OidcClient::new(config.oidc.clone()).context("Failed to create OIDC client")?;
    let redirect_uri = client.redirect_uri().to_string();
    let app = oidc_login::app(AppState::new(client));

    let bind_addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;

    info!("Server running on http://{}", bind_addr);
    info!("OIDC redirect URI: {}", redirect_uri);
    warn!(
        "This is an example application. Do not use in production without proper security review."
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
