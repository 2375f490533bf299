use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gig_calendar_backend::config::AppConfig;
use gig_calendar_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    // RUST_LOG wins over the configured filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Setting up backend");
    let app_state = initialize_backend(&config).await?;
    let app = create_router(app_state, &config.cors_origin)?;

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
