//! Bousai - A multilingual disaster information dashboard.
//!
//! Serves the composed view over HTTP while pollers refresh earthquakes,
//! weather and alerts in the background.
//!
//! # API Endpoints
//!
//! - `GET /view` - The composed screen for the current session
//! - `GET /languages` - Language catalog
//! - `GET /legend` - Intensity legend
//! - `POST /language`, `/tab`, `/earthquakes/mode`, `/weather/area` - Session changes
//! - `POST /retry/:category`, `/reload` - Manual refresh
//! - `GET /health` - Health check

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bousai::api::{AppState, router};
use bousai::config::Config;
use bousai::dashboard::Dashboard;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("bousai=info".parse()?))
        .init();

    let config = Config::from_env()?;

    info!(
        port = config.port,
        api_url = %config.api_url,
        lang = %config.language,
        area_code = %config.area_code,
        refresh_secs = config.refresh_interval.as_secs(),
        "Starting Bousai"
    );

    let dashboard = Arc::new(Dashboard::from_config(&config)?);
    dashboard.start();

    let app = router(AppState {
        dashboard: Arc::clone(&dashboard),
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Bousai is listening");

    axum::serve(listener, app).await?;

    dashboard.stop();
    Ok(())
}
