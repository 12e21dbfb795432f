//! Backend entry-point: wires configuration, storage, and REST endpoints.

use actix_web::web;
use color_eyre::eyre::Result;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use backend::inbound::http::health::HealthState;
use backend::server::{create_server, AppConfig};
use ortho_config::OrthoConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::load()?;
    info!(
        host = config.host(),
        port = config.port(),
        demo_mode = config.demo_mode,
        "starting habit tracker backend"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).await?;
    server.await?;
    Ok(())
}
