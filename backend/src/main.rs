//! Backend entry-point: loads settings, wires REST endpoints and serves them.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use roster_backend::inbound::http::health::HealthState;
use roster_backend::inbound::http::session_config::BuildMode;
use server::{AppSettings, ServerConfig, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load_from_iter(std::env::args_os()).map_err(std::io::Error::other)?;
    let config = ServerConfig::from_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(bind_addr = %config.bind_addr(), "starting roster backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
