//! Backend entry-point: loads settings, installs logging and runs the server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use userbase::config::ServerSettings;
use userbase::inbound::http::health::HealthState;
use userbase::telemetry;

use server::{ServerConfig, create_server, spawn_shutdown_listener};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))?;
    let app_env = settings.environment().map_err(std::io::Error::other)?;

    let _log_guard = match telemetry::init(app_env, settings.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            warn!(error = %e, "tracing init failed");
            None
        }
    };

    let config = ServerConfig::from_settings(&settings).map_err(std::io::Error::other)?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    spawn_shutdown_listener(server.handle(), health_state);

    server.await?;
    info!(env = %app_env, "server stopped");
    Ok(())
}
