use std::env;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_CONFIG_PATH: &str = "config/default.yaml";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let addr = env::var("PAYROLL_ENGINE_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let config_path =
        env::var("PAYROLL_ENGINE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = match ConfigLoader::load(&config_path) {
        Ok(config) => config,
        Err(err) => {
            error!(path = %config_path, error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };
    info!(path = %config_path, config = ?config.config(), "Loaded configuration");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(err) => {
            error!(%addr, error = %err, "Failed to bind listener");
            std::process::exit(1);
        }
    };
    info!(%addr, "Payroll engine listening");

    if let Err(err) = axum::serve(listener, create_router(AppState::new(config))).await {
        error!(error = %err, "Server stopped");
        std::process::exit(1);
    }
}
