use std::env;
use std::str::FromStr;

use attendance_payroll::api::{AppState, create_router};
use attendance_payroll::config::ConfigLoader;
use tokio::net::TcpListener;
use tracing::{Level, info};

const DEFAULT_CONFIG_DIR: &str = "./config/default";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let level = env::var("PAYROLL_LOG_LEVEL")
        .ok()
        .and_then(|value| Level::from_str(&value).ok())
        .unwrap_or(Level::INFO);

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();

    let config_dir =
        env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let config = ConfigLoader::load(&config_dir)?;
    let bind_addr = env::var("PAYROLL_BIND_ADDR")
        .unwrap_or_else(|_| config.policy().server.bind_addr.clone());

    info!(
        config_dir = %config_dir,
        employees = config.config().directory().employees.len(),
        attendance_records = config.config().attendance().len(),
        "Configuration loaded"
    );

    let app = create_router(AppState::with_seeded_store(config));
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Server starting...");

    axum::serve(listener, app).await?;
    Ok(())
}
