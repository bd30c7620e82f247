//! Attendance engine HTTP server.
//!
//! Loads configuration, seeds an in-memory store and serves the API.
//!
//! # Environment Variables
//!
//! - `ATTENDANCE_CONFIG_DIR`: Configuration directory (default: ./config/default)
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use attendance_engine::api::{AppState, create_router};
use attendance_engine::config::{ConfigLoader, VersionedPolicy};
use attendance_engine::engine::{AttendanceEngine, Clock, SystemClock};
use attendance_engine::store::InMemoryStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    let config_dir = PathBuf::from(
        env::var("ATTENDANCE_CONFIG_DIR").unwrap_or_else(|_| "./config/default".to_string()),
    );
    info!(config_dir = %config_dir.display(), "Starting attendance server");

    let loader = ConfigLoader::load(&config_dir)?;
    let seed = ConfigLoader::load_seed(config_dir.join("seed.yaml"))?;

    let clock = Arc::new(SystemClock);
    let policy = VersionedPolicy::initial(loader.policy().clone(), clock.now());
    let store = Arc::new(InMemoryStore::from_seed(seed, policy)?);

    let engine = AttendanceEngine::new(store, loader.attendance().clone(), clock)?;
    let report = engine.recalculate_balances()?;
    info!(
        employees = report.employees,
        policy_version = report.policy_version,
        "Initial balances computed"
    );

    let app = create_router(AppState::new(engine));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
