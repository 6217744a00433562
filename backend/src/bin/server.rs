//! TCI HTTP Server Binary
//!
//! This is the main entry point for the call volume dashboard REST API.
//! It initializes the repository, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the seeded mock repository (default)
//! MOCK_SEED=7 cargo run --bin tci-server
//!
//! # Run from a configuration file
//! TCI_CONFIG=backend/tci.toml cargo run --bin tci-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: `mock` (default) or `local`
//! - `MOCK_SEED`: Seed of the mock generator (default: 42)
//! - `TCI_CONFIG`: Path to a `tci.toml` file, takes precedence over the variables above
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tci_backend::db;
use tci_backend::http::{create_router, AppState};

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
        .with_thread_ids(true)
        .init();

    info!("Starting TCI HTTP Server");

    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    match repository.list_lines_of_business().await {
        Ok(lines) => info!("Repository initialized with {} lines of business", lines.len()),
        Err(e) => info!("Repository initialized, listing lines of business failed: {}", e),
    }

    let app = create_router(AppState::new(repository));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
