//! Provenance Service Binary
//!
//! Runs the HTTP server for the collectible provenance ledger.

use std::process;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

use provenance_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() {
    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            process::exit(2);
        }
    };

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");

    info!(
        name = %config.name,
        admin = %config.admin,
        port = config.port,
        start_height = config.start_height,
        "Starting provenance service"
    );

    let port = config.port;
    let state = Arc::new(AppState::new(config));
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %addr, error = %e, "Failed to bind to address");
            process::exit(1);
        }
    };

    info!(addr = %addr, "Provenance service listening");

    axum::serve(listener, app).await.expect("Server error");
}
