//! Entry point for the heartrisk inference service.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use heartrisk::artifacts::{self, MODEL_DIR};
use heartrisk::config::ServerConfig;
use heartrisk::logging;
use heartrisk::server::{AppState, build_router};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env();
    if let Err(err) = logging::init(config.debug) {
        eprintln!("Logging disabled: {err}");
    }

    // Missing artifacts abort startup here, never on the first request.
    let (scaler, model) = artifacts::load_inference_artifacts(Path::new(MODEL_DIR))?;
    let state = Arc::new(AppState { scaler, model });
    let router = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("heartrisk listening on {addr}");
    axum::serve(listener, router).await?;
    Ok(())
}
