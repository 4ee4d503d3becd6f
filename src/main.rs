//! behaviord entrypoint: load config and model artifacts, open the store,
//! serve the scoring API. A missing or malformed artifact fails startup;
//! per-request fallbacks (unseen protocols, lenient extraction) never do.

use behaviord::{
    api::{self, AppState},
    config::ServiceConfig,
    logging::StructuredLogger,
    model::{BehaviorClassifier, ProtocolEncoder},
    scoring::SessionScorer,
    storage::ResultStore,
};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("BEHAVIORD_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("config.json"));
    let mut config = ServiceConfig::load(&config_path);
    if let Ok(port) = std::env::var("PORT") {
        if let Ok(port) = port.parse() {
            config.server.port = port;
        }
    }

    StructuredLogger::init(config.log.json, &config.log.level);

    info!(data_dir = ?config.data_dir, "behaviord starting");

    std::fs::create_dir_all(&config.data_dir)?;

    let encoder = Arc::new(ProtocolEncoder::load(&config.model.protocol_classes_path)?);
    let classifier = Arc::new(BehaviorClassifier::load(&config.model.classifier_path)?);
    let store = Arc::new(ResultStore::open(&config.data_dir.join("store.db"))?);

    let state = AppState {
        scorer: SessionScorer::new(encoder, classifier),
        store,
        simulation: config.simulation.clone(),
    };
    let app = api::router(state);

    let addr = SocketAddr::new(config.server.host.parse::<IpAddr>()?, config.server.port);
    info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("behaviord stopped");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
