//! Heart Disease Prediction - Main Entry Point

use api::config::Settings;
use api::run_server;
use api::telemetry::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    init_logging(&settings.logging)?;

    info!("=== Heart Disease Prediction v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model: {} ({:?})", settings.model.path, settings.model.format);

    run_server(settings).await
}
