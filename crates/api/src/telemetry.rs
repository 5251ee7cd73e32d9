//! Logging and Metrics Setup

use anyhow::Context;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::LoggingSettings;

/// Initialize logging; call once per process
pub fn init_logging(settings: &LoggingSettings) -> anyhow::Result<()> {
    let level: Level = settings
        .level
        .parse()
        .with_context(|| format!("Invalid log level {:?}", settings.level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    if settings.json {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    }
    .context("Failed to set tracing subscriber")
}

/// Install the global Prometheus recorder; call once per process
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    PrometheusBuilder::new()
        .install_recorder()
        .context("Failed to install Prometheus recorder")
}
