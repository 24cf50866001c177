//! File-only tracing setup so stdout stays free for play.
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::ClientConfig;

/// Installs the global subscriber writing to `<log_dir>/<session_id>/client.log`.
///
/// `RUST_LOG` refines the default `info` filter. Keep the returned guard
/// alive for the whole run; dropping it flushes and stops the writer.
pub fn setup_logging(config: &ClientConfig) -> Result<(WorkerGuard, PathBuf)> {
    let session_log_dir = config.log_dir.join(&config.session_id);
    std::fs::create_dir_all(&session_log_dir).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            session_log_dir.display()
        )
    })?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "client.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    let log_file = session_log_dir.join("client.log");
    tracing::info!(session = %config.session_id, "logging initialized");
    Ok((guard, log_file))
}
